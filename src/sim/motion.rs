//! Per-frame displacement and boundary retirement
//!
//! Displacement is per tick, not per elapsed second: a faster display
//! moves the world faster. Timestamps only gate timed removals.

use super::state::{GameEvent, GameState};

/// Advance every entity by one frame, then retire what crossed its boundary
pub fn run(state: &mut GameState, now: f64) {
    if !state.is_playing() {
        return;
    }

    let s = &state.settings;
    state.player.steer(s.lateral_speed, s.road_width);

    advance_projectiles(state);
    advance_targets(state, now);
    advance_penalty_targets(state, now);
    scroll_decorations(state);
}

/// Projectiles fly away from the rider; those past the far boundary are misses
fn advance_projectiles(state: &mut GameState) {
    let step = state.settings.projectile_speed;
    let far_z = state.settings.projectile_far_z;

    let mut missed = Vec::new();
    state.projectiles.retain_mut(|p| {
        p.pos.z -= step;
        if p.pos.z < far_z {
            missed.push(p.id);
            return false;
        }
        true
    });

    for id in missed {
        state.misses += 1;
        state.push_event(GameEvent::ProjectileMissed { id });
        log::debug!("Projectile {} missed", id);
    }
}

/// Targets approach the rider; un-hit ones that pass are losses, hit ones
/// leave once their fade completes
fn advance_targets(state: &mut GameState, now: f64) {
    let step = state.speed * state.settings.target_speed_multiplier;
    let pass_z = state.player.pos.z + state.settings.pass_margin;
    let fade_ms = state.settings.hit_fade_ms;

    let mut lost = Vec::new();
    state.targets.retain_mut(|t| {
        t.pos.z += step;
        if t.is_hit() {
            return !t.fade_finished(now, fade_ms);
        }
        if t.pos.z >= pass_z {
            lost.push(t.id);
            return false;
        }
        true
    });

    for id in lost {
        state.losses += 1;
        state.push_event(GameEvent::TargetLost { id });
        log::debug!("Target {} got past (losses: {})", id, state.losses);
    }
}

/// Penalty targets approach faster; passing or expiring is silent
fn advance_penalty_targets(state: &mut GameState, now: f64) {
    let step = state.speed * state.settings.penalty_speed_multiplier;
    let pass_z = state.player.pos.z + state.settings.pass_margin;

    state.penalty_targets.retain_mut(|p| {
        p.pos.z += step;
        p.pos.z < pass_z && !p.is_expired(now)
    });
}

/// Scroll scenery and loop it back once it is behind the camera
fn scroll_decorations(state: &mut GameState) {
    use super::state::DecorKind;

    let tree_step = state.speed * state.settings.tree_speed_multiplier;
    let building_step = state.speed * state.settings.building_speed_multiplier;
    let wrap_z = state.settings.decor_wrap_z;

    for d in &mut state.decorations {
        d.pos.z += match d.kind {
            DecorKind::Tree(_) => tree_step,
            DecorKind::Building { .. } => building_step,
        };
        if d.pos.z > wrap_z {
            d.pos.z = d.reset_z;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;
    use crate::sim::state::{GamePhase, TargetShape};
    use approx::assert_relative_eq;
    use glam::Vec3;

    fn quiet_state() -> GameState {
        let settings = Settings {
            tree_count: 0,
            building_count: 0,
            ..Settings::default()
        };
        GameState::new(settings, 1)
    }

    #[test]
    fn test_player_clamped_to_road() {
        let mut state = quiet_state();
        state.player.direction = 1.0;
        for _ in 0..100 {
            run(&mut state, 0.0);
        }
        assert_eq!(state.player.pos.x, state.settings.road_width);

        state.player.direction = -1.0;
        for _ in 0..100 {
            run(&mut state, 0.0);
        }
        assert_eq!(state.player.pos.x, -state.settings.road_width);
    }

    #[test]
    fn test_target_moves_by_speed_times_multiplier() {
        let mut state = quiet_state();
        let id = state.place_target(Vec3::new(0.0, 0.2, -10.0), TargetShape::Box).unwrap();
        run(&mut state, 16.0);
        let t = state.targets.iter().find(|t| t.id == id).unwrap();
        assert_relative_eq!(t.pos.z, -10.0 + 0.1 * 2.5, epsilon = 1e-5);
    }

    #[test]
    fn test_unhit_target_passing_is_a_loss() {
        let mut state = quiet_state();
        state.place_target(Vec3::new(0.0, 0.2, 1.9), TargetShape::Box);
        run(&mut state, 16.0);
        assert!(state.targets.is_empty());
        assert_eq!(state.losses, 1);
    }

    #[test]
    fn test_hit_target_is_not_a_loss_and_fades_out() {
        let mut state = quiet_state();
        let id = state.place_target(Vec3::new(0.0, 0.2, 1.9), TargetShape::Box).unwrap();
        state.targets[0].mark_hit(0.0);

        run(&mut state, 100.0);
        assert_eq!(state.losses, 0);
        assert_eq!(state.targets.len(), 1);

        run(&mut state, 200.0);
        assert!(state.remove_target(id).is_none());
        assert_eq!(state.losses, 0);
    }

    #[test]
    fn test_projectile_past_far_boundary_is_a_miss() {
        let mut state = quiet_state();
        state.fire();
        // From z=0.5 to below -50 at 0.5 per frame
        for _ in 0..101 {
            run(&mut state, 0.0);
        }
        assert_eq!(state.projectiles.len(), 1);
        run(&mut state, 0.0);
        assert!(state.projectiles.is_empty());
        assert_eq!(state.misses, 1);
    }

    #[test]
    fn test_penalty_target_passing_is_silent() {
        let mut state = quiet_state();
        state.place_penalty_target(Vec3::new(2.0, 0.2, 1.8));
        run(&mut state, 0.0);
        assert!(state.penalty_targets.is_empty());
        assert_eq!(state.penalties, 0);
        assert_eq!(state.losses, 0);
    }

    #[test]
    fn test_penalty_target_lifetime() {
        let settings = Settings {
            tree_count: 0,
            building_count: 0,
            penalty_lifetime_ms: Some(500.0),
            ..Settings::default()
        };
        let mut state = GameState::new(settings, 1);
        state.now = 1000.0;
        state.place_penalty_target(Vec3::new(0.0, 0.2, -30.0));

        run(&mut state, 1499.0);
        assert_eq!(state.penalty_targets.len(), 1);
        run(&mut state, 1500.0);
        assert!(state.penalty_targets.is_empty());
        assert_eq!(state.penalties, 0);
    }

    #[test]
    fn test_decorations_wrap() {
        let mut state = GameState::new(Settings::default(), 2);
        state.decorations.truncate(1);
        state.decorations[0].pos.z = 19.9;
        let reset = state.decorations[0].reset_z;
        run(&mut state, 0.0);
        assert_eq!(state.decorations[0].pos.z, reset);
    }

    #[test]
    fn test_frozen_after_game_over() {
        let mut state = quiet_state();
        state.place_target(Vec3::new(0.0, 0.2, -5.0), TargetShape::Box);
        state.phase = GamePhase::GameOver;
        state.player.direction = 1.0;
        run(&mut state, 0.0);
        assert_eq!(state.targets[0].pos.z, -5.0);
        assert_eq!(state.player.pos.x, 0.0);
    }
}
