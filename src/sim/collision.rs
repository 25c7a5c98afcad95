//! Collision detection and scoring
//!
//! Two independent passes: projectiles against live targets, then penalty
//! targets against the rider.

use glam::Vec3;

use super::state::{GameEvent, GameState};

/// Whether a projectile is close enough to a target to hit it.
///
/// Uses full 3D Euclidean distance.
#[inline]
pub fn projectile_hits_target(projectile: Vec3, target: Vec3, hit_radius: f32) -> bool {
    projectile.distance_squared(target) < hit_radius * hit_radius
}

/// Whether a penalty target is inside the depth band around the rider and
/// laterally close enough to collide
#[inline]
pub fn penalty_hits_player(penalty: Vec3, player: Vec3, band: f32, lateral_threshold: f32) -> bool {
    let in_band = penalty.z >= player.z - band && penalty.z <= player.z + band;
    in_band && (penalty.x - player.x).abs() < lateral_threshold
}

/// Resolve all collisions for this tick
pub fn run(state: &mut GameState, now: f64) {
    if !state.is_playing() {
        return;
    }
    resolve_projectile_hits(state, now);
    resolve_penalty_contacts(state);
}

/// Each projectile credits at most one target: the first live one in
/// registry order within the hit radius.
fn resolve_projectile_hits(state: &mut GameState, now: f64) {
    let radius = state.settings.hit_radius;

    let mut i = 0;
    while i < state.projectiles.len() {
        let projectile = state.projectiles[i].pos;
        let struck = state
            .targets
            .iter_mut()
            .find(|t| !t.is_hit() && projectile_hits_target(projectile, t.pos, radius));

        let Some(target) = struck else {
            i += 1;
            continue;
        };

        target.mark_hit(now);
        let target_id = target.id;
        let projectile_id = state.projectiles.remove(i).id;

        state.hits += 1;
        state.speed += state.settings.speed_increment;
        state.push_event(GameEvent::TargetHit {
            target_id,
            projectile_id,
        });
        log::debug!(
            "Target {} hit by projectile {} (hits: {}, speed: {:.3})",
            target_id,
            projectile_id,
            state.hits,
            state.speed
        );
    }
}

fn resolve_penalty_contacts(state: &mut GameState) {
    let player = state.player.pos;
    let band = state.settings.penalty_band;
    let lateral = state.settings.penalty_lateral_threshold;

    let mut taken = Vec::new();
    state.penalty_targets.retain(|p| {
        if penalty_hits_player(p.pos, player, band, lateral) {
            taken.push(p.id);
            return false;
        }
        true
    });

    for id in taken {
        state.penalties += 1;
        state.push_event(GameEvent::PenaltyTaken { id });
        log::debug!("Penalty target {} hit the rider (penalties: {})", id, state.penalties);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;
    use crate::sim::state::{Projectile, TargetShape};

    fn quiet_state() -> GameState {
        let settings = Settings {
            tree_count: 0,
            building_count: 0,
            ..Settings::default()
        };
        GameState::new(settings, 1)
    }

    fn add_projectile(state: &mut GameState, pos: Vec3) -> u32 {
        let id = state.next_entity_id();
        state.projectiles.push(Projectile { id, pos });
        id
    }

    #[test]
    fn test_projectile_hits_target() {
        let target = Vec3::new(0.0, 0.2, -5.0);
        assert!(projectile_hits_target(Vec3::new(0.0, 0.1, -5.3), target, 0.5));
        assert!(!projectile_hits_target(Vec3::new(0.0, 0.1, -5.6), target, 0.5));
        assert!(!projectile_hits_target(Vec3::new(0.5, 0.2, -5.0), target, 0.5));
    }

    #[test]
    fn test_penalty_hits_player() {
        let player = Vec3::new(0.0, 0.1, 0.0);
        assert!(penalty_hits_player(Vec3::new(0.3, 0.2, 0.4), player, 0.5, 0.5));
        assert!(!penalty_hits_player(Vec3::new(0.3, 0.2, 0.6), player, 0.5, 0.5));
        assert!(!penalty_hits_player(Vec3::new(0.3, 0.2, -0.6), player, 0.5, 0.5));
        assert!(!penalty_hits_player(Vec3::new(0.5, 0.2, 0.0), player, 0.5, 0.5));
    }

    #[test]
    fn test_hit_scores_and_speeds_up() {
        let mut state = quiet_state();
        let target_id = state.place_target(Vec3::new(0.0, 0.2, -5.0), TargetShape::Box).unwrap();
        add_projectile(&mut state, Vec3::new(0.0, 0.1, -5.1));
        let speed = state.speed;

        run(&mut state, 50.0);

        assert_eq!(state.hits, 1);
        assert!(state.projectiles.is_empty());
        assert_eq!(state.speed, speed + state.settings.speed_increment);
        let target = state.targets.iter().find(|t| t.id == target_id).unwrap();
        assert_eq!(target.hit_at(), Some(50.0));
    }

    #[test]
    fn test_one_target_per_projectile() {
        let mut state = quiet_state();
        let first = state.place_target(Vec3::new(0.0, 0.2, -5.0), TargetShape::Box).unwrap();
        let second = state.place_target(Vec3::new(0.1, 0.2, -5.0), TargetShape::Box).unwrap();
        add_projectile(&mut state, Vec3::new(0.05, 0.2, -5.0));

        run(&mut state, 0.0);

        assert_eq!(state.hits, 1);
        assert!(state.targets.iter().find(|t| t.id == first).unwrap().is_hit());
        assert!(!state.targets.iter().find(|t| t.id == second).unwrap().is_hit());
    }

    #[test]
    fn test_hit_target_never_scores_twice() {
        let mut state = quiet_state();
        state.place_target(Vec3::new(0.0, 0.2, -5.0), TargetShape::Box);
        add_projectile(&mut state, Vec3::new(0.0, 0.2, -5.0));
        add_projectile(&mut state, Vec3::new(0.0, 0.2, -5.0));

        run(&mut state, 0.0);
        run(&mut state, 16.0);

        assert_eq!(state.hits, 1);
        // The second projectile found nothing live and keeps flying
        assert_eq!(state.projectiles.len(), 1);
    }

    #[test]
    fn test_two_projectiles_two_targets() {
        let mut state = quiet_state();
        state.place_target(Vec3::new(-1.0, 0.2, -5.0), TargetShape::Box);
        state.place_target(Vec3::new(1.0, 0.2, -5.0), TargetShape::Box);
        add_projectile(&mut state, Vec3::new(1.0, 0.2, -5.0));
        add_projectile(&mut state, Vec3::new(-1.0, 0.2, -5.0));

        run(&mut state, 0.0);

        assert_eq!(state.hits, 2);
        assert!(state.projectiles.is_empty());
        assert!(state.targets.iter().all(|t| t.is_hit()));
    }

    #[test]
    fn test_penalty_contact() {
        let mut state = quiet_state();
        state.place_penalty_target(Vec3::new(0.2, 0.2, 0.3));
        state.place_penalty_target(Vec3::new(2.0, 0.2, 0.3));

        run(&mut state, 0.0);

        assert_eq!(state.penalties, 1);
        assert_eq!(state.penalty_targets.len(), 1);
        assert_eq!(state.penalty_targets[0].pos.x, 2.0);
    }
}
