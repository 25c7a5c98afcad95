//! Input edge events
//!
//! The platform layer translates key presses and releases into
//! `InputEvent`s. Steering edges update the rider's cached direction, which
//! the motion system reads every tick.

use serde::{Deserialize, Serialize};

use super::state::GameState;

/// Logical controls
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Control {
    Left,
    Right,
    Fire,
    Restart,
}

/// A press or release edge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputEvent {
    Press(Control),
    Release(Control),
}

/// Apply one input edge.
///
/// While the game is over only `Press(Restart)` has an effect.
pub fn apply_input(state: &mut GameState, event: InputEvent, now: f64) {
    if !state.is_playing() {
        if event == InputEvent::Press(Control::Restart) {
            state.restart(now);
        }
        return;
    }

    match event {
        InputEvent::Press(Control::Left) => state.player.direction = -1.0,
        InputEvent::Press(Control::Right) => state.player.direction = 1.0,
        // Releasing either arrow stops the rider, even if the other is held
        InputEvent::Release(Control::Left | Control::Right) => state.player.direction = 0.0,
        InputEvent::Press(Control::Fire) => {
            state.fire();
        }
        InputEvent::Press(Control::Restart)
        | InputEvent::Release(Control::Fire | Control::Restart) => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;
    use crate::sim::state::GamePhase;

    #[test]
    fn test_steering_edges() {
        let mut state = GameState::new(Settings::default(), 1);
        apply_input(&mut state, InputEvent::Press(Control::Left), 0.0);
        assert_eq!(state.player.direction, -1.0);
        apply_input(&mut state, InputEvent::Press(Control::Right), 0.0);
        assert_eq!(state.player.direction, 1.0);
        apply_input(&mut state, InputEvent::Release(Control::Left), 0.0);
        assert_eq!(state.player.direction, 0.0);
    }

    #[test]
    fn test_fire_spawns_projectile_at_rider() {
        let mut state = GameState::new(Settings::default(), 1);
        state.player.pos.x = 1.2;
        apply_input(&mut state, InputEvent::Press(Control::Fire), 0.0);
        apply_input(&mut state, InputEvent::Release(Control::Fire), 0.0);
        assert_eq!(state.projectiles.len(), 1);
        assert_eq!(state.projectiles[0].pos.x, 1.2);
    }

    #[test]
    fn test_restart_ignored_while_playing() {
        let mut state = GameState::new(Settings::default(), 1);
        state.hits = 2;
        apply_input(&mut state, InputEvent::Press(Control::Restart), 0.0);
        assert_eq!(state.hits, 2);
    }

    #[test]
    fn test_game_over_only_accepts_restart() {
        let mut state = GameState::new(Settings::default(), 1);
        state.losses = 10;
        state.phase = GamePhase::GameOver;

        apply_input(&mut state, InputEvent::Press(Control::Right), 0.0);
        apply_input(&mut state, InputEvent::Press(Control::Fire), 0.0);
        assert_eq!(state.player.direction, 0.0);
        assert!(state.projectiles.is_empty());

        apply_input(&mut state, InputEvent::Press(Control::Restart), 500.0);
        assert!(state.is_playing());
        assert_eq!(state.losses, 0);
    }
}
