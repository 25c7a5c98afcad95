//! Demo mode - the game plays itself
//!
//! Produces the same input edges a player would, so the session sees no
//! difference between a human and the autopilot.

use super::input::{Control, InputEvent};
use super::state::GameState;

/// Penalty targets closer than this (in z) are dodged
const DODGE_LOOKAHEAD: f32 = 6.0;
/// Lateral clearance kept from an incoming penalty target
const DODGE_CLEARANCE: f32 = 0.8;
/// Lateral error tolerated before steering
const AIM_TOLERANCE: f32 = 0.15;
const MAX_PROJECTILES_IN_FLIGHT: usize = 2;

/// Decide this frame's input edges
pub fn autopilot(state: &GameState) -> Vec<InputEvent> {
    let mut events = Vec::new();
    if !state.is_playing() {
        return events;
    }

    let player = state.player.pos;
    let road_width = state.settings.road_width;

    // Closest incoming penalty target in our lane
    let threat = state
        .penalty_targets
        .iter()
        .filter(|p| p.pos.z < player.z + state.settings.penalty_band)
        .filter(|p| player.z - p.pos.z < DODGE_LOOKAHEAD)
        .filter(|p| (p.pos.x - player.x).abs() < DODGE_CLEARANCE)
        .max_by(|a, b| a.pos.z.total_cmp(&b.pos.z));

    // Closest live target still ahead
    let aim = state
        .live_targets()
        .filter(|t| t.pos.z < player.z)
        .max_by(|a, b| a.pos.z.total_cmp(&b.pos.z));

    let desired = if let Some(threat) = threat {
        // Step away from the threat, toward the road centre when pinned
        let away = if threat.pos.x > player.x { -1.0 } else { 1.0 };
        if (player.x + away * 0.05).abs() >= road_width { -away } else { away }
    } else if let Some(target) = aim {
        let dx = target.pos.x - player.x;
        if dx > AIM_TOLERANCE {
            1.0
        } else if dx < -AIM_TOLERANCE {
            -1.0
        } else {
            0.0
        }
    } else {
        0.0
    };

    if desired != state.player.direction {
        events.push(match desired {
            d if d < 0.0 => InputEvent::Press(Control::Left),
            d if d > 0.0 => InputEvent::Press(Control::Right),
            _ => InputEvent::Release(Control::Left),
        });
    }

    let aligned = aim.is_some_and(|t| (t.pos.x - player.x).abs() <= AIM_TOLERANCE);
    if aligned && threat.is_none() && state.projectiles.len() < MAX_PROJECTILES_IN_FLIGHT {
        events.push(InputEvent::Press(Control::Fire));
        events.push(InputEvent::Release(Control::Fire));
    }

    events
}
