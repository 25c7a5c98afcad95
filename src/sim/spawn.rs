//! Timed spawning of targets and penalty targets, plus initial scenery
//!
//! All randomness comes from the session RNG so a seed fully determines
//! spawn positions.

use glam::Vec3;
use rand::Rng;

use super::state::{DecorKind, Decoration, GameState, TargetShape, TreeKind};
use crate::consts::TARGET_Y;

/// Spawn due targets and penalty targets for this tick
pub fn run(state: &mut GameState, now: f64) {
    if !state.is_playing() {
        return;
    }

    if now - state.last_target_spawn > state.settings.target_spawn_interval_ms {
        spawn_target(state);
        state.last_target_spawn = now;
    }

    if now - state.last_penalty_spawn > state.settings.penalty_spawn_interval_ms {
        spawn_penalty_target(state);
        state.last_penalty_spawn = now;
    }
}

/// Uniform lateral position across the road
fn random_lane_x(state: &mut GameState) -> f32 {
    let w = state.settings.road_width;
    state.rng.random_range(-w..w)
}

/// Spawn a target at a random lane position on the far spawn line
pub fn spawn_target(state: &mut GameState) -> Option<u32> {
    let x = random_lane_x(state);
    let shape = TargetShape::ALL[state.rng.random_range(0..TargetShape::ALL.len())];
    state.place_target(Vec3::new(x, TARGET_Y, state.settings.spawn_z), shape)
}

/// Spawn a penalty target at a random lane position on the far spawn line
pub fn spawn_penalty_target(state: &mut GameState) -> Option<u32> {
    let x = random_lane_x(state);
    state.place_penalty_target(Vec3::new(x, TARGET_Y, state.settings.spawn_z))
}

/// Scatter trees and buildings along both sides of the road
pub fn populate_roadside(state: &mut GameState) {
    let s = state.settings.clone();

    // Trees alternate sides at random depths
    for i in 0..s.tree_count {
        let x = if i % 2 == 0 { -s.road_tree_width } else { s.road_tree_width };
        let z = -state.rng.random::<f32>() * s.tree_spacing * s.tree_count as f32
            - state.rng.random::<f32>() * 10.0;
        let kind = if state.rng.random_bool(0.5) { TreeKind::Oak } else { TreeKind::Pine };
        let id = state.next_entity_id();
        state.decorations.push(Decoration {
            id,
            kind: DecorKind::Tree(kind),
            pos: Vec3::new(x, 0.25, z),
            reset_z: s.tree_reset_z,
        });
    }

    // Buildings face each other in rows, looping one full row length back
    let row_length = s.building_count as f32 * s.building_spacing;
    for i in 0..s.building_count {
        let row_z = -(i as f32) * s.building_spacing + state.rng.random::<f32>() * 2.0;
        let size = Vec3::new(
            state.rng.random::<f32>() * 1.5 + 0.5,
            state.rng.random::<f32>() * 0.5 + 5.0,
            state.rng.random::<f32>() * 1.5 + 0.5,
        );
        let left_z = row_z + state.rng.random::<f32>();
        let right_z = row_z - state.rng.random::<f32>();
        let offset = s.road_width + size.x / 2.0 + 0.5;

        for (x, z) in [(-offset, left_z), (offset, right_z)] {
            let id = state.next_entity_id();
            state.decorations.push(Decoration {
                id,
                kind: DecorKind::Building { size },
                pos: Vec3::new(x, size.y / 2.0, z),
                reset_z: z - row_length,
            });
        }
    }
}
