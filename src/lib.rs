//! Paan Rider - a first-person motorcycle target shooter
//!
//! Core modules:
//! - `sim`: Frame-driven simulation (spawning, motion, collisions, scoring)
//! - `settings`: Tunable game constants, loadable from JSON
//! - `platform`: Key mapping and browser bindings

pub mod platform;
pub mod settings;
pub mod sim;

pub use settings::{ConfigError, Difficulty, Settings};
pub use sim::{GameState, tick};

/// Default game constants (all overridable through [`Settings`])
pub mod consts {
    /// Road half-width; the rider is clamped to [-ROAD_WIDTH, ROAD_WIDTH]
    pub const ROAD_WIDTH: f32 = 2.5;
    /// Lateral distance covered per frame while steering
    pub const LATERAL_SPEED: f32 = 0.1;
    /// Rider height above the road
    pub const PLAYER_Y: f32 = 0.1;

    /// World scroll speed at session start
    pub const BASE_SPEED: f32 = 0.1;
    /// Speed gained per target hit
    pub const SPEED_INCREMENT: f32 = 0.005;

    /// Projectile travel per frame (toward -z)
    pub const PROJECTILE_SPEED: f32 = 0.5;
    /// Projectiles leave the rider this far behind its z
    pub const MUZZLE_OFFSET: f32 = 0.5;
    /// Projectiles past this z are retired as misses
    pub const PROJECTILE_FAR_Z: f32 = -50.0;

    /// Per-category multipliers applied to the world speed
    pub const TARGET_SPEED_MULTIPLIER: f32 = 2.5;
    pub const PENALTY_SPEED_MULTIPLIER: f32 = 3.5;
    pub const TREE_SPEED_MULTIPLIER: f32 = 3.5;
    pub const BUILDING_SPEED_MULTIPLIER: f32 = 1.0;

    /// Spawn gating (milliseconds)
    pub const TARGET_SPAWN_INTERVAL_MS: f64 = 2000.0;
    pub const PENALTY_SPAWN_INTERVAL_MS: f64 = 4000.0;
    /// Targets and penalty targets appear at this depth
    pub const SPAWN_Z: f32 = -30.0;
    pub const TARGET_Y: f32 = 0.2;

    /// Projectile-to-target distance that counts as a hit
    pub const HIT_RADIUS: f32 = 0.5;
    /// Half-depth of the band around the rider where penalty targets collide
    pub const PENALTY_BAND: f32 = 0.5;
    /// Lateral distance under which a penalty target in the band hits the rider
    pub const PENALTY_LATERAL_THRESHOLD: f32 = 0.5;
    /// Targets this far past the rider are retired
    pub const PASS_MARGIN: f32 = 2.0;

    /// Duration of the disappearance fade on a hit target
    pub const HIT_FADE_MS: f64 = 200.0;

    /// Game-over thresholds
    pub const MAX_PENALTIES: u32 = 5;
    pub const MAX_LOSSES: u32 = 10;

    /// Roadside scenery
    pub const TREE_COUNT: u32 = 50;
    pub const TREE_SPACING: f32 = 5.0;
    pub const ROAD_TREE_WIDTH: f32 = 2.6;
    pub const BUILDING_COUNT: u32 = 30;
    pub const BUILDING_SPACING: f32 = 5.0;
    /// Scenery past this z loops back to the far end
    pub const DECOR_WRAP_Z: f32 = 20.0;
    pub const TREE_RESET_Z: f32 = -100.0;
}
