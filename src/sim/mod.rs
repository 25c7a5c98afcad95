//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One tick per rendered frame
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod collision;
pub mod input;
pub mod motion;
pub mod spawn;
pub mod state;
pub mod tick;

pub use autopilot::autopilot;
pub use collision::{penalty_hits_player, projectile_hits_target};
pub use input::{Control, InputEvent, apply_input};
pub use state::{
    DecorKind, Decoration, GameEvent, GamePhase, GameState, PenaltyTarget, Player, Projectile,
    Scoreboard, Target, TargetShape, TreeKind, derived_score,
};
pub use tick::{game_over_reached, tick};
