//! Game settings and tuning
//!
//! Every gameplay constant can be overridden from a partial JSON object
//! layered over a difficulty preset.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Errors raised while loading settings
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Malformed JSON or a field of the wrong type
    #[error("failed to parse settings: {0}")]
    Parse(#[from] serde_json::Error),

    /// Settings file could not be read
    #[error("failed to read settings: {0}")]
    Io(#[from] std::io::Error),

    /// A value parsed but is outside its allowed range
    #[error("invalid setting `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

/// Difficulty presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Difficulty {
    Casual,
    #[default]
    Normal,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Casual => "Casual",
            Difficulty::Normal => "Normal",
            Difficulty::Hard => "Hard",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "casual" | "easy" => Some(Difficulty::Casual),
            "normal" => Some(Difficulty::Normal),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }
}

/// Tunable gameplay constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    // === Rider ===
    /// Road half-width (lane boundary)
    pub road_width: f32,
    /// Lateral distance per frame while steering
    pub lateral_speed: f32,

    // === World speed ===
    pub base_speed: f32,
    /// Added to the world speed on every hit
    pub speed_increment: f32,
    pub target_speed_multiplier: f32,
    pub penalty_speed_multiplier: f32,
    pub tree_speed_multiplier: f32,
    pub building_speed_multiplier: f32,

    // === Projectiles ===
    pub projectile_speed: f32,
    pub projectile_far_z: f32,

    // === Spawning ===
    pub target_spawn_interval_ms: f64,
    pub penalty_spawn_interval_ms: f64,
    pub spawn_z: f32,

    // === Collisions ===
    pub hit_radius: f32,
    pub penalty_band: f32,
    pub penalty_lateral_threshold: f32,
    /// How far past the rider a target travels before it is retired
    pub pass_margin: f32,

    // === Timed removal ===
    /// Fade duration of a hit target before it leaves the registry
    pub hit_fade_ms: f64,
    /// Penalty targets vanish this long after spawning (None = never)
    pub penalty_lifetime_ms: Option<f64>,

    // === Game over ===
    pub max_penalties: u32,
    pub max_losses: u32,

    // === Scenery ===
    pub tree_count: u32,
    pub tree_spacing: f32,
    pub road_tree_width: f32,
    pub building_count: u32,
    pub building_spacing: f32,
    pub decor_wrap_z: f32,
    pub tree_reset_z: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            road_width: ROAD_WIDTH,
            lateral_speed: LATERAL_SPEED,

            base_speed: BASE_SPEED,
            speed_increment: SPEED_INCREMENT,
            target_speed_multiplier: TARGET_SPEED_MULTIPLIER,
            penalty_speed_multiplier: PENALTY_SPEED_MULTIPLIER,
            tree_speed_multiplier: TREE_SPEED_MULTIPLIER,
            building_speed_multiplier: BUILDING_SPEED_MULTIPLIER,

            projectile_speed: PROJECTILE_SPEED,
            projectile_far_z: PROJECTILE_FAR_Z,

            target_spawn_interval_ms: TARGET_SPAWN_INTERVAL_MS,
            penalty_spawn_interval_ms: PENALTY_SPAWN_INTERVAL_MS,
            spawn_z: SPAWN_Z,

            hit_radius: HIT_RADIUS,
            penalty_band: PENALTY_BAND,
            penalty_lateral_threshold: PENALTY_LATERAL_THRESHOLD,
            pass_margin: PASS_MARGIN,

            hit_fade_ms: HIT_FADE_MS,
            penalty_lifetime_ms: None,

            max_penalties: MAX_PENALTIES,
            max_losses: MAX_LOSSES,

            tree_count: TREE_COUNT,
            tree_spacing: TREE_SPACING,
            road_tree_width: ROAD_TREE_WIDTH,
            building_count: BUILDING_COUNT,
            building_spacing: BUILDING_SPACING,
            decor_wrap_z: DECOR_WRAP_Z,
            tree_reset_z: TREE_RESET_Z,
        }
    }
}

impl Settings {
    /// Create settings from a difficulty preset
    pub fn from_preset(difficulty: Difficulty) -> Self {
        let mut settings = Self::default();
        match difficulty {
            Difficulty::Casual => {
                settings.max_losses = 15;
                settings.target_spawn_interval_ms = 2500.0;
                settings.penalty_spawn_interval_ms = 5000.0;
                settings.speed_increment = 0.003;
            }
            Difficulty::Normal => {}
            Difficulty::Hard => {
                settings.max_losses = 5;
                settings.max_penalties = 3;
                settings.target_spawn_interval_ms = 1500.0;
                settings.penalty_spawn_interval_ms = 3000.0;
                settings.speed_increment = 0.008;
            }
        }
        settings
    }

    /// Parse a partial JSON object over the default settings
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Self::default().with_overrides(json)
    }

    /// Parse a partial JSON object over these settings.
    ///
    /// Keys absent from `json` keep their current value; unknown keys are
    /// rejected.
    pub fn with_overrides(&self, json: &str) -> Result<Self, ConfigError> {
        let overrides: serde_json::Value = serde_json::from_str(json)?;
        let serde_json::Value::Object(overrides) = overrides else {
            return Err(ConfigError::Invalid {
                field: "<root>",
                reason: "expected a JSON object",
            });
        };

        let mut merged = serde_json::to_value(self)?;
        if let Some(base) = merged.as_object_mut() {
            base.extend(overrides);
        }

        let settings: Settings = serde_json::from_value(merged)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings overrides from a JSON file
    pub fn load_file(path: impl AsRef<std::path::Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
            if value.is_finite() && value > 0.0 {
                Ok(())
            } else {
                Err(ConfigError::Invalid {
                    field,
                    reason: "must be a positive number",
                })
            }
        }

        fn non_negative(field: &'static str, value: f64) -> Result<(), ConfigError> {
            if value.is_finite() && value >= 0.0 {
                Ok(())
            } else {
                Err(ConfigError::Invalid {
                    field,
                    reason: "must be zero or greater",
                })
            }
        }

        positive("road_width", self.road_width)?;
        positive("lateral_speed", self.lateral_speed)?;
        positive("projectile_speed", self.projectile_speed)?;
        positive("hit_radius", self.hit_radius)?;
        positive("penalty_band", self.penalty_band)?;
        positive("penalty_lateral_threshold", self.penalty_lateral_threshold)?;
        positive("tree_spacing", self.tree_spacing)?;
        positive("building_spacing", self.building_spacing)?;

        // Zero speeds are allowed (a frozen world is a valid test rig)
        for (field, value) in [
            ("base_speed", self.base_speed),
            ("speed_increment", self.speed_increment),
            ("target_speed_multiplier", self.target_speed_multiplier),
            ("penalty_speed_multiplier", self.penalty_speed_multiplier),
            ("tree_speed_multiplier", self.tree_speed_multiplier),
            ("building_speed_multiplier", self.building_speed_multiplier),
            ("pass_margin", self.pass_margin),
        ] {
            non_negative(field, value as f64)?;
        }

        non_negative("target_spawn_interval_ms", self.target_spawn_interval_ms)?;
        non_negative("penalty_spawn_interval_ms", self.penalty_spawn_interval_ms)?;
        non_negative("hit_fade_ms", self.hit_fade_ms)?;
        if let Some(lifetime) = self.penalty_lifetime_ms {
            non_negative("penalty_lifetime_ms", lifetime)?;
        }

        if self.projectile_far_z >= 0.0 {
            return Err(ConfigError::Invalid {
                field: "projectile_far_z",
                reason: "must lie ahead of the rider (negative z)",
            });
        }
        if self.spawn_z >= 0.0 {
            return Err(ConfigError::Invalid {
                field: "spawn_z",
                reason: "must lie ahead of the rider (negative z)",
            });
        }
        if self.tree_reset_z >= self.decor_wrap_z {
            return Err(ConfigError::Invalid {
                field: "tree_reset_z",
                reason: "must be behind decor_wrap_z",
            });
        }
        if self.max_penalties == 0 {
            return Err(ConfigError::Invalid {
                field: "max_penalties",
                reason: "must be at least 1",
            });
        }
        if self.max_losses == 0 {
            return Err(ConfigError::Invalid {
                field: "max_losses",
                reason: "must be at least 1",
            });
        }

        Ok(())
    }
}
