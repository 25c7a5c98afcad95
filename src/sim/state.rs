//! Game state and entity registries
//!
//! `GameState` is the single session object: it owns every registry,
//! counter and spawn timer. Systems receive it by `&mut` and nothing else
//! holds gameplay state.

use std::fmt;

use glam::Vec3;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::Serialize;

use crate::consts::{MUZZLE_OFFSET, PLAYER_Y};
use crate::settings::Settings;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum GamePhase {
    /// Pipeline runs every tick
    Playing,
    /// Terminal until restart; all gameplay mutations are ignored
    GameOver,
}

/// Gameplay events, drained by the presentation layer each frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum GameEvent {
    TargetSpawned { id: u32 },
    PenaltySpawned { id: u32 },
    ProjectileFired { id: u32 },
    /// Start the disappearance fade on `target_id`
    TargetHit { target_id: u32, projectile_id: u32 },
    TargetLost { id: u32 },
    ProjectileMissed { id: u32 },
    PenaltyTaken { id: u32 },
    GameOver { score: i64 },
    Restarted,
}

/// Events kept when nobody drains the queue
pub const MAX_PENDING_EVENTS: usize = 256;

/// The rider
#[derive(Debug, Clone, Serialize)]
pub struct Player {
    pub pos: Vec3,
    /// Cached steering direction (-1, 0 or 1), updated by input edges
    pub direction: f32,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            pos: Vec3::new(0.0, PLAYER_Y, 0.0),
            direction: 0.0,
        }
    }
}

impl Player {
    /// Apply one frame of steering and clamp to the lane boundary
    pub fn steer(&mut self, lateral_speed: f32, road_width: f32) {
        self.pos.x = (self.pos.x + self.direction * lateral_speed).clamp(-road_width, road_width);
    }
}

/// A fired projectile
#[derive(Debug, Clone, Serialize)]
pub struct Projectile {
    pub id: u32,
    pub pos: Vec3,
}

/// Cosmetic target variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TargetShape {
    Box,
    Sphere,
    Diamond,
}

impl TargetShape {
    pub const ALL: [TargetShape; 3] = [TargetShape::Box, TargetShape::Sphere, TargetShape::Diamond];
}

/// A scorable target
#[derive(Debug, Clone, Serialize)]
pub struct Target {
    pub id: u32,
    pub pos: Vec3,
    pub shape: TargetShape,
    /// Timestamp of the hit; once set it is never cleared
    hit_at: Option<f64>,
}

impl Target {
    pub fn new(id: u32, pos: Vec3, shape: TargetShape) -> Self {
        Self {
            id,
            pos,
            shape,
            hit_at: None,
        }
    }

    #[inline]
    pub fn is_hit(&self) -> bool {
        self.hit_at.is_some()
    }

    pub fn hit_at(&self) -> Option<f64> {
        self.hit_at
    }

    /// Mark the target hit. Returns false if it already was.
    pub fn mark_hit(&mut self, now: f64) -> bool {
        if self.hit_at.is_some() {
            return false;
        }
        self.hit_at = Some(now);
        true
    }

    /// Whether the hit fade has finished
    pub fn fade_finished(&self, now: f64, fade_ms: f64) -> bool {
        self.hit_at.is_some_and(|at| now - at >= fade_ms)
    }
}

/// A target the rider must avoid
#[derive(Debug, Clone, Serialize)]
pub struct PenaltyTarget {
    pub id: u32,
    pub pos: Vec3,
    /// Silent removal time, if penalty targets have a lifetime
    pub expires_at: Option<f64>,
}

impl PenaltyTarget {
    pub fn is_expired(&self, now: f64) -> bool {
        self.expires_at.is_some_and(|at| now >= at)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TreeKind {
    Oak,
    Pine,
}

/// Roadside scenery kinds
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum DecorKind {
    Tree(TreeKind),
    Building { size: Vec3 },
}

/// Scrolling scenery; no collisions
#[derive(Debug, Clone, Serialize)]
pub struct Decoration {
    pub id: u32,
    pub kind: DecorKind,
    pub pos: Vec3,
    /// Where the decoration reappears after passing the wrap threshold
    pub reset_z: f32,
}

/// Counters and status for the external scoreboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Scoreboard {
    pub hits: u32,
    pub misses: u32,
    pub losses: u32,
    pub penalties: u32,
    pub is_playing: bool,
    pub score: i64,
}

impl fmt::Display for Scoreboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_playing {
            write!(
                f,
                "Hits: {} | Misses: {} | Losses: {} | Penalties: {}",
                self.hits, self.misses, self.losses, self.penalties
            )
        } else {
            write!(f, "GAME OVER | Hits: {} | Final Score: {}", self.hits, self.score)
        }
    }
}

/// Penalties weigh double against hits
pub fn derived_score(hits: u32, penalties: u32) -> i64 {
    i64::from(hits) - i64::from(penalties) * 2
}

/// Complete session state
#[derive(Debug, Clone, Serialize)]
pub struct GameState {
    /// Session seed for reproducibility
    pub seed: u64,
    #[serde(skip)]
    pub(crate) rng: Pcg32,
    pub settings: Settings,
    pub phase: GamePhase,

    pub hits: u32,
    pub misses: u32,
    pub losses: u32,
    pub penalties: u32,
    /// World scroll speed; grows with every hit
    pub speed: f32,

    pub last_target_spawn: f64,
    pub last_penalty_spawn: f64,
    /// Ticks executed while playing
    pub frame: u64,
    /// Timestamp of the latest tick
    pub now: f64,

    pub player: Player,
    /// Registries, in ascending id order
    pub projectiles: Vec<Projectile>,
    pub targets: Vec<Target>,
    pub penalty_targets: Vec<PenaltyTarget>,
    pub decorations: Vec<Decoration>,

    #[serde(skip)]
    events: Vec<GameEvent>,
    next_id: u32,
}

impl GameState {
    /// Create a new session with the given settings and seed
    pub fn new(settings: Settings, seed: u64) -> Self {
        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            speed: settings.base_speed,
            settings,
            phase: GamePhase::Playing,
            hits: 0,
            misses: 0,
            losses: 0,
            penalties: 0,
            last_target_spawn: 0.0,
            last_penalty_spawn: 0.0,
            frame: 0,
            now: 0.0,
            player: Player::default(),
            projectiles: Vec::new(),
            targets: Vec::new(),
            penalty_targets: Vec::new(),
            decorations: Vec::new(),
            events: Vec::new(),
            next_id: 1,
        };

        super::spawn::populate_roadside(&mut state);
        log::info!("Session started with seed {}", seed);
        state
    }

    /// Reset everything and resume play. Only honored after game over.
    ///
    /// Spawn timers restart from `now`. Returns whether the restart happened.
    pub fn restart(&mut self, now: f64) -> bool {
        if self.phase != GamePhase::GameOver {
            return false;
        }

        let seed = self.seed.wrapping_add(1);
        let settings = self.settings.clone();
        *self = Self::new(settings, seed);
        self.last_target_spawn = now;
        self.last_penalty_spawn = now;
        self.now = now;
        self.push_event(GameEvent::Restarted);
        log::info!("Session restarted");
        true
    }

    #[inline]
    pub fn is_playing(&self) -> bool {
        self.phase == GamePhase::Playing
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Current derived score
    pub fn score(&self) -> i64 {
        derived_score(self.hits, self.penalties)
    }

    pub fn scoreboard(&self) -> Scoreboard {
        Scoreboard {
            hits: self.hits,
            misses: self.misses,
            losses: self.losses,
            penalties: self.penalties,
            is_playing: self.is_playing(),
            score: self.score(),
        }
    }

    /// Targets that can still be hit
    pub fn live_targets(&self) -> impl Iterator<Item = &Target> {
        self.targets.iter().filter(|t| !t.is_hit())
    }

    /// Fire a projectile from the rider. Ignored after game over.
    pub fn fire(&mut self) -> Option<u32> {
        if !self.is_playing() {
            return None;
        }
        let id = self.next_entity_id();
        let pos = self.player.pos + Vec3::new(0.0, 0.0, MUZZLE_OFFSET);
        self.projectiles.push(Projectile { id, pos });
        self.push_event(GameEvent::ProjectileFired { id });
        Some(id)
    }

    /// Insert a target at an explicit position
    pub fn place_target(&mut self, pos: Vec3, shape: TargetShape) -> Option<u32> {
        if !self.is_playing() {
            return None;
        }
        let id = self.next_entity_id();
        self.targets.push(Target::new(id, pos, shape));
        self.push_event(GameEvent::TargetSpawned { id });
        Some(id)
    }

    /// Insert a penalty target at an explicit position
    pub fn place_penalty_target(&mut self, pos: Vec3) -> Option<u32> {
        if !self.is_playing() {
            return None;
        }
        let id = self.next_entity_id();
        let expires_at = self.settings.penalty_lifetime_ms.map(|ttl| self.now + ttl);
        self.penalty_targets.push(PenaltyTarget { id, pos, expires_at });
        self.push_event(GameEvent::PenaltySpawned { id });
        Some(id)
    }

    /// Remove a target by id; a second removal is a no-op
    pub fn remove_target(&mut self, id: u32) -> Option<Target> {
        let idx = self.targets.iter().position(|t| t.id == id)?;
        Some(self.targets.remove(idx))
    }

    pub fn remove_penalty_target(&mut self, id: u32) -> Option<PenaltyTarget> {
        let idx = self.penalty_targets.iter().position(|p| p.id == id)?;
        Some(self.penalty_targets.remove(idx))
    }

    pub fn remove_projectile(&mut self, id: u32) -> Option<Projectile> {
        let idx = self.projectiles.iter().position(|p| p.id == id)?;
        Some(self.projectiles.remove(idx))
    }

    /// Queue an event for the presentation layer
    pub fn push_event(&mut self, event: GameEvent) {
        if self.events.len() >= MAX_PENDING_EVENTS {
            self.events.remove(0);
        }
        self.events.push(event);
    }

    /// Drain queued events
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn pending_events(&self) -> &[GameEvent] {
        &self.events
    }
}
