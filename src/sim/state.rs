//! Session state and core simulation types
//!
//! Everything a run needs for determinism lives here; a restart replaces the
//! whole [`SessionState`] rather than resetting fields piecemeal.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use crate::tuning::Tuning;

/// Lifecycle phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionPhase {
    /// No active run
    Idle,
    /// Update loop active
    Running,
    /// Run finished; score frozen
    Ended,
}

/// What an entity does on contact with the player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntityKind {
    /// Decorative, no collision effect
    Cloud,
    /// Falls straight down; ends the run on contact
    GroundHazard,
    /// Crosses horizontally in formation; ends the run on contact
    FlockHazard,
    /// Removed and beneficial on contact
    Collectible,
}

/// Opaque rendering handle
///
/// The simulation only picks one at spawn time; what it maps to (image,
/// animation, tint) is entirely the render provider's business.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpriteId {
    CloudA,
    CloudB,
    GroundHazard,
    FlockLeft,
    FlockRight,
    Collectible,
}

/// A spawned game object
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entity {
    /// Unique ascending id, never reused within a run
    pub id: u32,
    pub kind: EntityKind,
    /// Top-left corner in field coordinates
    pub pos: Vec2,
    pub size: Vec2,
    /// Displacement per tick at the nominal frame rate (scaled by the speed multiplier)
    pub vel: Vec2,
    pub sprite: SpriteId,
}

impl Entity {
    /// Bounding rectangle for collision tests
    #[inline]
    pub fn rect(&self) -> Rect {
        Rect::new(self.pos, self.size)
    }
}

/// The player sprite
///
/// Only the lateral position ever changes; the vertical position and size are
/// fixed by tuning.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Player {
    /// Spawn centered at the tuned vertical position
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            x: tuning.field_width / 2.0 - tuning.player_width / 2.0,
            y: tuning.player_y,
            width: tuning.player_width,
            height: tuning.player_height,
        }
    }

    /// Apply a lateral step and clamp to the field bounds
    ///
    /// Clamping is idempotent; `Tuning::validate` guarantees min <= max.
    pub fn apply_step(&mut self, dx: f32, tuning: &Tuning) {
        self.x = (self.x + dx).clamp(tuning.player_min_x(), tuning.player_max_x());
    }

    /// Bounding rectangle for collision tests
    #[inline]
    pub fn rect(&self) -> Rect {
        Rect::new(Vec2::new(self.x, self.y), Vec2::new(self.width, self.height))
    }
}

/// Complete per-run state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Current lifecycle phase
    pub phase: SessionPhase,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Distance traveled in meters (monotonic)
    pub distance: f32,
    /// Collectibles gathered this run; also the speed multiplier table index
    pub collected: u8,
    /// Distance at the last hazard spawn check
    pub last_hazard_check: f32,
    /// Distance at the last collectible spawn check
    pub last_collectible_check: f32,
    /// Current hazard spawn probability (non-decreasing, capped)
    pub hazard_chance: f32,
    /// Ramp buckets already applied to `hazard_chance`
    pub ramp_buckets: u32,
    /// Final score, set exactly once at the Running -> Ended transition
    pub final_score: Option<u32>,
    /// Player sprite
    pub player: Player,
    /// Live entities (insertion order; ids ascend)
    pub entities: Vec<Entity>,
    /// Next entity id
    next_id: u32,
}

impl SessionState {
    /// Fresh state for a new run
    pub fn new(seed: u64, tuning: &Tuning) -> Self {
        Self {
            seed,
            phase: SessionPhase::Running,
            time_ticks: 0,
            distance: 0.0,
            collected: 0,
            last_hazard_check: 0.0,
            last_collectible_check: 0.0,
            hazard_chance: tuning.initial_hazard_chance,
            ramp_buckets: 0,
            final_score: None,
            player: Player::new(tuning),
            entities: Vec::new(),
            next_id: 1,
        }
    }

    /// Allocate a new entity id
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Score shown to the player: whole meters traveled
    #[inline]
    pub fn score(&self) -> u32 {
        self.distance as u32
    }

    /// Number of live decorative clouds
    pub fn cloud_count(&self) -> usize {
        self.entities
            .iter()
            .filter(|e| e.kind == EntityKind::Cloud)
            .count()
    }
}
