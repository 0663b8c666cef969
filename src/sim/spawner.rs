//! Procedural entity spawning
//!
//! Three independent generative processes run every tick: decorative clouds
//! (per-tick probability roll), hazards (distance-gated, with a difficulty
//! ramp), and collectibles (distance-gated). Each process owns its own PCG
//! stream seeded from the session seed, so the draw order and count of one
//! process never perturbs another and a fixed seed replays the exact same
//! spawn sequence.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use super::state::{Entity, EntityKind, SessionState, SpriteId};
use crate::tuning::Tuning;

/// Fraction of the field height (from the top) flocks may enter at
const FLOCK_BAND: f32 = 0.6;

// PCG stream selectors, one per generative process
const DECORATION_STREAM: u64 = 0xdec0;
const HAZARD_STREAM: u64 = 0x4a5a;
const COLLECTIBLE_STREAM: u64 = 0xc011;

/// Per-process RNG streams for a run
#[derive(Debug, Clone)]
pub struct SpawnRngs {
    decoration: Pcg32,
    hazard: Pcg32,
    collectible: Pcg32,
}

impl SpawnRngs {
    /// Derive all three streams from the session seed
    pub fn new(seed: u64) -> Self {
        Self {
            decoration: Pcg32::new(seed, DECORATION_STREAM),
            hazard: Pcg32::new(seed, HAZARD_STREAM),
            collectible: Pcg32::new(seed, COLLECTIBLE_STREAM),
        }
    }
}

/// Run all spawn processes for the current tick
pub fn run(state: &mut SessionState, rngs: &mut SpawnRngs, tuning: &Tuning) {
    advance_hazard_ramp(state, tuning);
    roll_decoration(state, &mut rngs.decoration, tuning);
    roll_hazard(state, &mut rngs.hazard, tuning);
    roll_collectible(state, &mut rngs.collectible, tuning);
}

/// Raise `hazard_chance` once per ramp bucket of absolute distance crossed
///
/// Recomputed from absolute distance so a delta spike can neither skip a
/// bucket nor apply one twice; the chance is non-decreasing and capped.
fn advance_hazard_ramp(state: &mut SessionState, tuning: &Tuning) {
    let bucket = (state.distance / tuning.ramp_interval) as u32;
    while state.ramp_buckets < bucket {
        state.ramp_buckets += 1;
        state.hazard_chance =
            (state.hazard_chance + tuning.ramp_increment).min(tuning.max_hazard_chance);
    }
}

fn roll_decoration(state: &mut SessionState, rng: &mut Pcg32, tuning: &Tuning) {
    if rng.random::<f32>() >= tuning.cloud_chance {
        return;
    }
    if state.cloud_count() >= tuning.max_clouds {
        return;
    }

    let x = rng.random::<f32>() * tuning.field_width;
    let width = tuning.object_size * (rng.random::<f32>() * 1.5 + 1.0);
    let height = tuning.object_size * (rng.random::<f32>() * 1.5 + 1.0);
    let vy = tuning.cloud_speed * (rng.random::<f32>() * 0.5 + 0.75);
    let sprite = if rng.random::<f32>() < 0.5 {
        SpriteId::CloudA
    } else {
        SpriteId::CloudB
    };

    let id = state.next_entity_id();
    state.entities.push(Entity {
        id,
        kind: EntityKind::Cloud,
        pos: Vec2::new(x, -tuning.object_size),
        size: Vec2::new(width, height),
        vel: Vec2::new(0.0, vy),
        sprite,
    });
}

fn roll_hazard(state: &mut SessionState, rng: &mut Pcg32, tuning: &Tuning) {
    if state.distance - state.last_hazard_check <= tuning.hazard_interval {
        return;
    }
    state.last_hazard_check = state.distance;

    if rng.random::<f32>() >= state.hazard_chance {
        return;
    }

    if rng.random::<f32>() < 0.5 {
        spawn_ground_hazard(state, rng, tuning);
    } else {
        spawn_flock(state, rng, tuning);
    }
}

fn spawn_ground_hazard(state: &mut SessionState, rng: &mut Pcg32, tuning: &Tuning) {
    let x = rng.random::<f32>() * (tuning.field_width - tuning.object_size);
    let id = state.next_entity_id();
    log::debug!("ground hazard #{id} at x={x:.0}");
    state.entities.push(Entity {
        id,
        kind: EntityKind::GroundHazard,
        pos: Vec2::new(x, -tuning.object_size),
        size: Vec2::splat(tuning.object_size),
        vel: Vec2::new(0.0, tuning.ground_hazard_speed),
        sprite: SpriteId::GroundHazard,
    });
}

/// Spawn an odd-count formation entering from a random screen edge
///
/// Members trail the leader outside the field, evenly spaced, all sharing one
/// horizontal velocity away from the entry edge.
fn spawn_flock(state: &mut SessionState, rng: &mut Pcg32, tuning: &Tuning) {
    let from_left = rng.random::<f32>() < 0.5;
    let y = rng.random::<f32>() * (tuning.field_height * FLOCK_BAND);

    let (start_x, vx, sprite) = if from_left {
        (-tuning.object_size, tuning.flock_speed, SpriteId::FlockLeft)
    } else {
        (tuning.field_width, -tuning.flock_speed, SpriteId::FlockRight)
    };
    let spacing = tuning.object_size + tuning.flock_gap;

    log::debug!(
        "flock of {} from the {} at y={y:.0}",
        tuning.flock_size,
        if from_left { "left" } else { "right" }
    );
    for i in 0..tuning.flock_size {
        let trail = i as f32 * spacing;
        let x = if from_left {
            start_x - trail
        } else {
            start_x + trail
        };
        let id = state.next_entity_id();
        state.entities.push(Entity {
            id,
            kind: EntityKind::FlockHazard,
            pos: Vec2::new(x, y),
            size: Vec2::splat(tuning.object_size),
            vel: Vec2::new(vx, 0.0),
            sprite,
        });
    }
}

fn roll_collectible(state: &mut SessionState, rng: &mut Pcg32, tuning: &Tuning) {
    if state.distance - state.last_collectible_check <= tuning.collectible_interval {
        return;
    }
    state.last_collectible_check = state.distance;

    // The roll is drawn even when at cap so the draw count stays stable
    let roll = rng.random::<f32>();
    if roll >= tuning.collectible_chance || state.collected >= tuning.collectible_cap() {
        return;
    }

    let x = rng.random::<f32>() * (tuning.field_width - tuning.object_size);
    let id = state.next_entity_id();
    log::debug!("collectible #{id} at x={x:.0}");
    state.entities.push(Entity {
        id,
        kind: EntityKind::Collectible,
        pos: Vec2::new(x, -tuning.object_size),
        size: Vec2::splat(tuning.object_size),
        vel: Vec2::new(0.0, tuning.ground_hazard_speed),
        sprite: SpriteId::Collectible,
    });
}
