//! Session lifecycle and the per-tick update order
//!
//! The session machine owns the authoritative frame sequence: progression,
//! then input, then spawning, then entity integration and collision
//! resolution. Collision handling must see the freshly placed player and the
//! current frame's moved entities, so the order is fixed.
//!
//! Audio/UI collaborators attach through [`SessionHooks`]; every hook is a
//! synchronous fire-and-forget call the simulation never waits on.

use serde::{Deserialize, Serialize};

use super::collision::out_of_field;
use super::input::{InputSample, InputSlot, lateral_step};
use super::progression::{clamp_dt, distance_gain};
use super::spawner::{self, SpawnRngs};
use super::state::{Entity, EntityKind, Player, SessionPhase, SessionState};
use crate::tuning::{Tuning, TuningError};

/// Boundary hooks fired synchronously during [`Session::tick`]
///
/// All methods default to no-ops; implement only what the collaborator needs.
/// `session_ended` fires exactly once per run, at the Running -> Ended
/// transition, after the phase flag is already set.
pub trait SessionHooks {
    /// A collectible touched the player
    fn collected(&mut self) {}
    /// A hazard touched the player
    fn hazard_hit(&mut self) {}
    /// The run is over; `final_score` is whole meters traveled
    fn session_ended(&mut self, _final_score: u32) {}
}

/// No-op hooks for headless runs and tests
pub struct NullHooks;

impl SessionHooks for NullHooks {}

/// Read-only per-frame view handed to the presentation layer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    pub phase: SessionPhase,
    /// Meters traveled (monotonic within a run)
    pub distance: f32,
    /// Whole meters, the displayed score
    pub score: u32,
    pub collected: u8,
    /// Current speed multiplier (collectible-count table lookup)
    pub multiplier: f32,
    pub time_ticks: u64,
    pub player: Player,
    /// Live entities for rendering
    pub entities: Vec<Entity>,
}

/// The session state machine: Idle -> Running -> Ended
///
/// Owns the per-run state, the spawn RNG streams, and the input slot. A
/// restart replaces the run state wholesale; nothing survives between runs
/// except the seed and tuning.
pub struct Session {
    tuning: Tuning,
    seed: u64,
    state: SessionState,
    rngs: SpawnRngs,
    input: InputSlot,
}

impl Session {
    /// Create an idle session; call [`Session::start`] to begin a run
    pub fn new(seed: u64, tuning: Tuning) -> Result<Self, TuningError> {
        tuning.validate()?;
        let mut state = SessionState::new(seed, &tuning);
        // No run yet; start() swaps in a fresh Running state
        state.phase = SessionPhase::Idle;
        Ok(Self {
            rngs: SpawnRngs::new(seed),
            input: InputSlot::default(),
            seed,
            state,
            tuning,
        })
    }

    /// Begin a fresh run
    ///
    /// Valid from any phase: a restart request from the Ended screen and the
    /// first start from Idle both land here. State and RNG streams are
    /// rebuilt from the seed; pending input is dropped.
    pub fn start(&mut self) {
        self.state = SessionState::new(self.seed, &self.tuning);
        self.rngs = SpawnRngs::new(self.seed);
        self.input.clear();
        log::info!("session started (seed {})", self.seed);
    }

    /// Ended -> Idle: drop the finished run without starting a new one
    pub fn reset(&mut self) {
        self.state.phase = SessionPhase::Idle;
    }

    /// Change the seed used by the next [`Session::start`]
    pub fn reseed(&mut self, seed: u64) {
        self.seed = seed;
    }

    /// Last-write-wins publication from the sensor/keyboard boundary
    ///
    /// Safe to call at any rate; the tick reads the latest sample only.
    pub fn supply_input(&mut self, sample: InputSample) {
        self.input.publish(sample);
    }

    /// Advance one frame and return the resulting snapshot
    ///
    /// Outside `Running` this is a no-op returning the frozen view, so a
    /// still-scheduled frame callback racing a hazard hit cannot mutate
    /// anything.
    pub fn tick(&mut self, dt: f32, hooks: &mut dyn SessionHooks) -> Snapshot {
        if self.state.phase != SessionPhase::Running {
            return self.snapshot();
        }
        let dt = clamp_dt(dt, self.tuning.max_tick_dt);
        self.state.time_ticks += 1;

        // 1. Progression
        let multiplier = self.tuning.multiplier(self.state.collected);
        self.state.distance += distance_gain(&self.tuning, multiplier, dt);

        // 2. Input
        let step = lateral_step(self.input.latest(), &self.tuning);
        self.state.player.apply_step(step, &self.tuning);

        // 3. Spawning
        spawner::run(&mut self.state, &mut self.rngs, &self.tuning);

        // 4. Integration + collision resolution
        integrate_and_resolve(&mut self.state, &self.tuning, hooks);

        self.snapshot()
    }

    /// Current read-only view
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            phase: self.state.phase,
            distance: self.state.distance,
            score: self.state.score(),
            collected: self.state.collected,
            multiplier: self.tuning.multiplier(self.state.collected),
            time_ticks: self.state.time_ticks,
            player: self.state.player.clone(),
            entities: self.state.entities.clone(),
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

/// Move every live entity, resolve player contact, cull leavers
///
/// A hazard hit marks the session Ended before any hook fires and
/// short-circuits the rest of the pass; entities not yet reached stay where
/// they are.
fn integrate_and_resolve(state: &mut SessionState, tuning: &Tuning, hooks: &mut dyn SessionHooks) {
    let player_rect = state.player.rect();
    let mut i = 0;
    while i < state.entities.len() {
        // A collect mid-pass raises the multiplier for the entities after it
        let multiplier = tuning.multiplier(state.collected);
        let (kind, rect, pos, size) = {
            let entity = &mut state.entities[i];
            entity.pos += entity.vel * multiplier;
            (entity.kind, entity.rect(), entity.pos, entity.size)
        };

        if rect.overlaps(&player_rect) {
            match kind {
                EntityKind::Collectible => {
                    if state.collected < tuning.collectible_cap() {
                        state.collected += 1;
                        log::debug!("collected {} -> multiplier {}", state.collected, tuning.multiplier(state.collected));
                    }
                    // The signal fires even at cap; only the count is capped
                    hooks.collected();
                    state.entities.remove(i);
                    continue;
                }
                EntityKind::GroundHazard | EntityKind::FlockHazard => {
                    state.entities.remove(i);
                    state.phase = SessionPhase::Ended;
                    let final_score = state.score();
                    state.final_score = Some(final_score);
                    log::info!("session ended at {final_score}m");
                    hooks.hazard_hit();
                    hooks.session_ended(final_score);
                    return;
                }
                EntityKind::Cloud => {}
            }
        }

        if out_of_field(pos, size, tuning) {
            state.entities.remove(i);
        } else {
            i += 1;
        }
    }
}
