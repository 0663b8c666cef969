//! Sky Dash - a tilt-controlled endless runner
//!
//! Core modules:
//! - `sim`: Deterministic simulation (progression, spawning, collisions, session lifecycle)
//! - `tuning`: Data-driven game balance
//!
//! Rendering, audio and sensor-permission plumbing live outside this crate:
//! the simulation hands out read-only snapshots, fires [`sim::SessionHooks`]
//! callbacks at collision boundaries, and never touches platform APIs itself.

pub mod sim;
pub mod tuning;

pub use sim::{InputSample, Session, SessionHooks, SessionPhase, Snapshot};
pub use tuning::{Tuning, TuningError};

/// Game configuration constants
pub mod consts {
    /// Nominal frame interval the per-tick velocities are tuned for (60 Hz)
    pub const NOMINAL_TICK_DT: f32 = 1.0 / 60.0;
    /// Default seed for the demo driver
    pub const DEFAULT_SEED: u64 = 42;
}
