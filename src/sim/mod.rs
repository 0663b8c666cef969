//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only, one stream per spawn process
//! - Stable entity order (insertion order, ascending ids)
//! - No rendering, audio, or platform dependencies
//!
//! The surrounding layer drives [`Session::tick`] once per display refresh,
//! feeds sensor samples through [`Session::supply_input`], and reacts to
//! [`SessionHooks`] callbacks.

pub mod collision;
pub mod input;
pub mod progression;
pub mod session;
pub mod spawner;
pub mod state;

pub use collision::Rect;
pub use input::{InputSample, InputSlot, KeyAxis, TiltSample, lateral_step};
pub use session::{NullHooks, Session, SessionHooks, Snapshot};
pub use spawner::SpawnRngs;
pub use state::{Entity, EntityKind, Player, SessionPhase, SessionState, SpriteId};
