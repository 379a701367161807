//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One tick per frame
//! - Seeded RNG only
//! - Stable iteration order (by kind, then pool slot)
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod collision;
pub mod kind;
pub mod lane;
pub mod physics;
pub mod spawn;
pub mod state;
pub mod tick;

pub use kind::{BoostKind, Effect, EntityKind, KindSpec, KindTable};
pub use lane::{Lane, Shift};
pub use state::{
    Chaser, Entity, FinishLine, GameEvent, GamePhase, GameState, JumpState, Lateral, Outcome,
    Payload, Player, Pool, RunSummary,
};
pub use tick::{TickInput, tick};
