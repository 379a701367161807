//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Input events (key codes to logical inputs, edge sampling)

pub mod input;

pub use input::{InputState, LogicalInput};
