//! Subway Runner - A three-lane endless runner
//!
//! Core modules:
//! - `sim`: Frame-driven simulation (lanes, spawning, physics, collisions, game state)
//! - `render`: Render adapter boundary (draw instances, texture handles)
//! - `platform`: Browser/native platform abstraction (input edges)
//! - `tuning`: Data-driven game balance
//! - `highscores`: Persisted leaderboard

pub mod error;
pub mod highscores;
pub mod platform;
pub mod render;
pub mod sim;
pub mod tuning;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use error::{Error, Result};
pub use highscores::HighScores;
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Simulation step. One tick runs per animation frame; durations in the
    /// tuning table are converted to ticks with this step.
    pub const SIM_DT: f32 = 1.0 / 60.0;

    /// Number of lanes on the track
    pub const LANE_COUNT: usize = 3;

    /// Default seed for runs that do not supply one
    pub const DEFAULT_SEED: u64 = 0x5eed_5b7a_7000_0001;
}

/// Convert a duration in seconds to a whole number of simulation ticks
#[inline]
pub fn secs_to_ticks(secs: f32) -> u32 {
    (secs / consts::SIM_DT).round().max(0.0) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_secs_to_ticks() {
        assert_eq!(secs_to_ticks(0.0), 0);
        assert_eq!(secs_to_ticks(1.0), 60);
        assert_eq!(secs_to_ticks(7.0), 420);
        assert_eq!(secs_to_ticks(-3.0), 0);
    }
}
