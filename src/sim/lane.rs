//! Lane model
//!
//! The track has exactly three lanes. Lanes are an enumerated index; the
//! lateral coordinate is only computed when something needs to be drawn.

use rand::Rng;
use serde::{Deserialize, Serialize};

/// One of the three lateral slots
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Lane {
    Left,
    #[default]
    Center,
    Right,
}

/// Direction of a lane change input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shift {
    Left,
    Right,
}

impl Lane {
    pub const ALL: [Lane; 3] = [Lane::Left, Lane::Center, Lane::Right];

    pub fn index(self) -> usize {
        match self {
            Lane::Left => 0,
            Lane::Center => 1,
            Lane::Right => 2,
        }
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Lateral offset of this lane for a given lane spacing
    #[inline]
    pub fn offset(self, spacing: f32) -> f32 {
        match self {
            Lane::Left => -spacing,
            Lane::Center => 0.0,
            Lane::Right => spacing,
        }
    }

    /// Lane after a single left/right step.
    ///
    /// Outer lanes only step back toward the center; a step toward the
    /// extreme already occupied leaves the lane unchanged.
    pub fn shifted(self, shift: Shift) -> Self {
        match (self, shift) {
            (Lane::Center, Shift::Left) => Lane::Left,
            (Lane::Center, Shift::Right) => Lane::Right,
            (Lane::Left, Shift::Right) | (Lane::Right, Shift::Left) => Lane::Center,
            (lane, _) => lane,
        }
    }

    /// Uniformly random lane
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::ALL[rng.random_range(0..Self::ALL.len())]
    }

    /// Lanes directly reachable with one input edge
    pub fn neighbors(self) -> &'static [Lane] {
        match self {
            Lane::Left => &[Lane::Center],
            Lane::Center => &[Lane::Left, Lane::Right],
            Lane::Right => &[Lane::Center],
        }
    }
}
