//! Data-driven game balance
//!
//! Defaults reproduce the original game feel at one tick per frame. Any
//! subset of fields can be overridden from JSON; the result is validated
//! before a run starts.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::sim::kind::{EntityKind, KindTable, LateralRule, Restart, SpawnRule};

/// Chaser behaviour
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChaserTuning {
    /// Distance behind the player at the start of a run
    pub start_gap: f32,
    /// The chaser never drops further back than this while holding
    pub max_gap: f32,
    /// Depth change per tick, both when closing and when dropping back
    pub speed: f32,
    pub half_extent: f32,
}

impl Default for ChaserTuning {
    fn default() -> Self {
        Self {
            start_gap: 1.0,
            max_gap: 4.0,
            speed: 0.005,
            half_extent: 0.15,
        }
    }
}

/// Finish line placement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FinishTuning {
    /// Coins needed before the finish line appears
    pub score: u32,
    /// Depth the finish line spawns at
    pub depth: f32,
    pub half_depth: f32,
    /// Banner height (visual only)
    pub height: f32,
}

impl Default for FinishTuning {
    fn default() -> Self {
        Self {
            score: 100,
            depth: -45.0,
            half_depth: 0.1,
            height: 1.5,
        }
    }
}

/// Complete balance table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Track ===
    /// Lateral distance between adjacent lanes
    pub lane_spacing: f32,
    /// Fixed depth of the player
    pub player_depth: f32,
    /// Half-extent of the player box on every axis
    pub player_half_extent: f32,

    // === Jumping ===
    pub ground_height: f32,
    pub jump_apex: f32,
    /// Apex while a jump or fly boost runs
    pub boosted_apex: f32,
    /// Upward velocity at the start of a jump
    pub rise_speed: f32,
    pub rise_decel: f32,
    /// Rising never slows below this
    pub min_rise_speed: f32,
    pub fall_accel: f32,
    /// Depth window around an obstacle in which the player cannot drop
    pub obstacle_window: f32,

    // === World speed ===
    pub world_speed: f32,
    pub min_world_speed: f32,
    pub wall_speed: f32,
    pub min_wall_speed: f32,
    pub barrier_speed_penalty: f32,
    pub barrier_wall_penalty: f32,

    // === Timers (seconds) ===
    pub penalty_secs: f32,
    pub jump_boost_secs: f32,
    pub fly_boost_secs: f32,

    /// Range of the random wall height scale
    pub wall_height_range: (f32, f32),

    pub chaser: ChaserTuning,
    pub finish: FinishTuning,
    pub kinds: KindTable,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            lane_spacing: 1.05,
            player_depth: -3.15,
            player_half_extent: 0.15,

            ground_height: -0.70,
            jump_apex: -0.15,
            boosted_apex: 0.05,
            rise_speed: 0.1,
            rise_decel: 0.005,
            min_rise_speed: 0.001,
            fall_accel: 0.008,
            obstacle_window: 1.55,

            world_speed: 0.075,
            min_world_speed: 0.03,
            wall_speed: 0.2,
            min_wall_speed: 0.05,
            barrier_speed_penalty: 0.001,
            barrier_wall_penalty: 0.01,

            penalty_secs: 7.0,
            jump_boost_secs: 5.0,
            fly_boost_secs: 10.0,

            wall_height_range: (0.2, 0.8),

            chaser: ChaserTuning::default(),
            finish: FinishTuning::default(),
            kinds: KindTable::default(),
        }
    }
}

impl Tuning {
    /// Parse and validate a tuning table from JSON
    pub fn from_json(json: &str) -> Result<Self> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load and validate a tuning table from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let tuning = Self::from_json(&json)?;
        log::info!("Loaded tuning from {}", path.as_ref().display());
        Ok(tuning)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check that the table describes a playable, self-consistent run
    pub fn validate(&self) -> Result<()> {
        fn invalid(msg: impl Into<String>) -> Result<()> {
            Err(Error::InvalidTuning(msg.into()))
        }

        if self.lane_spacing <= 0.0 {
            return invalid("lane_spacing must be positive");
        }
        if self.jump_apex <= self.ground_height {
            return invalid("jump_apex must be above ground_height");
        }
        if self.boosted_apex < self.jump_apex {
            return invalid("boosted_apex must not be below jump_apex");
        }
        if self.rise_speed <= 0.0 || self.min_rise_speed <= 0.0 || self.fall_accel <= 0.0 {
            return invalid("rise_speed, min_rise_speed and fall_accel must be positive");
        }
        if self.min_world_speed <= 0.0 || self.world_speed < self.min_world_speed {
            return invalid("world_speed must be at least min_world_speed > 0");
        }
        if self.min_wall_speed <= 0.0 || self.wall_speed < self.min_wall_speed {
            return invalid("wall_speed must be at least min_wall_speed > 0");
        }
        if self.penalty_secs < 0.0 || self.jump_boost_secs < 0.0 || self.fly_boost_secs < 0.0 {
            return invalid("timer durations must not be negative");
        }
        let (lo, hi) = self.wall_height_range;
        if !(lo > 0.0 && lo <= hi) {
            return invalid("wall_height_range must be a positive, ordered range");
        }
        if self.chaser.start_gap <= 0.0 || self.chaser.max_gap < self.chaser.start_gap {
            return invalid("chaser gaps must satisfy 0 < start_gap <= max_gap");
        }

        for kind in EntityKind::ALL {
            let spec = self.kinds.get(kind);
            if spec.kind != kind {
                return invalid(format!("{kind:?} slot holds a {:?} descriptor", spec.kind));
            }
            if spec.cap == 0 {
                return invalid(format!("{kind:?} cap must be positive"));
            }
            if spec.cap % spec.batch() != 0 {
                return invalid(format!("{kind:?} cap must be a multiple of its batch size"));
            }
            if let SpawnRule::Gated { chance } = spec.spawn {
                if !(0.0..=1.0).contains(&chance) {
                    return invalid(format!("{kind:?} spawn chance must be within [0, 1]"));
                }
                if spec.lateral == LateralRule::EveryLane {
                    return invalid(format!("{kind:?} rows must be prewarmed"));
                }
            }
            if matches!(spec.restart, Restart::BehindFurthest { spacing } if spacing <= 0.0)
                || matches!(spec.spacing, Some(spacing) if spacing <= 0.0)
            {
                return invalid(format!("{kind:?} spacing must be positive"));
            }
            if spec.prewarmed() && spec.spacing.is_none() {
                return invalid(format!("{kind:?} is prewarmed and needs a spacing"));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::kind::Effect;

    #[test]
    fn test_default_is_valid() {
        assert!(Tuning::default().validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let tuning = Tuning::from_json(r#"{ "world_speed": 0.1, "finish": { "score": 10 } }"#)
            .unwrap();
        assert_eq!(tuning.world_speed, 0.1);
        assert_eq!(tuning.finish.score, 10);
        assert_eq!(tuning.finish.depth, -45.0);
        assert_eq!(tuning.kinds.obstacle.cap, 5);
    }

    #[test]
    fn test_json_roundtrip() {
        let tuning = Tuning::default();
        let json = tuning.to_json().unwrap();
        assert_eq!(Tuning::from_json(&json).unwrap(), tuning);
    }

    #[test]
    fn test_rejects_apex_below_ground() {
        let tuning = Tuning {
            jump_apex: -1.0,
            ..Default::default()
        };
        assert!(matches!(tuning.validate(), Err(Error::InvalidTuning(_))));
    }

    #[test]
    fn test_rejects_world_speed_below_floor() {
        let tuning = Tuning {
            world_speed: 0.01,
            ..Default::default()
        };
        assert!(tuning.validate().is_err());
    }

    #[test]
    fn test_rejects_misplaced_descriptor() {
        let mut tuning = Tuning::default();
        tuning.kinds.coin = tuning.kinds.barrier.clone();
        assert!(tuning.validate().is_err());
    }

    #[test]
    fn test_rejects_bad_spawn_chance() {
        let mut tuning = Tuning::default();
        tuning.kinds.coin.spawn = SpawnRule::Gated { chance: 1.5 };
        assert!(tuning.validate().is_err());
    }

    #[test]
    fn test_rejects_zero_cap() {
        let mut tuning = Tuning::default();
        tuning.kinds.obstacle.cap = 0;
        assert!(tuning.validate().is_err());
    }

    #[test]
    fn test_malformed_json_is_json_error() {
        assert!(matches!(Tuning::from_json("{ nope"), Err(Error::Json(_))));
    }

    #[test]
    fn test_effects_by_kind() {
        let kinds = Tuning::default().kinds;
        assert_eq!(kinds.coin.effect, Effect::Collect);
        assert_eq!(kinds.obstacle.effect, Effect::Crash);
        assert_eq!(kinds.barrier.effect, Effect::Slow);
        assert_eq!(kinds.boost.effect, Effect::PowerUp);
        assert_eq!(kinds.track.effect, Effect::None);
    }
}
