//! Game state and core simulation types
//!
//! One `GameState` owns everything a run needs. The tick driver gets
//! exclusive access to it; entities never reference each other.

use glam::Vec3;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::kind::{BoostKind, EntityKind};
use super::lane::Lane;
use crate::render::{TextureHandle, Textures};
use crate::tuning::Tuning;

/// How a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    /// Hit an obstacle or got caught by the chaser
    GameOver,
    /// Reached the finish line
    Finished,
}

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for the first input
    Ready,
    /// Active gameplay
    Running,
    /// Game is paused
    Paused,
    /// Run ended; nothing changes any more
    Ended(Outcome),
}

/// Lateral placement of an entity
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Lateral {
    Lane(Lane),
    Offset(f32),
}

impl Lateral {
    pub fn lane(self) -> Option<Lane> {
        match self {
            Lateral::Lane(lane) => Some(lane),
            Lateral::Offset(_) => None,
        }
    }

    pub fn x(self, lane_spacing: f32) -> f32 {
        match self {
            Lateral::Lane(lane) => lane.offset(lane_spacing),
            Lateral::Offset(x) => x,
        }
    }
}

/// Kind-specific entity data
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Payload {
    None,
    Boost(BoostKind),
    Wall { height_scale: f32 },
}

/// A pooled entity
#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    /// Fresh on every spawn and recycle
    pub id: u32,
    pub kind: EntityKind,
    pub lateral: Lateral,
    pub y: f32,
    /// Depth along the track; grows by the world speed every tick
    pub z: f32,
    /// Visual spin
    pub rotation: f32,
    pub payload: Payload,
    pub texture: TextureHandle,
}

impl Entity {
    pub fn lane(&self) -> Option<Lane> {
        self.lateral.lane()
    }

    pub fn boost_kind(&self) -> Option<BoostKind> {
        match self.payload {
            Payload::Boost(kind) => Some(kind),
            _ => None,
        }
    }

    pub fn translation(&self, lane_spacing: f32) -> Vec3 {
        Vec3::new(self.lateral.x(lane_spacing), self.y, self.z)
    }
}

/// Bounded pool of one entity kind
#[derive(Debug, Clone, PartialEq)]
pub struct Pool {
    pub kind: EntityKind,
    pub entities: Vec<Entity>,
}

impl Pool {
    pub fn new(kind: EntityKind, capacity: usize) -> Self {
        Self {
            kind,
            entities: Vec::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Depth of the instance furthest ahead of the player
    pub fn furthest_depth(&self) -> Option<f32> {
        self.entities.iter().map(|e| e.z).reduce(f32::min)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Entity> {
        self.entities.iter()
    }
}

/// Vertical motion state of the player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum JumpState {
    #[default]
    Grounded,
    Rising,
    Falling,
}

/// Remaining ticks of each boost
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoostTimers {
    pub jump_ticks: u32,
    pub fly_ticks: u32,
}

impl BoostTimers {
    pub fn flying(&self) -> bool {
        self.fly_ticks > 0
    }

    /// Either boost raises the apex
    pub fn boosted(&self) -> bool {
        self.jump_ticks > 0 || self.fly_ticks > 0
    }
}

/// The player
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    pub lane: Lane,
    pub y: f32,
    /// Vertical speed magnitude; direction comes from `jump`
    pub vy: f32,
    pub jump: JumpState,
    pub boosts: BoostTimers,
    pub texture: TextureHandle,
}

impl Player {
    pub fn new(tuning: &Tuning, texture: TextureHandle) -> Self {
        Self {
            lane: Lane::Center,
            y: tuning.ground_height,
            vy: tuning.rise_speed,
            jump: JumpState::Grounded,
            boosts: BoostTimers::default(),
            texture,
        }
    }

    /// Current jump apex
    pub fn apex(&self, tuning: &Tuning) -> f32 {
        if self.boosts.boosted() {
            tuning.boosted_apex
        } else {
            tuning.jump_apex
        }
    }

    pub fn airborne(&self, tuning: &Tuning) -> bool {
        self.y > tuning.ground_height
    }
}

/// The pursuing hazard behind the player
#[derive(Debug, Clone, PartialEq)]
pub struct Chaser {
    /// Mirrors the player's lane
    pub lane: Lane,
    pub z: f32,
    /// Advancing on the player instead of dropping back
    pub closing: bool,
    pub texture: TextureHandle,
}

impl Chaser {
    pub fn new(tuning: &Tuning, texture: TextureHandle) -> Self {
        Self {
            lane: Lane::Center,
            z: tuning.player_depth + tuning.chaser.start_gap,
            closing: false,
            texture,
        }
    }

    /// Follow the player's lane and move one tick along the depth axis
    pub fn advance(&mut self, player_lane: Lane, tuning: &Tuning) {
        self.lane = player_lane;
        if self.closing {
            // Never overtakes; waits at the player's depth for an opening
            self.z = (self.z - tuning.chaser.speed).max(tuning.player_depth);
        } else {
            let station = tuning.player_depth + tuning.chaser.max_gap;
            self.z = (self.z + tuning.chaser.speed).min(station);
        }
    }
}

/// The finish banner, spawned once the score threshold is reached
#[derive(Debug, Clone, PartialEq)]
pub struct FinishLine {
    pub z: f32,
    pub texture: TextureHandle,
}

/// Things that happened during a tick (for audio/UI)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    RunStarted,
    CoinCollected,
    BoostCollected(BoostKind),
    BoostExpired(BoostKind),
    BarrierHit,
    PenaltyExpired,
    FinishLineSpawned,
    Crashed,
    Caught,
    Finished,
}

/// Serializable result of a run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    pub seed: u64,
    pub score: u32,
    pub distance: f32,
    pub ticks: u64,
    pub outcome: Option<Outcome>,
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub tuning: Tuning,
    pub textures: Textures,
    pub phase: GamePhase,
    /// Simulation tick counter (running ticks only)
    pub time_ticks: u64,
    /// Coins collected
    pub score: u32,
    /// Track travelled at world speed
    pub distance: f32,
    /// Speed of everything on the track
    pub speed: f32,
    /// Speed of the side walls
    pub wall_speed: f32,
    /// Ticks left on the barrier penalty
    pub penalty_ticks: u32,
    pub player: Player,
    pub chaser: Chaser,
    pub finish_line: Option<FinishLine>,
    /// One pool per kind, in `EntityKind::ALL` order
    pub pools: Vec<Pool>,
    /// Events from the most recent tick
    pub events: Vec<GameEvent>,
    pub(crate) rng: Pcg32,
    next_id: u32,
}

impl GameState {
    /// Create a run with default tuning and placeholder textures
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, Tuning::default(), Textures::default())
    }

    /// Create a run from a tuning table and resolved textures
    pub fn with_tuning(seed: u64, tuning: Tuning, textures: Textures) -> Self {
        let pools = EntityKind::ALL
            .iter()
            .map(|&kind| Pool::new(kind, tuning.kinds.get(kind).cap))
            .collect();

        let mut state = Self {
            seed,
            speed: tuning.world_speed,
            wall_speed: tuning.wall_speed,
            player: Player::new(&tuning, textures.player),
            chaser: Chaser::new(&tuning, textures.chaser),
            tuning,
            textures,
            phase: GamePhase::Ready,
            time_ticks: 0,
            score: 0,
            distance: 0.0,
            penalty_ticks: 0,
            finish_line: None,
            pools,
            events: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
            next_id: 1,
        };

        super::spawn::prewarm(&mut state);

        state
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn pool(&self, kind: EntityKind) -> &Pool {
        &self.pools[kind.index()]
    }

    pub fn pool_mut(&mut self, kind: EntityKind) -> &mut Pool {
        &mut self.pools[kind.index()]
    }

    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }

    pub fn outcome(&self) -> Option<Outcome> {
        match self.phase {
            GamePhase::Ended(outcome) => Some(outcome),
            _ => None,
        }
    }

    pub fn game_over(&self) -> bool {
        self.outcome() == Some(Outcome::GameOver)
    }

    pub fn finished(&self) -> bool {
        self.outcome() == Some(Outcome::Finished)
    }

    /// End the run. The first outcome wins.
    pub fn end(&mut self, outcome: Outcome) {
        if matches!(self.phase, GamePhase::Ended(_)) {
            return;
        }
        log::info!(
            "Run ended: {:?} (score {}, distance {:.1}, tick {})",
            outcome,
            self.score,
            self.distance,
            self.time_ticks
        );
        self.phase = GamePhase::Ended(outcome);
    }

    pub fn summary(&self) -> RunSummary {
        RunSummary {
            seed: self.seed,
            score: self.score,
            distance: self.distance,
            ticks: self.time_ticks,
            outcome: self.outcome(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_is_ready_and_grounded() {
        let state = GameState::new(1);
        assert_eq!(state.phase, GamePhase::Ready);
        assert_eq!(state.player.lane, Lane::Center);
        assert_eq!(state.player.jump, JumpState::Grounded);
        assert_eq!(state.player.y, state.tuning.ground_height);
        assert_eq!(state.speed, state.tuning.world_speed);
        assert_eq!(state.pools.len(), EntityKind::ALL.len());
    }

    #[test]
    fn test_pools_are_in_kind_order() {
        let state = GameState::new(1);
        for kind in EntityKind::ALL {
            assert_eq!(state.pool(kind).kind, kind);
        }
    }

    #[test]
    fn test_first_outcome_wins() {
        let mut state = GameState::new(1);
        state.phase = GamePhase::Running;
        state.end(Outcome::Finished);
        state.end(Outcome::GameOver);
        assert!(state.finished());
        assert!(!state.game_over());
    }

    #[test]
    fn test_apex_follows_boosts() {
        let tuning = Tuning::default();
        let mut player = Player::new(&tuning, TextureHandle::default());
        assert_eq!(player.apex(&tuning), tuning.jump_apex);
        player.boosts.jump_ticks = 3;
        assert_eq!(player.apex(&tuning), tuning.boosted_apex);
        player.boosts.jump_ticks = 0;
        player.boosts.fly_ticks = 3;
        assert_eq!(player.apex(&tuning), tuning.boosted_apex);
    }

    #[test]
    fn test_chaser_holds_station_when_not_closing() {
        let tuning = Tuning::default();
        let mut chaser = Chaser::new(&tuning, TextureHandle::default());
        for _ in 0..10_000 {
            chaser.advance(Lane::Left, &tuning);
        }
        assert_eq!(chaser.lane, Lane::Left);
        assert_eq!(chaser.z, tuning.player_depth + tuning.chaser.max_gap);
    }

    #[test]
    fn test_chaser_closes_on_player() {
        let tuning = Tuning::default();
        let mut chaser = Chaser::new(&tuning, TextureHandle::default());
        let start = chaser.z;
        chaser.closing = true;
        chaser.advance(Lane::Center, &tuning);
        assert!(chaser.z < start);
    }

    #[test]
    fn test_closing_chaser_stops_at_player_depth() {
        let tuning = Tuning::default();
        let mut chaser = Chaser::new(&tuning, TextureHandle::default());
        chaser.closing = true;
        for _ in 0..10_000 {
            chaser.advance(Lane::Center, &tuning);
            assert!(chaser.z >= tuning.player_depth);
        }
        assert_eq!(chaser.z, tuning.player_depth);
    }

    #[test]
    fn test_furthest_depth() {
        let state = GameState::new(1);
        let ground = state.pool(EntityKind::Ground);
        let furthest = ground.furthest_depth().unwrap();
        assert!(ground.iter().all(|e| e.z >= furthest));
        assert_eq!(state.pool(EntityKind::Coin).furthest_depth(), None);
    }
}
