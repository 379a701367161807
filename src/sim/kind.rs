//! Entity kind descriptors
//!
//! Every entity kind is described by one `KindSpec`. The spawner, recycler
//! and collision pass are written once against this table instead of once
//! per kind.

use serde::{Deserialize, Serialize};

/// Kinds of pooled entities
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    Track,
    Ground,
    WallLeft,
    WallRight,
    Coin,
    Obstacle,
    Barrier,
    Boost,
}

impl EntityKind {
    /// All kinds, in pool order
    pub const ALL: [EntityKind; 8] = [
        EntityKind::Track,
        EntityKind::Ground,
        EntityKind::WallLeft,
        EntityKind::WallRight,
        EntityKind::Coin,
        EntityKind::Obstacle,
        EntityKind::Barrier,
        EntityKind::Boost,
    ];

    /// Position of this kind in `ALL` (and in the state's pool list)
    pub fn index(self) -> usize {
        self as usize
    }
}

/// Power-up flavours
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BoostKind {
    /// Raises the jump apex for a while
    Jump,
    /// Keeps the player airborne for a while
    Fly,
}

/// How instances of a kind come into existence
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SpawnRule {
    /// The whole pool is laid out when the run starts (ground strips)
    Prewarm,
    /// One Bernoulli trial per tick while below the cap
    Gated { chance: f32 },
}

/// Where a recycled instance is placed
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Restart {
    /// A fixed depth far ahead of the player
    Fixed { depth: f32 },
    /// Behind the furthest live instance of the kind
    BehindFurthest { spacing: f32 },
}

/// Lateral placement of instances
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LateralRule {
    /// A uniformly random lane per instance
    RandomLane,
    /// One instance per lane, placed and recycled as a row
    EveryLane,
    /// A fixed lateral offset, not bound to any lane
    Fixed { x: f32 },
}

/// Which world speed moves a kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Motion {
    World,
    Wall,
}

/// What touching an instance does to the player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Effect {
    /// Scenery, never collides
    None,
    /// Adds to the score
    Collect,
    /// Ends the run unless the player clears its top
    Crash,
    /// Slows the world and sets the chaser closing
    Slow,
    /// Starts a boost timer
    PowerUp,
}

/// Parameters for one entity kind
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KindSpec {
    pub kind: EntityKind,
    /// Half of the depth extent used for overlap tests
    pub half_depth: f32,
    /// Vertical position of the instance center
    pub height: f32,
    /// Player collides only while below `height + clearance` (obstacles)
    #[serde(default)]
    pub clearance: Option<f32>,
    /// Maximum number of live instances
    pub cap: usize,
    pub spawn: SpawnRule,
    /// Depth of the first instance
    pub first_depth: f32,
    /// Gap behind the furthest instance for later spawns; `None` always uses `first_depth`
    #[serde(default)]
    pub spacing: Option<f32>,
    /// Instances with a depth past this are recycled
    pub recycle_depth: f32,
    pub restart: Restart,
    pub lateral: LateralRule,
    pub motion: Motion,
    pub effect: Effect,
    /// Rotation added per tick (visual only)
    #[serde(default)]
    pub spin: f32,
}

impl KindSpec {
    /// Instances placed and recycled together
    pub fn batch(&self) -> usize {
        match self.lateral {
            LateralRule::EveryLane => crate::consts::LANE_COUNT,
            _ => 1,
        }
    }

    pub fn prewarmed(&self) -> bool {
        self.spawn == SpawnRule::Prewarm
    }

    fn scenery(kind: EntityKind, x: f32, height: f32) -> Self {
        Self {
            kind,
            half_depth: 0.0,
            height,
            clearance: None,
            cap: 0,
            spawn: SpawnRule::Prewarm,
            first_depth: 0.0,
            spacing: None,
            recycle_depth: 0.0,
            restart: Restart::Fixed { depth: 0.0 },
            lateral: LateralRule::Fixed { x },
            motion: Motion::World,
            effect: Effect::None,
            spin: 0.0,
        }
    }

    fn wall(kind: EntityKind, x: f32) -> Self {
        Self {
            half_depth: 6.0,
            cap: 15,
            first_depth: -15.0,
            spacing: Some(14.0),
            recycle_depth: -4.0,
            restart: Restart::BehindFurthest { spacing: 14.0 },
            motion: Motion::Wall,
            ..Self::scenery(kind, x, 0.0)
        }
    }
}

/// The full descriptor table, one entry per kind
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KindTable {
    pub track: KindSpec,
    pub ground: KindSpec,
    pub wall_left: KindSpec,
    pub wall_right: KindSpec,
    pub coin: KindSpec,
    pub obstacle: KindSpec,
    pub barrier: KindSpec,
    pub boost: KindSpec,
}

impl KindTable {
    pub fn get(&self, kind: EntityKind) -> &KindSpec {
        match kind {
            EntityKind::Track => &self.track,
            EntityKind::Ground => &self.ground,
            EntityKind::WallLeft => &self.wall_left,
            EntityKind::WallRight => &self.wall_right,
            EntityKind::Coin => &self.coin,
            EntityKind::Obstacle => &self.obstacle,
            EntityKind::Barrier => &self.barrier,
            EntityKind::Boost => &self.boost,
        }
    }

    pub fn get_mut(&mut self, kind: EntityKind) -> &mut KindSpec {
        match kind {
            EntityKind::Track => &mut self.track,
            EntityKind::Ground => &mut self.ground,
            EntityKind::WallLeft => &mut self.wall_left,
            EntityKind::WallRight => &mut self.wall_right,
            EntityKind::Coin => &mut self.coin,
            EntityKind::Obstacle => &mut self.obstacle,
            EntityKind::Barrier => &mut self.barrier,
            EntityKind::Boost => &mut self.boost,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &KindSpec> {
        EntityKind::ALL.into_iter().map(|kind| self.get(kind))
    }
}

impl Default for KindTable {
    fn default() -> Self {
        Self {
            // 20 rows of three rails, 2 units apart
            track: KindSpec {
                half_depth: 1.0,
                cap: 60,
                first_depth: -3.15,
                spacing: Some(2.0),
                restart: Restart::BehindFurthest { spacing: 2.0 },
                lateral: LateralRule::EveryLane,
                ..KindSpec::scenery(EntityKind::Track, 0.0, -0.9)
            },
            ground: KindSpec {
                half_depth: 2.0,
                cap: 13,
                first_depth: 0.0,
                spacing: Some(4.0),
                restart: Restart::BehindFurthest { spacing: 4.0 },
                ..KindSpec::scenery(EntityKind::Ground, 0.0, -1.0)
            },
            wall_left: KindSpec::wall(EntityKind::WallLeft, -13.0),
            wall_right: KindSpec::wall(EntityKind::WallRight, 13.0),
            coin: KindSpec {
                kind: EntityKind::Coin,
                half_depth: 0.05,
                height: -0.75,
                clearance: None,
                cap: 45,
                spawn: SpawnRule::Gated { chance: 0.075 },
                first_depth: -10.0,
                spacing: Some(2.0),
                recycle_depth: 2.0,
                restart: Restart::Fixed { depth: -20.0 },
                lateral: LateralRule::RandomLane,
                motion: Motion::World,
                effect: Effect::Collect,
                spin: -0.1,
            },
            obstacle: KindSpec {
                kind: EntityKind::Obstacle,
                half_depth: 0.75,
                height: -0.60,
                clearance: Some(0.5),
                cap: 5,
                spawn: SpawnRule::Gated { chance: 0.055 },
                first_depth: -10.0,
                spacing: Some(50.0),
                recycle_depth: 2.0,
                restart: Restart::BehindFurthest { spacing: 50.0 },
                lateral: LateralRule::RandomLane,
                motion: Motion::World,
                effect: Effect::Crash,
                spin: 0.0,
            },
            barrier: KindSpec {
                kind: EntityKind::Barrier,
                half_depth: 0.05,
                height: -0.78,
                clearance: None,
                cap: 5,
                spawn: SpawnRule::Gated { chance: 0.05 },
                first_depth: -35.0,
                spacing: Some(7.0),
                recycle_depth: 2.0,
                restart: Restart::Fixed { depth: -50.0 },
                lateral: LateralRule::RandomLane,
                motion: Motion::World,
                effect: Effect::Slow,
                spin: 0.0,
            },
            boost: KindSpec {
                kind: EntityKind::Boost,
                half_depth: 0.05,
                height: -0.60,
                clearance: None,
                cap: 2,
                spawn: SpawnRule::Gated { chance: 0.04 },
                first_depth: -35.0,
                spacing: None,
                recycle_depth: 2.0,
                restart: Restart::Fixed { depth: -35.0 },
                lateral: LateralRule::RandomLane,
                motion: Motion::World,
                effect: Effect::PowerUp,
                spin: 0.1,
            },
        }
    }
}
