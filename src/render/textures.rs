//! Texture handles
//!
//! The simulation never touches image data. A loader hands back opaque
//! handles once per asset; entities carry the handle they were built with and
//! the render adapter receives it unchanged.

use serde::{Deserialize, Serialize};

use crate::sim::kind::{BoostKind, EntityKind};

/// Opaque handle returned by a texture loader
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct TextureHandle(pub u32);

/// Anything that can turn an asset path into a texture handle
pub trait TextureLoader {
    fn load(&mut self, path: &str) -> TextureHandle;
}

impl<F> TextureLoader for F
where
    F: FnMut(&str) -> TextureHandle,
{
    fn load(&mut self, path: &str) -> TextureHandle {
        self(path)
    }
}

/// Asset paths, relative to the page
pub mod assets {
    pub const PLAYER: &str = "assets/player.png";
    pub const CHASER: &str = "assets/police.png";
    pub const FINISH: &str = "assets/finish.png";
    pub const TRACK: &str = "assets/track.jpg";
    pub const GROUND: &str = "assets/ground.jpg";
    pub const WALL: &str = "assets/wall.jpg";
    pub const COIN: &str = "assets/coin.png";
    pub const OBSTACLE: &str = "assets/obstacle.png";
    pub const BARRIER: &str = "assets/barrier.png";
    pub const JUMP_BOOST: &str = "assets/jumpboost.png";
    pub const FLY_BOOST: &str = "assets/flyboost.jpg";
}

/// Every handle the simulation hands out, resolved once per run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Textures {
    pub player: TextureHandle,
    pub chaser: TextureHandle,
    pub finish: TextureHandle,
    pub track: TextureHandle,
    pub ground: TextureHandle,
    pub wall: TextureHandle,
    pub coin: TextureHandle,
    pub obstacle: TextureHandle,
    pub barrier: TextureHandle,
    pub jump_boost: TextureHandle,
    pub fly_boost: TextureHandle,
}

impl Textures {
    /// Resolve every asset through the loader
    pub fn load(loader: &mut impl TextureLoader) -> Self {
        Self {
            player: loader.load(assets::PLAYER),
            chaser: loader.load(assets::CHASER),
            finish: loader.load(assets::FINISH),
            track: loader.load(assets::TRACK),
            ground: loader.load(assets::GROUND),
            wall: loader.load(assets::WALL),
            coin: loader.load(assets::COIN),
            obstacle: loader.load(assets::OBSTACLE),
            barrier: loader.load(assets::BARRIER),
            jump_boost: loader.load(assets::JUMP_BOOST),
            fly_boost: loader.load(assets::FLY_BOOST),
        }
    }

    /// Handle for a pooled entity; boosts look different per flavour
    pub fn for_kind(&self, kind: EntityKind, boost: Option<BoostKind>) -> TextureHandle {
        match kind {
            EntityKind::Track => self.track,
            EntityKind::Ground => self.ground,
            EntityKind::WallLeft | EntityKind::WallRight => self.wall,
            EntityKind::Coin => self.coin,
            EntityKind::Obstacle => self.obstacle,
            EntityKind::Barrier => self.barrier,
            EntityKind::Boost => match boost {
                Some(BoostKind::Fly) => self.fly_boost,
                _ => self.jump_boost,
            },
        }
    }
}
