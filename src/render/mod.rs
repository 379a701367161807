//! Render adapter boundary
//!
//! The simulation does not draw. `render` walks the state once per frame and
//! hands one `DrawInstance` per visible thing to whatever backend implements
//! `RenderAdapter` (WebGL on the page, a `Vec` in tests and the native binary).

pub mod textures;

use bytemuck::{Pod, Zeroable};
use glam::Vec3;

pub use textures::{TextureHandle, TextureLoader, Textures};

use crate::sim::state::{GameState, Payload};

/// One textured quad/model placement
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct DrawInstance {
    pub translation: [f32; 3],
    /// Rotation about the vertical axis, radians
    pub rotation: f32,
    pub scale: [f32; 3],
    pub texture: u32,
}

impl DrawInstance {
    pub fn new(translation: Vec3, rotation: f32, scale: Vec3, texture: TextureHandle) -> Self {
        Self {
            translation: translation.to_array(),
            rotation,
            scale: scale.to_array(),
            texture: texture.0,
        }
    }

    pub fn translation(&self) -> Vec3 {
        Vec3::from_array(self.translation)
    }

    /// Number of `f32` slots one instance occupies in a flat buffer
    pub const FLOATS: usize = std::mem::size_of::<DrawInstance>() / std::mem::size_of::<f32>();
}

/// Backend that receives draw instances
pub trait RenderAdapter {
    fn draw(&mut self, instance: &DrawInstance);
}

impl RenderAdapter for Vec<DrawInstance> {
    fn draw(&mut self, instance: &DrawInstance) {
        self.push(*instance);
    }
}

/// Emit the player, the chaser, the finish line and every pooled entity
pub fn render(state: &GameState, adapter: &mut impl RenderAdapter) {
    let tuning = &state.tuning;
    let spacing = tuning.lane_spacing;

    let player = &state.player;
    let player_size = Vec3::splat(tuning.player_half_extent * 2.0);
    adapter.draw(&DrawInstance::new(
        Vec3::new(player.lane.offset(spacing), player.y, tuning.player_depth),
        0.0,
        player_size,
        player.texture,
    ));

    let chaser = &state.chaser;
    adapter.draw(&DrawInstance::new(
        Vec3::new(chaser.lane.offset(spacing), tuning.ground_height, chaser.z),
        0.0,
        Vec3::splat(tuning.chaser.half_extent * 2.0),
        chaser.texture,
    ));

    if let Some(finish) = &state.finish_line {
        adapter.draw(&DrawInstance::new(
            Vec3::new(0.0, tuning.ground_height, finish.z),
            0.0,
            Vec3::new(spacing * 3.0, tuning.finish.height, tuning.finish.half_depth * 2.0),
            finish.texture,
        ));
    }

    for pool in &state.pools {
        let spec = tuning.kinds.get(pool.kind);
        for entity in pool.iter() {
            let height = match entity.payload {
                Payload::Wall { height_scale } => height_scale,
                _ => 1.0,
            };
            adapter.draw(&DrawInstance::new(
                entity.translation(spacing),
                entity.rotation,
                Vec3::new(1.0, height, spec.half_depth * 2.0),
                entity.texture,
            ));
        }
    }
}

/// Collect this frame's draw list
pub fn draw_list(state: &GameState) -> Vec<DrawInstance> {
    let mut out = Vec::new();
    render(state, &mut out);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::kind::EntityKind;
    use crate::sim::state::FinishLine;

    #[test]
    fn test_instance_is_flat_f32_compatible() {
        assert_eq!(DrawInstance::FLOATS, 8);
        let instances = [DrawInstance::default(); 2];
        let floats: &[f32] = bytemuck::cast_slice(&instances);
        assert_eq!(floats.len(), 16);
    }

    #[test]
    fn test_draw_list_covers_every_entity_once() {
        let state = GameState::new(3);
        let entities: usize = state.pools.iter().map(|p| p.len()).sum();
        let list = draw_list(&state);
        // Player and chaser come first
        assert_eq!(list.len(), entities + 2);
        assert_eq!(list[0].translation[2], state.tuning.player_depth);
    }

    #[test]
    fn test_finish_line_is_drawn_once_spawned() {
        let mut state = GameState::new(3);
        let before = draw_list(&state).len();
        state.finish_line = Some(FinishLine {
            z: -40.0,
            texture: state.textures.finish,
        });
        assert_eq!(draw_list(&state).len(), before + 1);
    }

    #[test]
    fn test_walls_use_their_height_scale() {
        let state = GameState::new(3);
        let list = draw_list(&state);
        let wall = &state.pool(EntityKind::WallLeft).entities[0];
        let Payload::Wall { height_scale } = wall.payload else {
            panic!("wall without wall payload");
        };
        let x = wall.translation(state.tuning.lane_spacing);
        let drawn = list
            .iter()
            .find(|d| d.translation() == x)
            .expect("wall drawn");
        assert_eq!(drawn.scale[1], height_scale);
    }
}
