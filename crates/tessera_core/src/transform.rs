//! World-space placement of a grid cell

use crate::{BlockSize, GridCoord};

/// Translation and scale of one drawn cell, in world units.
///
/// Grid `y` grows downward while world `y` grows upward, so the vertical
/// component is flipped here and nowhere else.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TileTransform {
    pub translation: [f32; 2],
    pub scale: [f32; 2],
}

impl TileTransform {
    /// Transform for a stored (block-aligned) coordinate
    pub fn for_cell(coord: GridCoord, block: BlockSize, tile_size: f32) -> Self {
        Self {
            translation: [coord.x as f32 * tile_size, -(coord.y as f32) * tile_size],
            scale: [block.width as f32, block.height as f32],
        }
    }
}

#[cfg(feature = "bevy")]
impl From<TileTransform> for bevy::prelude::Transform {
    fn from(t: TileTransform) -> Self {
        bevy::prelude::Transform::from_xyz(t.translation[0], t.translation[1], 0.0)
            .with_scale(bevy::prelude::Vec3::new(t.scale[0], t.scale[1], 1.0))
    }
}
