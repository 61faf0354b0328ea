//! Placed tile instances

use tessera_autotile::{NeighborMask, PatternCategory, TileDefinition, VariantSelection};
use tessera_core::{GridCoord, TextureRef};
use uuid::Uuid;

/// A tile placed in one grid cell.
///
/// Only the definition ID is authoritative, and only the grid may change it
/// since it owns the reference counts. `mask` and `texture` cache the last
/// classification and are rewritten whenever the cell or a neighbor changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlacedTile {
    /// ID of the tile definition painted here
    pub(crate) tile: Uuid,
    /// Same-definition neighbors at the last refresh
    pub mask: NeighborMask,
    /// Texture chosen at the last refresh, if the definition had one
    pub texture: Option<TextureRef>,
}

impl PlacedTile {
    pub fn new(tile: Uuid) -> Self {
        Self {
            tile,
            mask: NeighborMask::EMPTY,
            texture: None,
        }
    }

    /// Instance read back from disk: the mask is trusted as stored
    pub fn with_mask(tile: Uuid, mask: NeighborMask) -> Self {
        Self {
            tile,
            mask,
            texture: None,
        }
    }

    /// ID of the tile definition painted here
    pub fn tile(&self) -> Uuid {
        self.tile
    }

    /// Category this instance falls into under `definition`'s strategy
    pub fn category(&self, definition: &TileDefinition) -> PatternCategory {
        definition.classify(self.mask)
    }

    /// Store a new mask and re-resolve the texture through `definition`
    pub fn refresh(
        &mut self,
        mask: NeighborMask,
        definition: Option<&TileDefinition>,
        selection: &VariantSelection,
        salt: u64,
    ) {
        self.mask = mask;
        self.resolve_texture(definition, selection, salt);
    }

    /// Re-resolve the texture from the current mask
    pub fn resolve_texture(
        &mut self,
        definition: Option<&TileDefinition>,
        selection: &VariantSelection,
        salt: u64,
    ) {
        self.texture = definition.and_then(|d| d.resolve_texture(self.mask, selection, salt));
    }
}

/// Per-cell salt for weighted variant picks
pub(crate) fn cell_salt(coord: GridCoord) -> u64 {
    ((coord.x as u32 as u64) << 32) | coord.y as u32 as u64
}
