//! Tile definitions

use crate::neighbors::NeighborMask;
use crate::pattern::PatternCategory;
use crate::slot::VariantSelection;
use crate::strategy::{DefinitionError, PatternKind, PatternStrategy};
use serde::{Deserialize, Serialize};
use tessera_core::TextureRef;
use uuid::Uuid;

/// File extension used for tile definition files
pub const DEFINITION_EXTENSION: &str = "tile.json";

/// A paintable tile type.
///
/// Grids refer to definitions by `id` only; the definition itself lives in a
/// [`TileRegistry`](crate::TileRegistry).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TileDefinition {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub strategy: PatternStrategy,
}

impl TileDefinition {
    /// Create a new definition with a fresh ID and an empty strategy
    pub fn new(name: impl Into<String>, kind: PatternKind) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            strategy: PatternStrategy::new(kind),
        }
    }

    /// Create a definition with a known ID
    pub fn with_id(id: Uuid, name: impl Into<String>, kind: PatternKind) -> Self {
        Self {
            id,
            name: name.into(),
            strategy: PatternStrategy::new(kind),
        }
    }

    pub fn kind(&self) -> PatternKind {
        self.strategy.kind()
    }

    pub fn classify(&self, mask: NeighborMask) -> PatternCategory {
        self.strategy.classify(mask)
    }

    /// Add a texture variant to a category.
    ///
    /// Grids that already reference this definition keep their cached textures
    /// until they are refreshed.
    pub fn add_variant(
        &mut self,
        category: PatternCategory,
        texture: TextureRef,
        weight: f32,
    ) -> Result<(), DefinitionError> {
        self.strategy.add_variant(category, texture, weight)
    }

    /// Builder form of [`add_variant`](Self::add_variant)
    pub fn with_variant(
        mut self,
        category: PatternCategory,
        texture: TextureRef,
        weight: f32,
    ) -> Result<Self, DefinitionError> {
        self.add_variant(category, texture, weight)?;
        Ok(self)
    }

    /// Texture to draw for a cell with the given neighbor mask
    pub fn resolve_texture(
        &self,
        mask: NeighborMask,
        selection: &VariantSelection,
        salt: u64,
    ) -> Option<TextureRef> {
        self.strategy.resolve_for_mask(mask, selection, salt).copied()
    }

    /// Parse a definition from JSON
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Serialize this definition as pretty-printed JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
