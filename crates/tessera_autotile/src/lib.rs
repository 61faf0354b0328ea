//! Blob and wall autotiling for tessera
//!
//! This crate turns a cell's neighborhood into the texture it should draw:
//! - `NeighborMask` - Which of the 8 neighbors share the cell's tile definition
//! - `classify_autotile` / `classify_autowall` - Mask to pattern category
//! - `PatternStrategy` - Simple, AutoTile or AutoWall classification plus per-category slots
//! - `TileDefinition` - A named, identified tile type with its strategy
//! - `TileRegistry` / `TileLibrary` - Definition lookup by ID or file path
//!
//! # Example
//!
//! ```rust,ignore
//! use tessera_autotile::{
//!     AutoTileCategory, NeighborMask, PatternCategory, PatternKind, TileDefinition,
//!     VariantSelection,
//! };
//! use tessera_core::TextureRef;
//!
//! let mut grass = TileDefinition::new("Grass", PatternKind::AutoTile);
//! grass.add_variant(
//!     PatternCategory::AutoTile(AutoTileCategory::Solo),
//!     TextureRef::new(sheet_id, 0),
//!     1.0,
//! )?;
//!
//! let texture = grass.resolve_texture(NeighborMask::EMPTY, &VariantSelection::Last, 0);
//! ```

pub mod definition;
pub mod neighbors;
pub mod pattern;
pub mod registry;
pub mod slot;
pub mod strategy;

// Re-export main types at crate root
pub use definition::{TileDefinition, DEFINITION_EXTENSION};
pub use neighbors::{Direction, NeighborMask};
pub use pattern::{
    classify_autotile, classify_autowall, AutoTileCategory, AutoWallCategory, PatternCategory,
};
pub use registry::{RegistryError, TileLibrary, TileRegistry};
pub use slot::{TileSlot, TileVariant, VariantSelection};
pub use strategy::{DefinitionError, PatternKind, PatternStrategy};

// Re-export tessera_core
pub use tessera_core;
