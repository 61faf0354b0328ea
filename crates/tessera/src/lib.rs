//! # tessera
//!
//! Autotiling tile map core.
//!
//! Paint tile definitions into a sparse grid and every cell picks the edge,
//! corner or wall piece that matches its neighbors. Grids save to a compact
//! binary form that references each definition once.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use tessera::prelude::*;
//!
//! let project = TileProject::load(Path::new("game/project.toml"))?;
//! let library = project.open_library()?;
//! let grass = library.iter().find(|d| d.name == "Grass").unwrap();
//!
//! let mut grid = project.new_grid("Level1");
//! grid.fill_rect(grass, GridCoord::new(0, 0), GridCoord::new(9, 4), &library);
//! project.save_map(&grid)?;
//! ```
//!
//! ## Features
//!
//! - `bevy` - `From<TileTransform> for bevy::prelude::Transform`
//!
//! ## Crate Structure
//!
//! - [`core`] - Coordinates, macro-tile blocks, texture references
//! - [`autotile`] - Neighbor masks, pattern classification, tile definitions
//! - [`grid`] - The tile grid, persistence and the render feed

pub mod project;

pub use project::{ProjectError, TileProject};

// =============================================================================
// Core module - coordinates and texture references
// =============================================================================

/// Coordinates, macro-tile blocks and texture references.
pub mod core {
    pub use tessera_core::*;
}

pub use tessera_core::{BlockSize, GridCoord, TextureProvider, TextureRef, TileTransform};

// =============================================================================
// Autotile module - classification and tile definitions
// =============================================================================

/// Neighbor masks, pattern classification and tile definitions.
///
/// Provides:
/// - [`NeighborMask`] - Same-definition neighbors of a cell
/// - [`TileDefinition`] - A named tile type and its pattern strategy
/// - [`TileLibrary`] - File-backed definition registry
pub mod autotile {
    pub use tessera_autotile::*;
}

pub use tessera_autotile::{
    classify_autotile, classify_autowall, AutoTileCategory, AutoWallCategory, DefinitionError,
    Direction, NeighborMask, PatternCategory, PatternKind, PatternStrategy, RegistryError,
    TileDefinition, TileLibrary, TileRegistry, TileSlot, TileVariant, VariantSelection,
};

// =============================================================================
// Grid module - placement, persistence and rendering
// =============================================================================

/// The sparse tile grid.
///
/// Provides:
/// - [`TileGrid`] - Placements, reference counts and neighbor refresh
/// - [`read_grid`] / [`write_grid`] - Binary persistence
/// - [`render_grid`] - Feed visible cells to a [`TileRenderer`]
pub mod grid {
    pub use tessera_grid::*;
}

pub use tessera_grid::{
    load_grid, read_grid, read_grid_with, render_grid, save_grid, write_grid, ConfigError,
    GridSettings, MapLoadError, MapSaveError, PlacedTile, RenderStats, TileChange, TileGrid,
    TileRenderer, ViewRect,
};

// =============================================================================
// Prelude - import everything commonly needed
// =============================================================================

/// Commonly used types and traits.
///
/// Import with:
/// ```rust,ignore
/// use tessera::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{ProjectError, TileProject};

    pub use crate::{BlockSize, GridCoord, TextureProvider, TextureRef, TileTransform};

    pub use crate::{
        AutoTileCategory, AutoWallCategory, NeighborMask, PatternCategory, PatternKind,
        TileDefinition, TileLibrary, TileRegistry, VariantSelection,
    };

    pub use crate::{
        render_grid, GridSettings, MapLoadError, MapSaveError, PlacedTile, TileGrid,
        TileRenderer, ViewRect,
    };
}
