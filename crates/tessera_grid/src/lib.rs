//! Sparse autotiled tile grid for tessera
//!
//! - `TileGrid` - Placed tiles keyed by coordinate, with per-definition
//!   reference counts and automatic neighbor refresh
//! - `PlacedTile` - One painted cell and its cached mask and texture
//! - `write_grid` / `read_grid` - Compact little-endian persistence
//! - `render_grid` - Feed visible cells to a `TileRenderer`
//! - `GridSettings` - Tile size, macro-tile block and variant selection (TOML)
//!
//! # Example
//!
//! ```rust,ignore
//! use tessera_autotile::{PatternKind, TileDefinition, TileLibrary};
//! use tessera_grid::TileGrid;
//! use tessera_core::GridCoord;
//!
//! let grass = TileDefinition::new("Grass", PatternKind::AutoTile);
//! let mut library = TileLibrary::new();
//! library.insert(grass.clone());
//!
//! let mut grid = TileGrid::new("Overworld");
//! grid.set_tile(&grass, GridCoord::new(0, 0), &library);
//! grid.set_tile(&grass, GridCoord::new(1, 0), &library);
//!
//! let bytes = grid.to_bytes()?;
//! let loaded = TileGrid::from_bytes(&bytes, &library)?;
//! ```

pub mod codec;
pub mod grid;
pub mod instance;
pub mod render;
pub mod serialize;
pub mod settings;

pub use grid::{TileChange, TileGrid};
pub use instance::PlacedTile;
pub use render::{render_grid, world_to_cell, RenderStats, TileRenderer, ViewRect};
pub use serialize::{
    load_grid, read_grid, read_grid_with, save_grid, write_grid, MapKind, MapLoadError,
    MapSaveError, MAP_EXTENSION, MAP_TAG,
};
pub use settings::{ConfigError, GridSettings, DEFAULT_TILE_SIZE};
