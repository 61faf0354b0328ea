//! Binary persistence for tile grids
//!
//! Layout, little-endian and unpadded:
//!
//! ```text
//! string  name
//! u32     map kind
//! i32     block width
//! i32     block height
//! u64     cell count
//! if cell count > 0:
//!     u64     index table size
//!     (16-byte tile id, i32 index) * table size
//!     (i32 x, i32 y, i32 index, u8 neighbor mask) * cell count
//! string  "tileMap"
//! ```
//!
//! Each referenced tile definition appears once in the index table and cells
//! point at it by index. Neighbor masks are stored as computed; loading does
//! not reclassify cells.

use crate::codec::{ByteReader, ByteWriter};
use crate::grid::TileGrid;
use crate::instance::{cell_salt, PlacedTile};
use std::collections::HashMap;
use std::io::{Read, Write};
use std::path::Path;
use tessera_autotile::{NeighborMask, TileDefinition, TileRegistry, VariantSelection};
use tessera_core::{BlockSize, GridCoord};
use thiserror::Error;
use tracing::{debug, error, warn};
use uuid::Uuid;

/// Trailing tag every serialized grid ends with
pub const MAP_TAG: &str = "tileMap";

/// Conventional file extension for serialized grids
pub const MAP_EXTENSION: &str = "tilemap";

/// Kind of cell map stored in a stream
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum MapKind {
    Tile = 0,
}

impl MapKind {
    pub fn from_u32(value: u32) -> Option<Self> {
        match value {
            0 => Some(MapKind::Tile),
            _ => None,
        }
    }
}

/// Error type for grid loading failures
#[derive(Debug, Error)]
pub enum MapLoadError {
    #[error("Failed to read map: {0}")]
    Io(#[from] std::io::Error),
    #[error("Map references tile definition {0} which is not registered")]
    UnresolvedTile(Uuid),
    #[error("Unknown map kind {0}")]
    UnknownMapKind(u32),
    #[error("Invalid block size {width}x{height}")]
    InvalidBlockSize { width: i32, height: i32 },
    #[error("Cell at ({x}, {y}) uses tile index {index} which is not in the index table")]
    InvalidTileIndex { x: i32, y: i32, index: i32 },
    #[error("Map tag mismatch: expected {MAP_TAG:?}, found {found:?}")]
    SentinelMismatch { found: String },
}

impl MapLoadError {
    /// Format mismatches are reported and the grid discarded, but they do
    /// not indicate a broken registry or I/O layer.
    pub fn is_soft(&self) -> bool {
        matches!(
            self,
            MapLoadError::SentinelMismatch { .. } | MapLoadError::UnknownMapKind(_)
        )
    }
}

/// Error type for grid saving failures
#[derive(Debug, Error)]
pub enum MapSaveError {
    #[error("Failed to write map: {0}")]
    Io(#[from] std::io::Error),
    #[error("Grid has {cells} cells but no referenced tile definitions")]
    EmptyReferenceTable { cells: usize },
    #[error("Cell uses tile definition {0} which has no reference count")]
    UnreferencedTile(Uuid),
}

/// Serialize `grid` into `writer`
pub fn write_grid<W: Write>(grid: &TileGrid, writer: W) -> Result<(), MapSaveError> {
    let mut out = ByteWriter::new(writer);
    let block = grid.block_size();

    out.write_str(grid.name())?;
    out.write_u32(MapKind::Tile as u32)?;
    out.write_i32(block.width)?;
    out.write_i32(block.height)?;
    out.write_size(grid.len())?;

    if !grid.is_empty() {
        let table = grid.ref_counts();
        if table.is_empty() {
            return Err(MapSaveError::EmptyReferenceTable { cells: grid.len() });
        }

        out.write_size(table.len())?;
        let mut indices: HashMap<Uuid, i32> = HashMap::with_capacity(table.len());
        for (index, id) in table.keys().enumerate() {
            let index = index as i32;
            out.write_uuid(*id)?;
            out.write_i32(index)?;
            indices.insert(*id, index);
        }

        for (coord, placed) in grid.sorted_cells() {
            let index = *indices
                .get(&placed.tile)
                .ok_or(MapSaveError::UnreferencedTile(placed.tile))?;
            out.write_i32(coord.x)?;
            out.write_i32(coord.y)?;
            out.write_i32(index)?;
            out.write_u8(placed.mask.bits())?;
        }
    }

    out.write_str(MAP_TAG)?;
    debug!(
        "Wrote grid '{}' with {} cells and {} tile definitions",
        grid.name(),
        grid.len(),
        grid.ref_counts().len()
    );
    Ok(())
}

/// Deserialize a grid, resolving tile definitions through `registry`
pub fn read_grid<R, G>(reader: R, registry: &G) -> Result<TileGrid, MapLoadError>
where
    R: Read,
    G: TileRegistry + ?Sized,
{
    read_grid_with(reader, registry, VariantSelection::default())
}

/// Deserialize a grid whose textures are resolved with `selection`
pub fn read_grid_with<R, G>(
    reader: R,
    registry: &G,
    selection: VariantSelection,
) -> Result<TileGrid, MapLoadError>
where
    R: Read,
    G: TileRegistry + ?Sized,
{
    let mut input = ByteReader::new(reader);

    let name = input.read_string()?;
    let kind = input.read_u32()?;
    if MapKind::from_u32(kind).is_none() {
        warn!("Map '{}' has unknown kind {}", name, kind);
        return Err(MapLoadError::UnknownMapKind(kind));
    }

    let width = input.read_i32()?;
    let height = input.read_i32()?;
    let block = BlockSize::new(width, height)
        .ok_or(MapLoadError::InvalidBlockSize { width, height })?;

    let mut grid = TileGrid::with_block_size(name, block);
    grid.set_selection(selection);

    let cell_count = input.read_size()?;
    if cell_count > 0 {
        let table_size = input.read_size()?;
        let mut table: HashMap<i32, &TileDefinition> = HashMap::new();
        for _ in 0..table_size {
            let id = input.read_uuid()?;
            let index = input.read_i32()?;
            let Some(definition) = registry.resolve(id) else {
                error!("Map '{}' references unknown tile definition {}", grid.name(), id);
                return Err(MapLoadError::UnresolvedTile(id));
            };
            table.insert(index, definition);
        }

        for _ in 0..cell_count {
            let x = input.read_i32()?;
            let y = input.read_i32()?;
            let index = input.read_i32()?;
            let mask = NeighborMask(input.read_u8()?);

            let definition = table
                .get(&index)
                .copied()
                .ok_or(MapLoadError::InvalidTileIndex { x, y, index })?;
            let coord = GridCoord::new(x, y);
            let mut placed = PlacedTile::with_mask(definition.id, mask);
            placed.resolve_texture(Some(definition), &selection, cell_salt(coord));
            grid.insert_loaded(coord, placed);
        }
    }

    let tag = input.read_string()?;
    if tag != MAP_TAG {
        warn!("Map '{}' ends with tag {:?}, discarding", grid.name(), tag);
        return Err(MapLoadError::SentinelMismatch { found: tag });
    }

    debug!("Read grid '{}' with {} cells", grid.name(), grid.len());
    Ok(grid)
}

/// Write `grid` to a file. Nothing is written if serialization fails.
pub fn save_grid(grid: &TileGrid, path: &Path) -> Result<(), MapSaveError> {
    let bytes = grid.to_bytes()?;
    std::fs::write(path, bytes)?;
    Ok(())
}

/// Load a grid from a file
pub fn load_grid<G>(path: &Path, registry: &G) -> Result<TileGrid, MapLoadError>
where
    G: TileRegistry + ?Sized,
{
    let bytes = std::fs::read(path)?;
    read_grid(bytes.as_slice(), registry)
}

impl TileGrid {
    /// Serialize to an in-memory buffer
    pub fn to_bytes(&self) -> Result<Vec<u8>, MapSaveError> {
        let mut bytes = Vec::new();
        write_grid(self, &mut bytes)?;
        Ok(bytes)
    }

    /// Deserialize from an in-memory buffer
    pub fn from_bytes<G>(bytes: &[u8], registry: &G) -> Result<Self, MapLoadError>
    where
        G: TileRegistry + ?Sized,
    {
        read_grid(bytes, registry)
    }
}
