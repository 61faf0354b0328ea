//! The sparse tile placement grid

use crate::instance::{cell_salt, PlacedTile};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use tessera_autotile::{NeighborMask, TileDefinition, TileRegistry, VariantSelection};
use tessera_core::{BlockSize, GridCoord};
use tracing::{debug, warn};
use uuid::Uuid;

/// Result of a single placement or removal
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileChange {
    /// Block-aligned coordinate that was written
    pub coord: GridCoord,
    /// Instance that occupied the cell before the edit
    pub previous: Option<PlacedTile>,
    /// Definition whose last reference disappeared with this edit
    pub released: Option<Uuid>,
}

/// A sparse, logically infinite map from grid coordinates to placed tiles.
///
/// The grid counts how many cells use each tile definition. A definition with
/// no cells left has no entry in the count table, so the table is exactly the
/// set of definitions a saved map has to reference.
#[derive(Debug, Clone, Default)]
pub struct TileGrid {
    name: String,
    block: BlockSize,
    selection: VariantSelection,
    cells: HashMap<GridCoord, PlacedTile>,
    ref_counts: BTreeMap<Uuid, usize>,
}

impl TileGrid {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Create a grid whose placements snap to `block`-sized macro tiles
    pub fn with_block_size(name: impl Into<String>, block: BlockSize) -> Self {
        Self {
            name: name.into(),
            block,
            ..Default::default()
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn block_size(&self) -> BlockSize {
        self.block
    }

    pub fn selection(&self) -> VariantSelection {
        self.selection
    }

    /// Change how slot variants are picked. Cached textures keep their old
    /// choice until the next refresh.
    pub fn set_selection(&mut self, selection: VariantSelection) {
        self.selection = selection;
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Number of cells using `tile` (0 if it is not referenced)
    pub fn ref_count(&self, tile: Uuid) -> usize {
        self.ref_counts.get(&tile).copied().unwrap_or(0)
    }

    /// Reference count table, ordered by definition ID
    pub fn ref_counts(&self) -> &BTreeMap<Uuid, usize> {
        &self.ref_counts
    }

    /// IDs of every definition used by at least one cell
    pub fn referenced_tiles(&self) -> impl Iterator<Item = Uuid> + '_ {
        self.ref_counts.keys().copied()
    }

    /// Block-aligned storage coordinate for a requested coordinate
    pub fn normalize(&self, coord: GridCoord) -> GridCoord {
        self.block.align(coord)
    }

    pub fn try_get_tile(&self, coord: GridCoord) -> Option<&PlacedTile> {
        self.cells.get(&self.normalize(coord))
    }

    pub fn try_get_tile_mut(&mut self, coord: GridCoord) -> Option<&mut PlacedTile> {
        let coord = self.normalize(coord);
        self.cells.get_mut(&coord)
    }

    /// Iterate occupied cells in no particular order
    pub fn iter(&self) -> impl Iterator<Item = (GridCoord, &PlacedTile)> {
        self.cells.iter().map(|(c, t)| (*c, t))
    }

    /// Occupied cells in row-major coordinate order
    pub fn sorted_cells(&self) -> Vec<(GridCoord, &PlacedTile)> {
        let mut cells: Vec<_> = self.iter().collect();
        cells.sort_by_key(|(c, _)| *c);
        cells
    }

    /// Paint `definition` at `coord` and refresh the surrounding cells.
    pub fn set_tile<R>(
        &mut self,
        definition: &TileDefinition,
        coord: GridCoord,
        registry: &R,
    ) -> TileChange
    where
        R: TileRegistry + ?Sized,
    {
        let coord = self.normalize(coord);
        let id = definition.id;

        let mut placed = PlacedTile::new(id);
        placed.refresh(
            self.mask_at(coord, id),
            Some(definition),
            &self.selection,
            cell_salt(coord),
        );

        let previous = self.cells.insert(coord, placed);
        let mut released = None;
        match previous {
            Some(old) if old.tile == id => {}
            Some(old) => {
                if self.release(old.tile) {
                    released = Some(old.tile);
                }
                self.retain(id);
            }
            None => self.retain(id),
        }

        debug!("Placed tile '{}' at {}", definition.name, coord);
        self.refresh_neighbors(coord, registry, Some(definition));

        TileChange {
            coord,
            previous,
            released,
        }
    }

    /// Erase the tile at `coord`. Returns `None` if the cell was empty.
    pub fn remove_tile<R>(&mut self, coord: GridCoord, registry: &R) -> Option<TileChange>
    where
        R: TileRegistry + ?Sized,
    {
        let coord = self.normalize(coord);
        let removed = self.cells.remove(&coord)?;

        let released = self.release(removed.tile).then_some(removed.tile);
        debug!("Removed tile {} at {}", removed.tile, coord);
        self.refresh_neighbors(coord, registry, None);

        Some(TileChange {
            coord,
            previous: Some(removed),
            released,
        })
    }

    /// Paint every block touched by the inclusive rectangle `min..=max`
    pub fn fill_rect<R>(
        &mut self,
        definition: &TileDefinition,
        min: GridCoord,
        max: GridCoord,
        registry: &R,
    ) -> Vec<TileChange>
    where
        R: TileRegistry + ?Sized,
    {
        self.blocks_in_rect(min, max)
            .into_iter()
            .map(|coord| self.set_tile(definition, coord, registry))
            .collect()
    }

    /// Erase every block touched by the inclusive rectangle `min..=max`
    pub fn erase_rect<R>(&mut self, min: GridCoord, max: GridCoord, registry: &R) -> Vec<TileChange>
    where
        R: TileRegistry + ?Sized,
    {
        self.blocks_in_rect(min, max)
            .into_iter()
            .filter_map(|coord| self.remove_tile(coord, registry))
            .collect()
    }

    /// Remove every cell. Returns the definitions that were referenced.
    pub fn clear(&mut self) -> Vec<Uuid> {
        self.cells.clear();
        let released = self.ref_counts.keys().copied().collect();
        self.ref_counts.clear();
        released
    }

    /// Recompute the mask and texture of every cell.
    ///
    /// Call after a tile definition's variants were edited.
    pub fn refresh_all<R>(&mut self, registry: &R)
    where
        R: TileRegistry + ?Sized,
    {
        let coords: Vec<GridCoord> = self.cells.keys().copied().collect();
        for coord in coords {
            self.refresh_cell(coord, registry, None);
        }
    }

    /// Re-resolve the textures of cells painted with `tile`. Masks do not
    /// depend on a definition's contents, so only textures change.
    pub fn refresh_definition<R>(&mut self, tile: Uuid, registry: &R)
    where
        R: TileRegistry + ?Sized,
    {
        if !self.ref_counts.contains_key(&tile) {
            return;
        }
        let definition = registry.resolve(tile);
        if definition.is_none() {
            warn!("Tile definition {} missing from registry during refresh", tile);
        }
        let selection = self.selection;
        for (coord, placed) in self.cells.iter_mut() {
            if placed.tile == tile {
                placed.resolve_texture(definition, &selection, cell_salt(*coord));
            }
        }
    }

    /// Recompute the 8 cells around `coord`
    fn refresh_neighbors<R>(
        &mut self,
        coord: GridCoord,
        registry: &R,
        hint: Option<&TileDefinition>,
    ) where
        R: TileRegistry + ?Sized,
    {
        let step = self.step();
        for direction in tessera_autotile::Direction::ALL {
            let Some(neighbor) = direction.neighbor(coord, step) else {
                continue;
            };
            if self.cells.contains_key(&neighbor) {
                self.refresh_cell(neighbor, registry, hint);
            }
        }
    }

    fn refresh_cell<R>(&mut self, coord: GridCoord, registry: &R, hint: Option<&TileDefinition>)
    where
        R: TileRegistry + ?Sized,
    {
        let Some(tile) = self.cells.get(&coord).map(|t| t.tile) else {
            return;
        };
        let mask = self.mask_at(coord, tile);
        let definition = match hint {
            Some(def) if def.id == tile => Some(def),
            _ => registry.resolve(tile),
        };
        if definition.is_none() {
            warn!("Tile definition {} missing from registry, clearing texture at {}", tile, coord);
        }

        let selection = self.selection;
        if let Some(placed) = self.cells.get_mut(&coord) {
            placed.refresh(mask, definition, &selection, cell_salt(coord));
        }
    }

    /// Same-definition neighbors of a cell that holds (or will hold) `tile`
    fn mask_at(&self, coord: GridCoord, tile: Uuid) -> NeighborMask {
        NeighborMask::from_fn(coord, self.step(), |c| {
            self.cells.get(&c).map_or(false, |t| t.tile == tile)
        })
    }

    fn step(&self) -> (i32, i32) {
        (self.block.width.max(1), self.block.height.max(1))
    }

    fn blocks_in_rect(&self, min: GridCoord, max: GridCoord) -> BTreeSet<GridCoord> {
        let (x0, x1) = (min.x.min(max.x), min.x.max(max.x));
        let (y0, y1) = (min.y.min(max.y), min.y.max(max.y));
        let mut blocks = BTreeSet::new();
        for y in y0..=y1 {
            for x in x0..=x1 {
                blocks.insert(self.normalize(GridCoord::new(x, y)));
            }
        }
        blocks
    }

    fn retain(&mut self, tile: Uuid) {
        *self.ref_counts.entry(tile).or_insert(0) += 1;
    }

    /// Drop one reference. Returns true when the last one went away.
    fn release(&mut self, tile: Uuid) -> bool {
        match self.ref_counts.get_mut(&tile) {
            Some(count) if *count > 1 => {
                *count -= 1;
                false
            }
            Some(_) => {
                self.ref_counts.remove(&tile);
                debug!("Tile definition {} is no longer referenced", tile);
                true
            }
            None => {
                warn!("Reference count for tile {} was already zero", tile);
                false
            }
        }
    }

    /// Insert a cell read from disk without touching its stored mask
    pub(crate) fn insert_loaded(&mut self, coord: GridCoord, placed: PlacedTile) {
        let tile = placed.tile;
        if let Some(old) = self.cells.insert(coord, placed) {
            self.release(old.tile);
        }
        self.retain(tile);
    }
}
