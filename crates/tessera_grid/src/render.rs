//! Feeding placed tiles to a renderer
//!
//! The grid never draws anything itself. [`render_grid`] walks the occupied
//! cells, resolves each cached texture through a [`TextureProvider`] and hands
//! the world transform plus handle to a [`TileRenderer`].

use crate::grid::TileGrid;
use tessera_core::{BlockSize, GridCoord, TextureProvider, TileTransform};
use tracing::trace;

/// Receives one draw call per visible cell
pub trait TileRenderer<H> {
    fn draw(&mut self, transform: TileTransform, handle: &H);
}

impl<H, F> TileRenderer<H> for F
where
    F: FnMut(TileTransform, &H),
{
    fn draw(&mut self, transform: TileTransform, handle: &H) {
        self(transform, handle)
    }
}

/// Inclusive rectangle of grid cells to draw
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewRect {
    pub min: GridCoord,
    pub max: GridCoord,
}

impl ViewRect {
    pub fn new(a: GridCoord, b: GridCoord) -> Self {
        Self {
            min: GridCoord::new(a.x.min(b.x), a.y.min(b.y)),
            max: GridCoord::new(a.x.max(b.x), a.y.max(b.y)),
        }
    }

    /// Whether any cell of the block stored at `origin` falls inside the view
    pub fn overlaps_block(&self, origin: GridCoord, block: BlockSize) -> bool {
        let right = origin.x.saturating_add(block.width - 1);
        let bottom = origin.y.saturating_add(block.height - 1);
        origin.x <= self.max.x
            && right >= self.min.x
            && origin.y <= self.max.y
            && bottom >= self.min.y
    }
}

/// Counts from one [`render_grid`] pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderStats {
    /// Cells handed to the renderer
    pub drawn: usize,
    /// Visible cells with no texture, or one the provider could not resolve
    pub missing_texture: usize,
    /// Cells outside the view
    pub culled: usize,
}

/// Draw every cell of `grid` inside `view` (all cells when `view` is `None`).
///
/// Cells are visited in row-major order so output is stable between frames.
pub fn render_grid<P, R>(
    grid: &TileGrid,
    provider: &P,
    renderer: &mut R,
    tile_size: f32,
    view: Option<ViewRect>,
) -> RenderStats
where
    P: TextureProvider + ?Sized,
    R: TileRenderer<P::Handle> + ?Sized,
{
    let block = grid.block_size();
    let mut stats = RenderStats::default();

    for (coord, placed) in grid.sorted_cells() {
        if view.is_some_and(|v| !v.overlaps_block(coord, block)) {
            stats.culled += 1;
            continue;
        }

        let Some(handle) = placed.texture.as_ref().and_then(|t| provider.resolve(t)) else {
            stats.missing_texture += 1;
            continue;
        };

        renderer.draw(TileTransform::for_cell(coord, block, tile_size), &handle);
        stats.drawn += 1;
    }

    trace!(
        "Rendered grid '{}': {} drawn, {} missing, {} culled",
        grid.name(),
        stats.drawn,
        stats.missing_texture,
        stats.culled
    );
    stats
}

/// Grid cell under a world-space point, inverse of [`TileTransform::for_cell`]
/// for 1x1 blocks. Use [`TileGrid::normalize`] to find the owning block.
pub fn world_to_cell(world: [f32; 2], tile_size: f32) -> GridCoord {
    GridCoord::new(
        (world[0] / tile_size).floor() as i32,
        (-world[1] / tile_size).floor() as i32,
    )
}
