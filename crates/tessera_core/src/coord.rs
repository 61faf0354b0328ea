//! Grid coordinates and macro-tile blocks

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// A cell position on the sparse, logically infinite tile grid.
///
/// `y` grows downward: north of `(x, y)` is `(x, y - 1)`. Coordinates order
/// row-major (`y` first, then `x`), which is the order cells are written to disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct GridCoord {
    pub x: i32,
    pub y: i32,
}

impl GridCoord {
    pub const ZERO: Self = Self { x: 0, y: 0 };

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Offset this coordinate by `(dx, dy)`, or `None` past the edge of the
    /// `i32` range
    pub fn checked_offset(self, dx: i32, dy: i32) -> Option<Self> {
        Some(Self {
            x: self.x.checked_add(dx)?,
            y: self.y.checked_add(dy)?,
        })
    }
}

impl Ord for GridCoord {
    fn cmp(&self, other: &Self) -> Ordering {
        self.y.cmp(&other.y).then(self.x.cmp(&other.x))
    }
}

impl PartialOrd for GridCoord {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl From<(i32, i32)> for GridCoord {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

impl From<GridCoord> for (i32, i32) {
    fn from(coord: GridCoord) -> Self {
        (coord.x, coord.y)
    }
}

impl fmt::Display for GridCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Macro-tile dimensions: one logical placement covers a `width` x `height` block.
///
/// Both dimensions are at least 1. A 1x1 block is the ordinary per-cell grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BlockSize {
    pub width: i32,
    pub height: i32,
}

impl Default for BlockSize {
    fn default() -> Self {
        Self::ONE
    }
}

impl BlockSize {
    pub const ONE: Self = Self {
        width: 1,
        height: 1,
    };

    /// Create a block size, or `None` if either dimension is below 1
    pub fn new(width: i32, height: i32) -> Option<Self> {
        if width >= 1 && height >= 1 {
            Some(Self { width, height })
        } else {
            None
        }
    }

    /// Whether this is the plain 1x1 grid
    pub fn is_unit(&self) -> bool {
        self.width == 1 && self.height == 1
    }

    /// Snap a requested coordinate to the origin of the block containing it.
    ///
    /// Negative components are first shifted by `1 - size` so blocks on the
    /// negative side of the origin line up with the ones on the positive side
    /// (with 2x2 blocks, -1 and -2 share a block, as do 0 and 1). The remainder
    /// of the shifted magnitude, carrying the component's sign, is then
    /// subtracted.
    pub fn align(&self, coord: GridCoord) -> GridCoord {
        if self.is_unit() {
            return coord;
        }

        GridCoord {
            x: align_component(coord.x, self.width),
            y: align_component(coord.y, self.height),
        }
    }
}

fn align_component(value: i32, size: i32) -> i32 {
    if size <= 1 {
        return value;
    }

    let mut value = value;
    if value < 0 {
        value = value.saturating_add(1 - size);
    }

    let mut offset = (value.unsigned_abs() % size as u32) as i32;
    if value < 0 {
        offset = -offset;
    }

    value - offset
}
