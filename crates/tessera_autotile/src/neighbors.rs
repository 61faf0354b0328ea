//! Neighbor adjacency masks
//!
//! One bit per compass direction, set when the neighbor in that direction
//! holds the same tile definition as the cell being evaluated.

use std::fmt;
use tessera_core::GridCoord;

/// Neighbor direction flags for bitmask calculation
pub mod bits {
    pub const N: u8 = 0b0000_0001;  // North
    pub const NE: u8 = 0b0000_0010; // Northeast (corner)
    pub const E: u8 = 0b0000_0100;  // East
    pub const SE: u8 = 0b0000_1000; // Southeast (corner)
    pub const S: u8 = 0b0001_0000;  // South
    pub const SW: u8 = 0b0010_0000; // Southwest (corner)
    pub const W: u8 = 0b0100_0000;  // West
    pub const NW: u8 = 0b1000_0000; // Northwest (corner)

    pub const STRAIGHT: u8 = N | E | S | W;
    pub const DIAGONAL: u8 = NE | SE | SW | NW;
}

/// The eight compass directions, clockwise from north
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    North,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
    West,
    NorthWest,
}

impl Direction {
    pub const ALL: [Direction; 8] = [
        Direction::North,
        Direction::NorthEast,
        Direction::East,
        Direction::SouthEast,
        Direction::South,
        Direction::SouthWest,
        Direction::West,
        Direction::NorthWest,
    ];

    /// The mask bit for this direction
    pub fn bit(self) -> u8 {
        match self {
            Direction::North => bits::N,
            Direction::NorthEast => bits::NE,
            Direction::East => bits::E,
            Direction::SouthEast => bits::SE,
            Direction::South => bits::S,
            Direction::SouthWest => bits::SW,
            Direction::West => bits::W,
            Direction::NorthWest => bits::NW,
        }
    }

    /// Unit offset in grid space.
    ///
    /// North is `y - 1`. The horizontal axis is mirrored: east is `x - 1`, so a
    /// tile with a neighbor only at `x + 1` sees it to the west and draws its
    /// right-hand end piece.
    pub fn offset(self) -> (i32, i32) {
        match self {
            Direction::North => (0, -1),
            Direction::NorthEast => (-1, -1),
            Direction::East => (-1, 0),
            Direction::SouthEast => (-1, 1),
            Direction::South => (0, 1),
            Direction::SouthWest => (1, 1),
            Direction::West => (1, 0),
            Direction::NorthWest => (1, -1),
        }
    }

    /// Neighbor of `coord` in this direction, `step` cells per unit offset.
    ///
    /// `None` when the neighbor lies outside the `i32` range. The grid does
    /// not wrap, so such a cell simply has no neighbor on that side.
    pub fn neighbor(self, coord: GridCoord, step: (i32, i32)) -> Option<GridCoord> {
        let (dx, dy) = self.offset();
        coord.checked_offset(dx.checked_mul(step.0)?, dy.checked_mul(step.1)?)
    }
}

/// 8-bit set of same-definition neighbors
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct NeighborMask(pub u8);

impl NeighborMask {
    pub const EMPTY: Self = NeighborMask(0);
    pub const FULL: Self = NeighborMask(0xFF);

    pub fn bits(self) -> u8 {
        self.0
    }

    pub fn contains(self, direction: Direction) -> bool {
        self.0 & direction.bit() != 0
    }

    pub fn with(self, direction: Direction) -> Self {
        NeighborMask(self.0 | direction.bit())
    }

    /// Number of orthogonal neighbors present (N, E, S, W)
    pub fn count_straight(self) -> u32 {
        (self.0 & bits::STRAIGHT).count_ones()
    }

    /// Number of diagonal neighbors present (NE, SE, SW, NW)
    pub fn count_diagonal(self) -> u32 {
        (self.0 & bits::DIAGONAL).count_ones()
    }

    /// Calculate the mask around `coord` by probing each neighbor with `is_same`.
    ///
    /// `step` is the distance between adjacent cells on each axis, which is
    /// larger than one when the grid stores macro-tile blocks.
    pub fn from_fn<F>(coord: GridCoord, step: (i32, i32), mut is_same: F) -> Self
    where
        F: FnMut(GridCoord) -> bool,
    {
        let mut mask = 0u8;
        for direction in Direction::ALL {
            if direction.neighbor(coord, step).is_some_and(&mut is_same) {
                mask |= direction.bit();
            }
        }
        NeighborMask(mask)
    }
}

impl From<u8> for NeighborMask {
    fn from(bits: u8) -> Self {
        NeighborMask(bits)
    }
}

impl fmt::Debug for NeighborMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NeighborMask({:#010b})", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_bits_cover_the_byte() {
        let all = Direction::ALL.iter().fold(0u8, |acc, d| acc | d.bit());
        assert_eq!(all, 0xFF);
        assert_eq!(bits::STRAIGHT | bits::DIAGONAL, 0xFF);
    }

    #[test]
    fn test_from_fn_marks_matching_neighbors() {
        let origin = GridCoord::new(3, 3);
        let mask = NeighborMask::from_fn(origin, (1, 1), |c| {
            c == GridCoord::new(4, 3) || c == GridCoord::new(2, 2)
        });
        assert_eq!(mask.bits(), bits::W | bits::NE);
        assert_eq!(mask.count_straight(), 1);
        assert_eq!(mask.count_diagonal(), 1);
    }

    #[test]
    fn test_horizontal_axis_is_mirrored() {
        let origin = GridCoord::ZERO;
        assert_eq!(Direction::East.neighbor(origin, (1, 1)), Some(GridCoord::new(-1, 0)));
        assert_eq!(Direction::West.neighbor(origin, (1, 1)), Some(GridCoord::new(1, 0)));
        assert_eq!(Direction::SouthWest.neighbor(origin, (1, 1)), Some(GridCoord::new(1, 1)));
    }

    #[test]
    fn test_neighbors_do_not_wrap_at_range_edges() {
        let right_edge = GridCoord::new(i32::MAX, 0);
        assert_eq!(Direction::West.neighbor(right_edge, (1, 1)), None);
        assert_eq!(Direction::NorthWest.neighbor(right_edge, (1, 1)), None);
        assert_eq!(
            Direction::East.neighbor(right_edge, (1, 1)),
            Some(GridCoord::new(i32::MAX - 1, 0))
        );

        let corner = GridCoord::new(i32::MIN, i32::MIN);
        assert_eq!(Direction::East.neighbor(corner, (1, 1)), None);
        assert_eq!(Direction::North.neighbor(corner, (1, 1)), None);
        assert_eq!(
            Direction::SouthWest.neighbor(corner, (1, 1)),
            Some(GridCoord::new(i32::MIN + 1, i32::MIN + 1))
        );

        // Only in-range neighbors reach the predicate
        let mut checked = 0;
        let mask = NeighborMask::from_fn(corner, (1, 1), |_| {
            checked += 1;
            true
        });
        assert_eq!(checked, 3);
        assert_eq!(mask.bits(), bits::S | bits::W | bits::SW);
    }

    #[test]
    fn test_from_fn_uses_block_step() {
        let mask = NeighborMask::from_fn(GridCoord::ZERO, (2, 3), |c| c == GridCoord::new(0, -3));
        assert!(mask.contains(Direction::North));
        assert_eq!(mask.count_straight() + mask.count_diagonal(), 1);
    }
}
