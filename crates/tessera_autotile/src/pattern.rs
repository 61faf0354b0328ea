//! Pattern classification
//!
//! Maps a [`NeighborMask`] to the visual category a tile should draw.
//!
//! Category names describe the *open* side of a tile, not the direction of its
//! neighbors: a tile whose only same-definition neighbor is to the east is open
//! on its left side, so it classifies as [`AutoTileCategory::SingleLeft`].

use crate::neighbors::{Direction, NeighborMask};
use serde::{Deserialize, Serialize};

/// Categories of the 3x3 blob autotile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AutoTileCategory {
    Solo,
    SingleLeft,
    SingleRight,
    SingleTop,
    SingleBot,
    HorizontalMiddle,
    VerticalMiddle,
    TopLeft,
    TopRight,
    MidRight,
    MidLeft,
    TopMid,
    BotLeft,
    BotRight,
    BotMid,
    InnerBotLeft,
    InnerBotRight,
    InnerTopLeft,
    InnerTopRight,
    Center,
}

impl AutoTileCategory {
    pub const ALL: [AutoTileCategory; 20] = [
        AutoTileCategory::Solo,
        AutoTileCategory::SingleLeft,
        AutoTileCategory::SingleRight,
        AutoTileCategory::SingleTop,
        AutoTileCategory::SingleBot,
        AutoTileCategory::HorizontalMiddle,
        AutoTileCategory::VerticalMiddle,
        AutoTileCategory::TopLeft,
        AutoTileCategory::TopRight,
        AutoTileCategory::MidRight,
        AutoTileCategory::MidLeft,
        AutoTileCategory::TopMid,
        AutoTileCategory::BotLeft,
        AutoTileCategory::BotRight,
        AutoTileCategory::BotMid,
        AutoTileCategory::InnerBotLeft,
        AutoTileCategory::InnerBotRight,
        AutoTileCategory::InnerTopLeft,
        AutoTileCategory::InnerTopRight,
        AutoTileCategory::Center,
    ];

    /// Display name for the category
    pub fn name(self) -> &'static str {
        match self {
            AutoTileCategory::Solo => "Solo",
            AutoTileCategory::SingleLeft => "Single Left",
            AutoTileCategory::SingleRight => "Single Right",
            AutoTileCategory::SingleTop => "Single Top",
            AutoTileCategory::SingleBot => "Single Bottom",
            AutoTileCategory::HorizontalMiddle => "Horizontal Middle",
            AutoTileCategory::VerticalMiddle => "Vertical Middle",
            AutoTileCategory::TopLeft => "Top-Left",
            AutoTileCategory::TopRight => "Top-Right",
            AutoTileCategory::MidRight => "Middle-Right",
            AutoTileCategory::MidLeft => "Middle-Left",
            AutoTileCategory::TopMid => "Top-Middle",
            AutoTileCategory::BotLeft => "Bottom-Left",
            AutoTileCategory::BotRight => "Bottom-Right",
            AutoTileCategory::BotMid => "Bottom-Middle",
            AutoTileCategory::InnerBotLeft => "Inner Bottom-Left",
            AutoTileCategory::InnerBotRight => "Inner Bottom-Right",
            AutoTileCategory::InnerTopLeft => "Inner Top-Left",
            AutoTileCategory::InnerTopRight => "Inner Top-Right",
            AutoTileCategory::Center => "Center",
        }
    }
}

/// Categories of the 1xN wall autotile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AutoWallCategory {
    Solo,
    Left,
    Center,
    Right,
}

impl AutoWallCategory {
    pub const ALL: [AutoWallCategory; 4] = [
        AutoWallCategory::Solo,
        AutoWallCategory::Left,
        AutoWallCategory::Center,
        AutoWallCategory::Right,
    ];

    pub fn name(self) -> &'static str {
        match self {
            AutoWallCategory::Solo => "Solo",
            AutoWallCategory::Left => "Left End",
            AutoWallCategory::Center => "Center",
            AutoWallCategory::Right => "Right End",
        }
    }
}

/// A classified category from any pattern strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PatternCategory {
    Simple,
    AutoTile(AutoTileCategory),
    AutoWall(AutoWallCategory),
}

impl PatternCategory {
    pub fn name(self) -> &'static str {
        match self {
            PatternCategory::Simple => "Simple",
            PatternCategory::AutoTile(c) => c.name(),
            PatternCategory::AutoWall(c) => c.name(),
        }
    }
}

/// Classify a neighbor mask for the 3x3 blob autotile.
///
/// Rules are checked in order and the first match wins.
pub fn classify_autotile(mask: NeighborMask) -> AutoTileCategory {
    use AutoTileCategory::*;

    let n = mask.contains(Direction::North);
    let e = mask.contains(Direction::East);
    let s = mask.contains(Direction::South);
    let w = mask.contains(Direction::West);

    let straight = mask.count_straight();
    let diag = mask.count_diagonal();

    if straight + diag == 0 {
        return Solo;
    }

    if straight == 1 {
        if e {
            return SingleLeft;
        }
        if w {
            return SingleRight;
        }
        if s {
            return SingleTop;
        }
        return SingleBot;
    }

    if straight == 2 {
        if w && e {
            return HorizontalMiddle;
        }
        if n && s {
            return VerticalMiddle;
        }
    }

    match (e, s, n, w) {
        (true, true, false, false) => return TopLeft,
        (false, true, false, true) => return TopRight,
        (false, true, true, true) => return MidRight,
        (true, true, true, false) => return MidLeft,
        (true, true, false, true) => return TopMid,
        (true, false, true, false) => return BotLeft,
        (false, false, true, true) => return BotRight,
        (true, false, true, true) => return BotMid,
        _ => {}
    }

    if e && n && w && diag >= 3 {
        if !mask.contains(Direction::NorthEast) {
            return InnerBotLeft;
        }
        if !mask.contains(Direction::NorthWest) {
            return InnerBotRight;
        }
        if !mask.contains(Direction::SouthEast) {
            return InnerTopLeft;
        }
        if !mask.contains(Direction::SouthWest) {
            return InnerTopRight;
        }
    }

    Center
}

/// Classify a neighbor mask for the 1xN wall autotile. Only east and west count.
pub fn classify_autowall(mask: NeighborMask) -> AutoWallCategory {
    let e = mask.contains(Direction::East);
    let w = mask.contains(Direction::West);

    match (w, e) {
        (true, true) => AutoWallCategory::Center,
        (true, false) => AutoWallCategory::Right,
        (false, true) => AutoWallCategory::Left,
        (false, false) => AutoWallCategory::Solo,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::neighbors::bits::*;

    fn tile(bits: u8) -> AutoTileCategory {
        classify_autotile(NeighborMask(bits))
    }

    #[test]
    fn test_every_mask_classifies_deterministically() {
        for bits in 0..=255u8 {
            let first = tile(bits);
            assert!(AutoTileCategory::ALL.contains(&first));
            assert_eq!(first, tile(bits));
            assert!(AutoWallCategory::ALL.contains(&classify_autowall(NeighborMask(bits))));
        }
    }

    #[test]
    fn test_every_autotile_category_is_reachable() {
        let mut seen: Vec<AutoTileCategory> = (0..=255u8).map(tile).collect();
        seen.sort();
        seen.dedup();
        assert_eq!(seen.len(), AutoTileCategory::ALL.len());
    }

    #[test]
    fn test_solo_and_full() {
        assert_eq!(tile(0), AutoTileCategory::Solo);
        assert_eq!(tile(0xFF), AutoTileCategory::Center);
    }

    #[test]
    fn test_single_neighbor_names_the_open_side() {
        assert_eq!(tile(E), AutoTileCategory::SingleLeft);
        assert_eq!(tile(W), AutoTileCategory::SingleRight);
        assert_eq!(tile(S), AutoTileCategory::SingleTop);
        assert_eq!(tile(N), AutoTileCategory::SingleBot);
        // Diagonals do not change a single straight neighbor
        assert_eq!(tile(E | NE | SW), AutoTileCategory::SingleLeft);
    }

    #[test]
    fn test_straight_through() {
        assert_eq!(tile(W | E), AutoTileCategory::HorizontalMiddle);
        assert_eq!(tile(N | S | NE), AutoTileCategory::VerticalMiddle);
    }

    #[test]
    fn test_outer_corners_and_edges() {
        assert_eq!(tile(E | S), AutoTileCategory::TopLeft);
        assert_eq!(tile(S | W), AutoTileCategory::TopRight);
        assert_eq!(tile(S | N | W), AutoTileCategory::MidRight);
        assert_eq!(tile(E | S | N), AutoTileCategory::MidLeft);
        assert_eq!(tile(E | S | W), AutoTileCategory::TopMid);
        assert_eq!(tile(E | N), AutoTileCategory::BotLeft);
        assert_eq!(tile(N | W), AutoTileCategory::BotRight);
        assert_eq!(tile(E | N | W), AutoTileCategory::BotMid);
    }

    #[test]
    fn test_inner_corners_by_missing_diagonal() {
        let all = N | E | S | W;
        assert_eq!(tile(all | SE | SW | NW), AutoTileCategory::InnerBotLeft);
        assert_eq!(tile(all | NE | SE | SW), AutoTileCategory::InnerBotRight);
        assert_eq!(tile(all | NE | SW | NW), AutoTileCategory::InnerTopLeft);
        assert_eq!(tile(all | NE | SE | NW), AutoTileCategory::InnerTopRight);
    }

    #[test]
    fn test_fallthrough_is_center() {
        // Only diagonals: no straight rule matches
        assert_eq!(tile(NE | SW), AutoTileCategory::Center);
        // All straight with too few diagonals
        assert_eq!(tile(N | E | S | W | NE), AutoTileCategory::Center);
    }

    #[test]
    fn test_autowall_uses_horizontal_neighbors_only() {
        assert_eq!(classify_autowall(NeighborMask(W | E)), AutoWallCategory::Center);
        assert_eq!(classify_autowall(NeighborMask(W | N)), AutoWallCategory::Right);
        assert_eq!(classify_autowall(NeighborMask(E | S)), AutoWallCategory::Left);
        assert_eq!(classify_autowall(NeighborMask(N | S | NE)), AutoWallCategory::Solo);
    }
}
