//! Pattern strategies
//!
//! A strategy decides which category a tile falls into for a given neighbor
//! mask and stores the texture slot for each category.

use crate::neighbors::NeighborMask;
use crate::pattern::{
    classify_autotile, classify_autowall, AutoTileCategory, AutoWallCategory, PatternCategory,
};
use crate::slot::{TileSlot, TileVariant, VariantSelection};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tessera_core::TextureRef;
use thiserror::Error;

/// Errors from editing a strategy's slots
#[derive(Debug, Error, PartialEq)]
pub enum DefinitionError {
    #[error("category '{category}' does not belong to a {kind:?} strategy")]
    CategoryMismatch {
        category: &'static str,
        kind: PatternKind,
    },
    #[error("variant weight must be finite and non-negative, got {0}")]
    InvalidWeight(f32),
}

/// Which strategy a tile definition uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternKind {
    /// One texture regardless of neighbors
    Simple,
    /// 3x3 blob autotile with 20 categories
    AutoTile,
    /// 1xN wall autotile with 4 categories
    AutoWall,
}

/// Classification and variant storage for a tile definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PatternStrategy {
    Simple {
        #[serde(default)]
        slot: TileSlot,
    },
    AutoTile {
        #[serde(default)]
        slots: BTreeMap<AutoTileCategory, TileSlot>,
    },
    AutoWall {
        #[serde(default)]
        slots: BTreeMap<AutoWallCategory, TileSlot>,
    },
}

impl Default for PatternStrategy {
    fn default() -> Self {
        PatternStrategy::Simple {
            slot: TileSlot::default(),
        }
    }
}

impl PatternStrategy {
    /// An empty strategy of the given kind
    pub fn new(kind: PatternKind) -> Self {
        match kind {
            PatternKind::Simple => PatternStrategy::Simple {
                slot: TileSlot::default(),
            },
            PatternKind::AutoTile => PatternStrategy::AutoTile {
                slots: BTreeMap::new(),
            },
            PatternKind::AutoWall => PatternStrategy::AutoWall {
                slots: BTreeMap::new(),
            },
        }
    }

    pub fn kind(&self) -> PatternKind {
        match self {
            PatternStrategy::Simple { .. } => PatternKind::Simple,
            PatternStrategy::AutoTile { .. } => PatternKind::AutoTile,
            PatternStrategy::AutoWall { .. } => PatternKind::AutoWall,
        }
    }

    /// Classify a neighbor mask into one of this strategy's categories
    pub fn classify(&self, mask: NeighborMask) -> PatternCategory {
        match self {
            PatternStrategy::Simple { .. } => PatternCategory::Simple,
            PatternStrategy::AutoTile { .. } => PatternCategory::AutoTile(classify_autotile(mask)),
            PatternStrategy::AutoWall { .. } => PatternCategory::AutoWall(classify_autowall(mask)),
        }
    }

    /// Every category this strategy can produce
    pub fn categories(&self) -> Vec<PatternCategory> {
        match self {
            PatternStrategy::Simple { .. } => vec![PatternCategory::Simple],
            PatternStrategy::AutoTile { .. } => AutoTileCategory::ALL
                .iter()
                .map(|c| PatternCategory::AutoTile(*c))
                .collect(),
            PatternStrategy::AutoWall { .. } => AutoWallCategory::ALL
                .iter()
                .map(|c| PatternCategory::AutoWall(*c))
                .collect(),
        }
    }

    /// Get the slot for a category, if one has been populated
    pub fn slot(&self, category: PatternCategory) -> Option<&TileSlot> {
        match (self, category) {
            (PatternStrategy::Simple { slot }, PatternCategory::Simple) => Some(slot),
            (PatternStrategy::AutoTile { slots }, PatternCategory::AutoTile(c)) => slots.get(&c),
            (PatternStrategy::AutoWall { slots }, PatternCategory::AutoWall(c)) => slots.get(&c),
            _ => None,
        }
    }

    fn slot_mut(&mut self, category: PatternCategory) -> Result<&mut TileSlot, DefinitionError> {
        let kind = self.kind();
        match (self, category) {
            (PatternStrategy::Simple { slot }, PatternCategory::Simple) => Ok(slot),
            (PatternStrategy::AutoTile { slots }, PatternCategory::AutoTile(c)) => {
                Ok(slots.entry(c).or_default())
            }
            (PatternStrategy::AutoWall { slots }, PatternCategory::AutoWall(c)) => {
                Ok(slots.entry(c).or_default())
            }
            (_, category) => Err(DefinitionError::CategoryMismatch {
                category: category.name(),
                kind,
            }),
        }
    }

    /// Append a weighted texture variant to a category's slot
    pub fn add_variant(
        &mut self,
        category: PatternCategory,
        texture: TextureRef,
        weight: f32,
    ) -> Result<(), DefinitionError> {
        if !weight.is_finite() || weight < 0.0 {
            return Err(DefinitionError::InvalidWeight(weight));
        }
        self.slot_mut(category)?.push(texture, weight);
        Ok(())
    }

    /// Remove a variant from a category's slot
    pub fn remove_variant(
        &mut self,
        category: PatternCategory,
        index: usize,
    ) -> Result<Option<TileVariant>, DefinitionError> {
        Ok(self.slot_mut(category)?.remove(index))
    }

    /// Pick the texture to draw for a category
    pub fn resolve_variant(
        &self,
        category: PatternCategory,
        selection: &VariantSelection,
        salt: u64,
    ) -> Option<&TextureRef> {
        let slot = self.slot(category)?;
        selection.pick(slot, salt).map(|v| &v.texture)
    }

    /// Classify `mask` and pick the texture for the resulting category
    pub fn resolve_for_mask(
        &self,
        mask: NeighborMask,
        selection: &VariantSelection,
        salt: u64,
    ) -> Option<&TextureRef> {
        self.resolve_variant(self.classify(mask), selection, salt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::neighbors::bits;
    use uuid::Uuid;

    #[test]
    fn test_simple_ignores_mask() {
        let strategy = PatternStrategy::new(PatternKind::Simple);
        for raw in [0u8, bits::E, 0xFF] {
            assert_eq!(strategy.classify(NeighborMask(raw)), PatternCategory::Simple);
        }
        assert_eq!(strategy.categories().len(), 1);
    }

    #[test]
    fn test_category_counts() {
        assert_eq!(PatternStrategy::new(PatternKind::AutoTile).categories().len(), 20);
        assert_eq!(PatternStrategy::new(PatternKind::AutoWall).categories().len(), 4);
    }

    #[test]
    fn test_add_variant_rejects_foreign_category() {
        let mut strategy = PatternStrategy::new(PatternKind::AutoWall);
        let err = strategy
            .add_variant(
                PatternCategory::AutoTile(AutoTileCategory::Solo),
                TextureRef::whole(Uuid::new_v4()),
                1.0,
            )
            .unwrap_err();
        assert!(matches!(
            err,
            DefinitionError::CategoryMismatch {
                kind: PatternKind::AutoWall,
                ..
            }
        ));
    }

    #[test]
    fn test_add_variant_rejects_bad_weight() {
        let mut strategy = PatternStrategy::new(PatternKind::Simple);
        let texture = TextureRef::whole(Uuid::new_v4());
        assert!(strategy
            .add_variant(PatternCategory::Simple, texture, f32::NAN)
            .is_err());
        assert!(strategy
            .add_variant(PatternCategory::Simple, texture, -1.0)
            .is_err());
    }

    #[test]
    fn test_resolve_picks_last_variant() {
        let sheet = Uuid::new_v4();
        let mut strategy = PatternStrategy::new(PatternKind::AutoTile);
        let solo = PatternCategory::AutoTile(AutoTileCategory::Solo);
        strategy.add_variant(solo, TextureRef::new(sheet, 0), 5.0).unwrap();
        strategy.add_variant(solo, TextureRef::new(sheet, 1), 1.0).unwrap();

        let texture = strategy
            .resolve_for_mask(NeighborMask::EMPTY, &VariantSelection::Last, 0)
            .unwrap();
        assert_eq!(texture.frame, 1);

        // No slot populated for Center
        assert!(strategy
            .resolve_for_mask(NeighborMask::FULL, &VariantSelection::Last, 0)
            .is_none());
    }

    #[test]
    fn test_remove_variant() {
        let mut strategy = PatternStrategy::new(PatternKind::Simple);
        let texture = TextureRef::whole(Uuid::new_v4());
        strategy.add_variant(PatternCategory::Simple, texture, 1.0).unwrap();
        let removed = strategy.remove_variant(PatternCategory::Simple, 0).unwrap();
        assert_eq!(removed.map(|v| v.texture), Some(texture));
        assert!(strategy.slot(PatternCategory::Simple).unwrap().is_empty());
    }

    #[test]
    fn test_strategy_json_round_trip() {
        let mut strategy = PatternStrategy::new(PatternKind::AutoWall);
        strategy
            .add_variant(
                PatternCategory::AutoWall(AutoWallCategory::Left),
                TextureRef::new(Uuid::new_v4(), 3),
                2.0,
            )
            .unwrap();
        let json = serde_json::to_string(&strategy).unwrap();
        assert!(json.contains(r#""kind":"auto_wall""#));
        let parsed: PatternStrategy = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, strategy);
    }
}
