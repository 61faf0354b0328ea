//! Tile slots and variant selection

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tessera_core::TextureRef;

/// One weighted texture choice within a slot
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TileVariant {
    pub texture: TextureRef,
    #[serde(default = "default_weight")]
    pub weight: f32,
}

fn default_weight() -> f32 {
    1.0
}

/// Ordered list of texture variants drawn for one pattern category
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TileSlot {
    #[serde(default)]
    pub variants: Vec<TileVariant>,
}

impl TileSlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, texture: TextureRef, weight: f32) {
        self.variants.push(TileVariant { texture, weight });
    }

    pub fn is_empty(&self) -> bool {
        self.variants.is_empty()
    }

    pub fn len(&self) -> usize {
        self.variants.len()
    }

    /// Remove the variant at `index`
    pub fn remove(&mut self, index: usize) -> Option<TileVariant> {
        if index < self.variants.len() {
            Some(self.variants.remove(index))
        } else {
            None
        }
    }
}

/// How a slot with several variants picks the one to draw
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum VariantSelection {
    /// Always the last variant in the slot. Weights are kept but ignored.
    #[default]
    Last,
    /// Weighted choice, stable for a given seed and cell
    Weighted { seed: u64 },
}

impl VariantSelection {
    /// Pick a variant from `slot`. `salt` identifies the cell being drawn so
    /// weighted picks stay put across refreshes.
    pub fn pick<'a>(&self, slot: &'a TileSlot, salt: u64) -> Option<&'a TileVariant> {
        match *self {
            VariantSelection::Last => slot.variants.last(),
            VariantSelection::Weighted { seed } => {
                let mut rng = SmallRng::seed_from_u64(seed ^ salt);
                select_weighted(&slot.variants, &mut rng).or_else(|| slot.variants.last())
            }
        }
    }
}

/// Weighted random selection over `variants`. Non-positive weights are never
/// chosen; returns `None` when no variant has a positive weight.
fn select_weighted<'a>(variants: &'a [TileVariant], rng: &mut impl Rng) -> Option<&'a TileVariant> {
    let total: f32 = variants
        .iter()
        .filter(|v| v.weight > 0.0)
        .map(|v| v.weight)
        .sum();
    if total <= 0.0 || !total.is_finite() {
        return None;
    }

    let mut pick = rng.gen_range(0.0..total);
    let mut last_positive = None;
    for variant in variants.iter().filter(|v| v.weight > 0.0) {
        if pick < variant.weight {
            return Some(variant);
        }
        pick -= variant.weight;
        last_positive = Some(variant);
    }

    // Float rounding can leave `pick` just past the final weight
    last_positive
}
