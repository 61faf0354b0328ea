//! Grid settings stored as TOML

use crate::grid::TileGrid;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tessera_autotile::VariantSelection;
use tessera_core::BlockSize;
use thiserror::Error;

/// Default edge length of one cell in world units
pub const DEFAULT_TILE_SIZE: f32 = 16.0;

/// Error type for settings and project files
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("Invalid block size {width}x{height}")]
    InvalidBlockSize { width: i32, height: i32 },
}

/// How new grids are laid out and drawn
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridSettings {
    /// World units per cell
    pub tile_size: f32,
    /// Macro-tile dimensions for placements
    pub block: BlockSize,
    pub variant_selection: VariantSelection,
}

impl Default for GridSettings {
    fn default() -> Self {
        Self {
            tile_size: DEFAULT_TILE_SIZE,
            block: BlockSize::ONE,
            variant_selection: VariantSelection::default(),
        }
    }
}

impl GridSettings {
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let settings: Self = toml::from_str(content)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Block dimensions below 1 deserialize fine but are rejected here
    pub fn validate(&self) -> Result<(), ConfigError> {
        let BlockSize { width, height } = self.block;
        if BlockSize::new(width, height).is_none() {
            return Err(ConfigError::InvalidBlockSize { width, height });
        }
        Ok(())
    }

    /// Empty grid using these settings
    pub fn new_grid(&self, name: impl Into<String>) -> TileGrid {
        let mut grid = TileGrid::with_block_size(name, self.block);
        grid.set_selection(self.variant_selection);
        grid
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_toml_uses_defaults() {
        let settings = GridSettings::from_toml_str("").unwrap();
        assert_eq!(settings, GridSettings::default());
        assert_eq!(settings.tile_size, 16.0);
        assert!(settings.block.is_unit());
    }

    #[test]
    fn test_parse_full_settings() {
        let toml = r#"
tile_size = 32.0

[block]
width = 2
height = 3

[variant_selection]
mode = "weighted"
seed = 7
"#;
        let settings = GridSettings::from_toml_str(toml).unwrap();
        assert_eq!(settings.tile_size, 32.0);
        assert_eq!(settings.block, BlockSize::new(2, 3).unwrap());
        assert_eq!(settings.variant_selection, VariantSelection::Weighted { seed: 7 });

        let grid = settings.new_grid("Level");
        assert_eq!(grid.block_size(), settings.block);
        assert_eq!(grid.selection(), settings.variant_selection);
    }

    #[test]
    fn test_zero_block_is_rejected() {
        let err = GridSettings::from_toml_str("[block]\nwidth = 0\nheight = 1\n").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidBlockSize { width: 0, .. }));
    }

    #[test]
    fn test_bad_toml_is_parse_error() {
        let err = GridSettings::from_toml_str("tile_size = \"big\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_toml_round_trip() {
        let settings = GridSettings {
            tile_size: 8.0,
            block: BlockSize::new(4, 4).unwrap(),
            variant_selection: VariantSelection::Weighted { seed: 99 },
        };
        let text = settings.to_toml().unwrap();
        assert_eq!(GridSettings::from_toml_str(&text).unwrap(), settings);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = GridSettings::load(&dir.path().join("grid.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
