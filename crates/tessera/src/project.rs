//! Project files tying tile definitions to grid settings
//!
//! A project is a small TOML file:
//!
//! ```toml
//! name = "Overworld"
//! definitions_dir = "tiles"
//! maps_dir = "maps"
//!
//! [grid]
//! tile_size = 16.0
//! ```
//!
//! Relative directories are resolved against the folder holding the project
//! file.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tessera_autotile::{RegistryError, TileLibrary, TileRegistry};
use tessera_grid::{
    read_grid_with, save_grid, ConfigError, GridSettings, MapLoadError, MapSaveError, TileGrid,
    MAP_EXTENSION,
};
use thiserror::Error;
use tracing::info;

/// Error type for project operations
#[derive(Debug, Error)]
pub enum ProjectError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Registry(#[from] RegistryError),
    #[error("Failed to load map '{name}': {source}")]
    LoadMap {
        name: String,
        #[source]
        source: MapLoadError,
    },
    #[error("Failed to save map '{name}': {source}")]
    SaveMap {
        name: String,
        #[source]
        source: MapSaveError,
    },
    #[error("Invalid map name {0:?}: must be a single file name without '..'")]
    InvalidMapName(String),
    #[error("Failed to create directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

fn default_definitions_dir() -> PathBuf {
    PathBuf::from("tiles")
}

fn default_maps_dir() -> PathBuf {
    PathBuf::from("maps")
}

/// A tessera project
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TileProject {
    pub name: String,
    /// Folder scanned for `*.tile.json` definitions
    #[serde(default = "default_definitions_dir")]
    pub definitions_dir: PathBuf,
    /// Folder holding serialized grids
    #[serde(default = "default_maps_dir")]
    pub maps_dir: PathBuf,
    #[serde(default)]
    pub grid: GridSettings,
    /// Folder the project file was loaded from
    #[serde(skip)]
    root: Option<PathBuf>,
}

impl TileProject {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            definitions_dir: default_definitions_dir(),
            maps_dir: default_maps_dir(),
            grid: GridSettings::default(),
            root: None,
        }
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let project: Self = toml::from_str(content)?;
        project.grid.validate()?;
        Ok(project)
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Load a project file; relative directories resolve next to it
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut project = Self::from_toml_str(&content)?;
        project.root = path.parent().map(Path::to_path_buf);
        info!("Loaded project '{}' from {}", project.name, path.display());
        Ok(project)
    }

    /// Write the project file and remember its folder as the project root
    pub fn save(&mut self, path: &Path) -> Result<(), ConfigError> {
        std::fs::write(path, self.to_toml()?)?;
        self.root = path.parent().map(Path::to_path_buf);
        Ok(())
    }

    /// Folder the project file lives in, if it was loaded or saved
    pub fn root(&self) -> Option<&Path> {
        self.root.as_deref()
    }

    fn resolve(&self, dir: &Path) -> PathBuf {
        match &self.root {
            Some(root) if dir.is_relative() => root.join(dir),
            _ => dir.to_path_buf(),
        }
    }

    pub fn definitions_path(&self) -> PathBuf {
        self.resolve(&self.definitions_dir)
    }

    pub fn maps_path(&self) -> PathBuf {
        self.resolve(&self.maps_dir)
    }

    /// File a map named `name` is stored in. The name must stay a single
    /// file name inside the maps folder.
    pub fn map_path(&self, name: &str) -> Result<PathBuf, ProjectError> {
        let invalid = name.is_empty()
            || name.contains("..")
            || name.contains(['/', '\\', '\0'])
            || Path::new(name).is_absolute();
        if invalid {
            return Err(ProjectError::InvalidMapName(name.to_string()));
        }
        Ok(self.maps_path().join(format!("{name}.{MAP_EXTENSION}")))
    }

    /// Load every tile definition in the definitions folder. A missing folder
    /// gives an empty library.
    pub fn open_library(&self) -> Result<TileLibrary, ProjectError> {
        let dir = self.definitions_path();
        let mut library = TileLibrary::new();
        if dir.is_dir() {
            library.load_dir(&dir)?;
        }
        Ok(library)
    }

    /// Empty grid configured with the project's settings
    pub fn new_grid(&self, name: impl Into<String>) -> TileGrid {
        self.grid.new_grid(name)
    }

    /// Save `grid` under the maps folder, named after the grid
    pub fn save_map(&self, grid: &TileGrid) -> Result<PathBuf, ProjectError> {
        let path = self.map_path(grid.name())?;
        let dir = self.maps_path();
        std::fs::create_dir_all(&dir).map_err(|source| ProjectError::CreateDir {
            path: dir.clone(),
            source,
        })?;

        save_grid(grid, &path).map_err(|source| ProjectError::SaveMap {
            name: grid.name().to_string(),
            source,
        })?;
        info!("Saved map '{}' to {}", grid.name(), path.display());
        Ok(path)
    }

    /// Load the map called `name`, resolving its tiles through `registry`
    pub fn load_map<R>(&self, name: &str, registry: &R) -> Result<TileGrid, ProjectError>
    where
        R: TileRegistry + ?Sized,
    {
        let path = self.map_path(name)?;
        let load = || -> Result<TileGrid, MapLoadError> {
            let bytes = std::fs::read(&path)?;
            read_grid_with(bytes.as_slice(), registry, self.grid.variant_selection)
        };
        let grid = load().map_err(|source| ProjectError::LoadMap {
            name: name.to_string(),
            source,
        })?;
        info!("Loaded map '{}' with {} cells", grid.name(), grid.len());
        Ok(grid)
    }
}
