//! Tile definition registries
//!
//! Grids never own tile definitions. They hold IDs and look definitions up
//! through a [`TileRegistry`] whenever they need to resolve a texture or load
//! a saved map.

use crate::definition::{TileDefinition, DEFINITION_EXTENSION};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Errors from loading or saving tile definitions
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("Failed to access '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse tile definition '{path}': {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("Tile definition {id} is already registered (from '{existing}')")]
    DuplicateId { id: Uuid, existing: String },
    #[error("Tile definition {0} not found")]
    NotFound(Uuid),
}

/// Lookup of tile definitions by ID or by the file they were loaded from
pub trait TileRegistry {
    fn resolve(&self, id: Uuid) -> Option<&TileDefinition>;

    fn resolve_by_path(&self, path: &Path) -> Option<&TileDefinition>;
}

impl TileRegistry for HashMap<Uuid, TileDefinition> {
    fn resolve(&self, id: Uuid) -> Option<&TileDefinition> {
        self.get(&id)
    }

    fn resolve_by_path(&self, _path: &Path) -> Option<&TileDefinition> {
        None
    }
}

/// In-memory registry owning every loaded tile definition
#[derive(Debug, Default, Clone)]
pub struct TileLibrary {
    definitions: HashMap<Uuid, TileDefinition>,
    paths: HashMap<PathBuf, Uuid>,
}

impl TileLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    /// Register a definition created in memory, replacing any with the same ID
    pub fn insert(&mut self, definition: TileDefinition) -> Option<TileDefinition> {
        self.definitions.insert(definition.id, definition)
    }

    /// Register a definition and remember the file it belongs to
    pub fn insert_with_path(&mut self, definition: TileDefinition, path: impl Into<PathBuf>) {
        self.paths.insert(path.into(), definition.id);
        self.definitions.insert(definition.id, definition);
    }

    /// Remove a definition and any path pointing at it
    pub fn remove(&mut self, id: Uuid) -> Option<TileDefinition> {
        self.paths.retain(|_, v| *v != id);
        self.definitions.remove(&id)
    }

    /// Mutable access for editing a definition's variants
    pub fn get_mut(&mut self, id: Uuid) -> Option<&mut TileDefinition> {
        self.definitions.get_mut(&id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &TileDefinition> {
        self.definitions.values()
    }

    /// File a definition was loaded from or saved to
    pub fn path_of(&self, id: Uuid) -> Option<&Path> {
        self.paths
            .iter()
            .find(|(_, v)| **v == id)
            .map(|(p, _)| p.as_path())
    }

    /// Load a single definition file and register it
    pub fn load_file(&mut self, path: &Path) -> Result<Uuid, RegistryError> {
        let content = std::fs::read_to_string(path).map_err(|source| RegistryError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let definition =
            TileDefinition::from_json(&content).map_err(|source| RegistryError::Json {
                path: path.to_path_buf(),
                source,
            })?;

        if self.definitions.contains_key(&definition.id) {
            let existing = self
                .path_of(definition.id)
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "memory".to_string());
            return Err(RegistryError::DuplicateId {
                id: definition.id,
                existing,
            });
        }

        let id = definition.id;
        debug!("Loaded tile definition '{}' ({}) from {:?}", definition.name, id, path);
        self.insert_with_path(definition, path);
        Ok(id)
    }

    /// Load every `*.tile.json` file in `dir` (non-recursive).
    ///
    /// Returns the number of definitions loaded. The first failing file aborts
    /// the load; definitions loaded before it stay registered.
    pub fn load_dir(&mut self, dir: &Path) -> Result<usize, RegistryError> {
        let entries = std::fs::read_dir(dir).map_err(|source| RegistryError::Io {
            path: dir.to_path_buf(),
            source,
        })?;

        let mut files: Vec<PathBuf> = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|source| RegistryError::Io {
                path: dir.to_path_buf(),
                source,
            })?;
            let path = entry.path();
            if is_definition_file(&path) {
                files.push(path);
            }
        }
        files.sort();

        for path in &files {
            self.load_file(path)?;
        }

        info!("Loaded {} tile definitions from {:?}", files.len(), dir);
        Ok(files.len())
    }

    /// Write a definition to `path` as JSON and remember the path
    pub fn save_definition(&mut self, id: Uuid, path: &Path) -> Result<(), RegistryError> {
        let definition = self.definitions.get(&id).ok_or(RegistryError::NotFound(id))?;
        let json = definition.to_json().map_err(|source| RegistryError::Json {
            path: path.to_path_buf(),
            source,
        })?;
        std::fs::write(path, json).map_err(|source| RegistryError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        if let Some(previous) = self.path_of(id).map(Path::to_path_buf) {
            if previous != path {
                warn!("Tile definition {} moved from {:?} to {:?}", id, previous, path);
                self.paths.remove(&previous);
            }
        }
        self.paths.insert(path.to_path_buf(), id);
        Ok(())
    }
}

impl TileRegistry for TileLibrary {
    fn resolve(&self, id: Uuid) -> Option<&TileDefinition> {
        self.definitions.get(&id)
    }

    fn resolve_by_path(&self, path: &Path) -> Option<&TileDefinition> {
        self.paths.get(path).and_then(|id| self.definitions.get(id))
    }
}

fn is_definition_file(path: &Path) -> bool {
    path.is_file()
        && path
            .file_name()
            .and_then(|n| n.to_str())
            .map_or(false, |n| n.ends_with(&format!(".{DEFINITION_EXTENSION}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategy::PatternKind;

    #[test]
    fn test_insert_and_resolve() {
        let mut library = TileLibrary::new();
        let def = TileDefinition::new("Grass", PatternKind::AutoTile);
        let id = def.id;
        library.insert(def);

        assert_eq!(library.len(), 1);
        assert_eq!(library.resolve(id).map(|d| d.name.as_str()), Some("Grass"));
        assert!(library.resolve(Uuid::new_v4()).is_none());
    }

    #[test]
    fn test_save_then_load_dir() {
        let dir = tempfile::tempdir().unwrap();
        let mut library = TileLibrary::new();
        let grass = TileDefinition::new("Grass", PatternKind::AutoTile);
        let wall = TileDefinition::new("Wall", PatternKind::AutoWall);
        let (grass_id, wall_id) = (grass.id, wall.id);
        library.insert(grass);
        library.insert(wall);

        let grass_path = dir.path().join("grass.tile.json");
        library.save_definition(grass_id, &grass_path).unwrap();
        library
            .save_definition(wall_id, &dir.path().join("wall.tile.json"))
            .unwrap();
        std::fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let mut loaded = TileLibrary::new();
        assert_eq!(loaded.load_dir(dir.path()).unwrap(), 2);
        assert_eq!(loaded.resolve(wall_id).unwrap().kind(), PatternKind::AutoWall);
        assert_eq!(loaded.resolve_by_path(&grass_path).unwrap().id, grass_id);
    }

    #[test]
    fn test_load_file_rejects_duplicates() {
        let dir = tempfile::tempdir().unwrap();
        let mut library = TileLibrary::new();
        let def = TileDefinition::new("Sand", PatternKind::Simple);
        let id = def.id;
        library.insert(def);
        let path = dir.path().join("sand.tile.json");
        library.save_definition(id, &path).unwrap();

        let err = library.load_file(&path).unwrap_err();
        assert!(matches!(err, RegistryError::DuplicateId { .. }));
    }

    #[test]
    fn test_load_file_reports_bad_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.tile.json");
        std::fs::write(&path, "{ not json").unwrap();
        let err = TileLibrary::new().load_file(&path).unwrap_err();
        assert!(matches!(err, RegistryError::Json { .. }));
    }

    #[test]
    fn test_remove_forgets_path() {
        let mut library = TileLibrary::new();
        let def = TileDefinition::new("Lava", PatternKind::Simple);
        let id = def.id;
        library.insert_with_path(def, "lava.tile.json");
        assert!(library.resolve_by_path(Path::new("lava.tile.json")).is_some());
        library.remove(id);
        assert!(library.resolve_by_path(Path::new("lava.tile.json")).is_none());
        assert!(library.path_of(id).is_none());
    }

    #[test]
    fn test_save_unknown_definition() {
        let dir = tempfile::tempdir().unwrap();
        let err = TileLibrary::new()
            .save_definition(Uuid::new_v4(), &dir.path().join("x.tile.json"))
            .unwrap_err();
        assert!(matches!(err, RegistryError::NotFound(_)));
    }
}
