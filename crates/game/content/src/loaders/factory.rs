//! Content factory for loading tower content from a data directory.

use std::path::{Path, PathBuf};

use tower_core::{GameConfig, SpeciesCatalog};

use crate::loaders::{ConfigLoader, LoadResult, SpeciesLoader};

/// Content factory that loads all tower content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml
/// └── species.ron
/// ```
///
/// A file missing from the directory falls back to the compiled-in content.
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    /// Creates a new content factory pointing to a data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load tower configuration from `config.toml`.
    pub fn load_config(&self) -> LoadResult<GameConfig> {
        let path = self.data_dir.join("config.toml");
        if path.exists() {
            ConfigLoader::load(&path)
        } else {
            ConfigLoader::builtin()
        }
    }

    /// Load the species catalog from `species.ron`.
    pub fn load_species(&self) -> LoadResult<SpeciesCatalog> {
        let path = self.data_dir.join("species.ron");
        if path.exists() {
            SpeciesLoader::load(&path)
        } else {
            crate::loaders::builtin_catalog()
        }
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}
