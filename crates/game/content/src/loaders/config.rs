//! Tower configuration loader.

use std::path::Path;

use tower_core::GameConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for tower configuration from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file.
    ///
    /// Keys missing from the file keep their [`GameConfig::default`] values.
    pub fn load(path: &Path) -> LoadResult<GameConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    /// Parse config data from TOML text.
    pub fn parse(content: &str) -> LoadResult<GameConfig> {
        let config: GameConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;

        if config.min_lives == 0 {
            anyhow::bail!("Invalid config: min_lives must be at least 1");
        }
        if config.min_lives > config.max_lives {
            anyhow::bail!(
                "Invalid config: min_lives ({}) exceeds max_lives ({})",
                config.min_lives,
                config.max_lives
            );
        }
        Ok(config)
    }

    /// The compiled-in configuration.
    pub fn builtin() -> LoadResult<GameConfig> {
        Self::parse(crate::BUILTIN_CONFIG)
    }
}
