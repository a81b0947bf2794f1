//! Rules configuration loader.

use std::path::Path;

use anyhow::ensure;
use rpg_core::RulesConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for rules configuration from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file.
    ///
    /// Missing keys take their defaults. The starting bag capacity may not
    /// exceed the upgrade ceiling.
    pub fn load(path: &Path) -> LoadResult<RulesConfig> {
        let content = read_file(path)?;
        let config: RulesConfig = toml::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;

        ensure!(
            config.default_bag_capacity <= config.max_bag_capacity,
            "default_bag_capacity ({}) exceeds max_bag_capacity ({})",
            config.default_bag_capacity,
            config.max_bag_capacity
        );
        Ok(config)
    }
}
