//! Content loaders for reading game data from files.
//!
//! RON holds the tables (gear, jobs, consumables); TOML holds the tunables
//! (rules config, balance). Each loader parses one file into the matching
//! catalog input; [`ContentFactory`] decides which files exist.

pub mod balance;
pub mod config;
pub mod consumables;
pub mod factory;
pub mod gear;
pub mod jobs;

pub use balance::BalanceLoader;
pub use config::ConfigLoader;
pub use consumables::ConsumableLoader;
pub use factory::{Content, ContentFactory};
pub use gear::GearLoader;
pub use jobs::JobLoader;

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
