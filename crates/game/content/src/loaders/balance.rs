//! Balance table loader.

use std::path::Path;

use crate::balance::BalanceTable;
use crate::loaders::{LoadResult, read_file};

/// Loader for the evasion curve from TOML files.
pub struct BalanceLoader;

impl BalanceLoader {
    pub fn load(path: &Path) -> LoadResult<BalanceTable> {
        let content = read_file(path)?;
        let table: BalanceTable = toml::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse balance TOML: {}", e))?;

        Ok(table)
    }
}
