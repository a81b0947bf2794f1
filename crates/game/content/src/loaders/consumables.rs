//! Consumable table loader.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::ensure;
use serde::{Deserialize, Serialize};

use crate::catalog::{ConsumableId, ConsumableSpec};
use crate::loaders::{LoadResult, read_file};

/// Consumable table structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsumableTable {
    pub consumables: BTreeMap<ConsumableId, ConsumableSpec>,
}

/// Loader for consumable specs from RON files.
pub struct ConsumableLoader;

impl ConsumableLoader {
    /// Load consumable specs keyed by id. Every stack size must be at least 1.
    pub fn load(path: &Path) -> LoadResult<BTreeMap<ConsumableId, ConsumableSpec>> {
        let content = read_file(path)?;
        let table: ConsumableTable = ron::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse consumable table RON: {}", e))?;

        for (id, spec) in &table.consumables {
            ensure!(spec.stack_size > 0, "consumable {} has a zero stack size", id);
        }
        Ok(table.consumables)
    }
}
