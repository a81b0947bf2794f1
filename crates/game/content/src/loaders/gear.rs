//! Gear table loader.

use std::collections::BTreeMap;
use std::path::Path;

use rpg_core::Gear;
use serde::{Deserialize, Serialize};

use crate::catalog::GearId;
use crate::loaders::{LoadResult, read_file};

/// Gear table structure for RON files.
///
/// ```ron
/// (
///     gear: {
///         ShortSword: (name: "Short Sword", kind: Sword, attack: 4),
///     },
/// )
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GearTable {
    pub gear: BTreeMap<GearId, Gear>,
}

/// Loader for gear definitions from RON files.
pub struct GearLoader;

impl GearLoader {
    /// Load gear definitions keyed by id.
    pub fn load(path: &Path) -> LoadResult<BTreeMap<GearId, Gear>> {
        let content = read_file(path)?;
        let table: GearTable = ron::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse gear table RON: {}", e))?;

        Ok(table.gear)
    }
}
