//! Job table loader.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::ensure;
use rpg_core::RulesConfig;
use serde::{Deserialize, Serialize};

use crate::catalog::{JobId, JobSpec};
use crate::loaders::{LoadResult, read_file};

/// Job table structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobTable {
    pub jobs: BTreeMap<JobId, JobSpec>,
}

/// Loader for job specs from RON files.
pub struct JobLoader;

impl JobLoader {
    /// Load job specs keyed by id.
    ///
    /// Rejects any job with more skills than a job can carry.
    pub fn load(path: &Path) -> LoadResult<BTreeMap<JobId, JobSpec>> {
        let content = read_file(path)?;
        let table: JobTable = ron::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse job table RON: {}", e))?;

        for (id, spec) in &table.jobs {
            ensure!(
                spec.skills.len() <= RulesConfig::MAX_SKILLS,
                "job {} lists {} skills (max {})",
                id,
                spec.skills.len(),
                RulesConfig::MAX_SKILLS
            );
        }
        Ok(table.jobs)
    }
}
