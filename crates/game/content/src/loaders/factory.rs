//! Content factory for building catalogs from data files.

use std::path::{Path, PathBuf};

use anyhow::Context;
use rpg_core::RulesConfig;

use crate::balance::BalanceTable;
use crate::catalog::{ConsumableCatalog, GearCatalog, JobCatalog};
use crate::loaders::{
    BalanceLoader, ConfigLoader, ConsumableLoader, GearLoader, JobLoader, LoadResult,
};

/// Everything the rules need from content, ready to use.
#[derive(Clone, Debug)]
pub struct Content {
    pub rules: RulesConfig,
    pub balance: BalanceTable,
    pub gear: GearCatalog,
    pub jobs: JobCatalog,
    pub consumables: ConsumableCatalog,
}

impl Content {
    /// Built-in tables and default tunables, no files involved.
    pub fn builtin() -> Self {
        Self {
            rules: RulesConfig::default(),
            balance: BalanceTable::default(),
            gear: GearCatalog::builtin(),
            jobs: JobCatalog::builtin(),
            consumables: ConsumableCatalog::for_rules(&RulesConfig::default()),
        }
    }
}

/// Content factory that loads all game content from a data directory.
///
/// Every file is optional. A missing file leaves the built-in values in place;
/// a present table file overrides the entries it names.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml
/// ├── balance.toml
/// ├── gear.ron
/// ├── jobs.ron
/// └── consumables.ron
/// ```
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

    /// Load rules configuration from `config.toml`.
    pub fn load_config(&self) -> LoadResult<RulesConfig> {
        match self.existing("config.toml") {
            Some(path) => ConfigLoader::load(&path),
            None => Ok(RulesConfig::default()),
        }
    }

    /// Load the evasion curve from `balance.toml`.
    pub fn load_balance(&self) -> LoadResult<BalanceTable> {
        match self.existing("balance.toml") {
            Some(path) => BalanceLoader::load(&path),
            None => Ok(BalanceTable::default()),
        }
    }

    /// Built-in gear overlaid with `gear.ron`.
    pub fn load_gear(&self) -> LoadResult<GearCatalog> {
        let catalog = GearCatalog::builtin();
        match self.existing("gear.ron") {
            Some(path) => Ok(catalog.with_overrides(GearLoader::load(&path)?)),
            None => Ok(catalog),
        }
    }

    /// Built-in jobs overlaid with `jobs.ron`.
    pub fn load_jobs(&self) -> LoadResult<JobCatalog> {
        let catalog = JobCatalog::builtin();
        match self.existing("jobs.ron") {
            Some(path) => {
                let specs = JobLoader::load(&path)?;
                catalog
                    .with_overrides(specs)
                    .with_context(|| format!("Invalid job in {}", path.display()))
            }
            None => Ok(catalog),
        }
    }

    /// Built-in consumables sized by `rules`, overlaid with `consumables.ron`.
    pub fn load_consumables(&self, rules: &RulesConfig) -> LoadResult<ConsumableCatalog> {
        let catalog = ConsumableCatalog::for_rules(rules);
        match self.existing("consumables.ron") {
            Some(path) => Ok(catalog.with_overrides(ConsumableLoader::load(&path)?)),
            None => Ok(catalog),
        }
    }

    /// Loads every file.
    pub fn load_all(&self) -> LoadResult<Content> {
        let rules = self.load_config()?;
        let consumables = self.load_consumables(&rules)?;
        let content = Content {
            rules,
            balance: self.load_balance()?,
            gear: self.load_gear()?,
            jobs: self.load_jobs()?,
            consumables,
        };
        tracing::info!(
            "loaded content from {}: {} gear, {} jobs, {} consumables",
            self.data_dir.display(),
            content.gear.len(),
            content.jobs.len(),
            content.consumables.len()
        );
        Ok(content)
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    fn existing(&self, file: &str) -> Option<PathBuf> {
        let path = self.data_dir.join(file);
        if path.is_file() {
            Some(path)
        } else {
            tracing::debug!("{} not found, using built-in values", path.display());
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use rpg_core::{BalanceOracle, ConsumableEffect, GearKind};

    use super::*;
    use crate::catalog::{ConsumableId, GearId, JobId};

    #[test]
    fn test_factory_paths() {
        let factory = ContentFactory::new("/tmp/data");
        assert_eq!(factory.data_dir(), Path::new("/tmp/data"));
    }

    #[test]
    fn empty_directory_yields_builtin_content() {
        let dir = tempfile::tempdir().unwrap();
        let content = ContentFactory::new(dir.path()).load_all().unwrap();
        let builtin = Content::builtin();

        assert_eq!(content.rules, builtin.rules);
        assert_eq!(content.balance, builtin.balance);
        assert_eq!(content.gear.len(), builtin.gear.len());
        assert_eq!(content.jobs.len(), builtin.jobs.len());
    }

    #[test]
    fn config_and_balance_files_override_defaults() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("config.toml"),
            "default_bag_capacity = 8\nmax_bag_capacity = 16\nbag_upgrade_step = 2\n",
        )
        .unwrap();
        fs::write(dir.path().join("balance.toml"), "per_agility = 1.0\ncap = 10\n").unwrap();

        let factory = ContentFactory::new(dir.path());
        let rules = factory.load_config().unwrap();
        assert_eq!(rules.default_bag_capacity, 8);
        assert_eq!(rules.max_bag_capacity, 16);
        assert_eq!(rules.bag_upgrade_step, 2);

        let expander = factory
            .load_all()
            .unwrap()
            .consumables
            .template(ConsumableId::BagExpander)
            .unwrap()
            .effect();
        assert_eq!(expander, ConsumableEffect::UpgradeBag(2));

        let balance = factory.load_balance().unwrap();
        assert_eq!(balance.per_level, BalanceTable::DEFAULT_PER_LEVEL);
        assert_eq!(balance.evasion(30.0, 1), 10);
    }

    #[test]
    fn inverted_bag_limits_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("config.toml"),
            "default_bag_capacity = 30\nmax_bag_capacity = 10\n",
        )
        .unwrap();
        assert!(ContentFactory::new(dir.path()).load_config().is_err());
    }

    #[test]
    fn table_files_override_named_entries() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("gear.ron"),
            r#"(
                gear: {
                    ShortSword: (name: "Rusty Sword", kind: Sword, attack: 1),
                },
            )"#,
        )
        .unwrap();
        fs::write(
            dir.path().join("jobs.ron"),
            r#"(
                jobs: {
                    Knight: (
                        name: "Squire",
                        base_bonus: (strength: 4.0, vitality: 5.0),
                        growth: (strength: 0.5),
                        skills: ["Guard"],
                    ),
                },
            )"#,
        )
        .unwrap();
        fs::write(
            dir.path().join("consumables.ron"),
            r#"(
                consumables: {
                    Potion: (name: "Potion", effect: Heal(50), stack_size: 3),
                },
            )"#,
        )
        .unwrap();

        let content = ContentFactory::new(dir.path()).load_all().unwrap();

        let sword = content.gear.get(GearId::ShortSword).unwrap();
        assert_eq!(sword.name, "Rusty Sword");
        assert_eq!(sword.kind, GearKind::Sword);
        assert_eq!(sword.attack, 1);
        assert_eq!(content.gear.get(GearId::KiteShield).unwrap().defense, 5);

        let knight = content.jobs.get(JobId::Knight).unwrap();
        assert_eq!(knight.name(), "Squire");
        assert_eq!(knight.growth().strength, 0.5);
        assert_eq!(knight.skills().len(), 1);

        let potion = content.consumables.template(ConsumableId::Potion).unwrap();
        assert_eq!(potion.effect(), ConsumableEffect::Heal(50));
        assert_eq!(potion.stack_size(), 3);
    }

    #[test]
    fn malformed_table_reports_error() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("gear.ron"), "(gear: { NotAnId: () })").unwrap();
        let err = ContentFactory::new(dir.path()).load_gear().unwrap_err();
        assert!(err.to_string().contains("gear table"));
    }

    #[test]
    fn zero_stack_size_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("consumables.ron"),
            "(consumables: { Ether: (name: \"Ether\", effect: RestoreMp(5), stack_size: 0) })",
        )
        .unwrap();
        assert!(
            ContentFactory::new(dir.path())
                .load_consumables(&RulesConfig::default())
                .is_err()
        );
    }
}
