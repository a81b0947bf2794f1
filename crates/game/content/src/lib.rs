//! Data-driven content definitions and loaders.
//!
//! This crate houses the static tables the rules consume and the loaders that
//! let data files override them:
//! - Gear, job and consumable catalogs keyed by enumerations
//! - The balance table implementing the evasion curve
//! - Rules configuration (data-driven via TOML)
//!
//! Content is built once at startup and only read afterwards.

pub mod balance;
pub mod catalog;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use balance::BalanceTable;
pub use catalog::{
    ConsumableCatalog, ConsumableId, ConsumableSpec, GearCatalog, GearId, JobCatalog, JobId,
    JobSpec, SkillDescriptor,
};

#[cfg(feature = "loaders")]
pub use loaders::{
    BalanceLoader, ConfigLoader, ConsumableLoader, Content, ContentFactory, GearLoader, JobLoader,
    LoadResult,
};
