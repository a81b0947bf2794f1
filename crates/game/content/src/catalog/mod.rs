//! Static catalogs keyed by enumerations.
//!
//! Each catalog is built once (usually from [`builtin`](GearCatalog::builtin)
//! plus any overrides read from data files) and then only read.

pub mod consumables;
pub mod gear;
pub mod jobs;

pub use consumables::{ConsumableCatalog, ConsumableId, ConsumableSpec};
pub use gear::{GearCatalog, GearId};
pub use jobs::{JobCatalog, JobId, JobSpec, SkillDescriptor};
