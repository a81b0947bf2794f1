//! Stat, equipment and inventory rules for mercenary parties.
//!
//! `rpg-core` derives a mercenary's effective stats from three sources (base
//! stats, the job's growth curve at the current level, and equipped gear) and
//! owns the containers that feed them: six equipment slots and a slot-stable
//! item bag. Everything here is synchronous and free of I/O; static tables and
//! the evasion curve are supplied by `rpg-content`.
pub mod actor;
pub mod config;
pub mod env;
pub mod equipment;
pub mod error;
pub mod item;
pub mod job;
pub mod party;
pub mod stats;

pub use actor::{Mercenary, PassiveModifiers};
pub use config::RulesConfig;
pub use env::BalanceOracle;
pub use equipment::{
    Element, EquipError, EquipSlot, Equipment, Gear, GearBuilder, GearKind, Rarity, SlotGroup,
};
pub use error::{ErrorSeverity, GameError};
pub use item::{
    BagError, BagHolder, BagInsert, BagItem, Consumable, ConsumableEffect, ItemBag, SwapOutcome,
    UseContext, UseError, UseOutcome,
};
pub use job::{Job, JobError, JobTier, Skill};
pub use party::{Party, PartyError};
pub use stats::{
    BattleStats, FlatBonuses, ResourceError, ResourceKind, ResourceMaximums, ResourcePool,
    StatBlock, StatBounds, round_half_up,
};
