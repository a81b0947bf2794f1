//! Stat system.
//!
//! # Architecture
//!
//! ```text
//! [ Base StatBlock ] + [ Job contribution @ level ] + [ Gear bonuses ]
//!      ↓  (sum, no clamping)
//! [ Effective StatBlock ]  ← clamp per attribute
//!      ↓
//! [ Resource maximums (HP/MP) ]   [ Battle stats (ATK/DEF/EVA) ]
//! ```
//!
//! ## Principles
//!
//! 1. **Deferred clamping**: sums stay fractional until an integer is derived
//! 2. **One rounding rule**: [`round_half_up`]
//! 3. **Deterministic**: pure functions, no I/O or randomness

pub mod bounds;
pub mod core;
pub mod derived;
pub mod resources;

pub use self::bounds::{StatBounds, round_half_up};
pub use self::core::StatBlock;
pub use self::derived::{BattleStats, FlatBonuses};
pub use self::resources::{
    ResourceError, ResourceKind, ResourceMaximums, ResourcePool,
};
