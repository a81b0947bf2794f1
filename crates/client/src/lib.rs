//! Party sheet tool: builds a stocked mercenary party from content and prints it.
//!
//! # Layers
//!
//! ```text
//! SheetConfig (env)  ->  ContentFactory (data dir)  ->  PartyBuilder  ->  PartySheet
//! ```

pub mod builder;
pub mod config;
pub mod sheet;

pub use builder::{PartyBuilder, Recruit, default_roster};
pub use config::{SheetConfig, SheetFormat};
pub use sheet::{BagSheet, MemberSheet, PartySheet};
