//! Traits describing read-only collaborators.
//!
//! Oracles expose balance formulas that this crate consumes but does not
//! define. Concrete tables live in `rpg-content`.
mod balance;

pub use balance::BalanceOracle;
