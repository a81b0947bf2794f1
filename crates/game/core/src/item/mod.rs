//! Items that can sit in a bag.
//!
//! # Design: Sum type
//!
//! A bag slot holds a [`BagItem`]: either shared immutable gear or an owned
//! consumable stack. Consumables carry their own count and stack capacity;
//! gear never stacks.
//!
//! # Stacking
//!
//! Two consumables belong to the same stack type iff their names are equal
//! (exact, case-sensitive comparison). Absorbing moves
//! `min(target free space, source count)` units from source to target.

pub mod bag;
pub mod usage;

use std::sync::Arc;

pub use bag::{BagError, BagInsert, ItemBag, SwapOutcome};
pub use usage::{BagHolder, UseContext, UseError, UseOutcome};

use crate::equipment::{Gear, Rarity};

/// What a consumable does when used.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ConsumableEffect {
    /// Restore HP on a living mercenary.
    Heal(u32),

    /// Restore MP on a living mercenary.
    RestoreMp(u32),

    /// Bring a fallen mercenary back with the given HP.
    Revive(u32),

    /// Add slots to the bag the item is used on.
    UpgradeBag(usize),
}

impl ConsumableEffect {
    /// Whether this effect acts on a bag rather than a mercenary.
    pub const fn targets_bag(&self) -> bool {
        matches!(self, Self::UpgradeBag(_))
    }
}

/// A stack of identical consumables.
///
/// Only serializable: stacks are rebuilt through [`Consumable::new`] so that
/// `1 <= stack_size` and `count <= stack_size` always hold.
///
/// # Example
/// ```
/// # use rpg_core::{Consumable, ConsumableEffect};
/// let mut target = Consumable::new("Potion", ConsumableEffect::Heal(30), 5).with_count(4);
/// let mut source = Consumable::new("Potion", ConsumableEffect::Heal(30), 5).with_count(3);
/// assert_eq!(target.absorb_from(&mut source), 1);
/// assert_eq!((target.count(), source.count()), (5, 2));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Consumable {
    name: String,
    effect: ConsumableEffect,
    count: u16,
    stack_size: u16,
    price: u32,
    rarity: Rarity,
}

impl Consumable {
    /// Creates a single-unit stack.
    ///
    /// # Panics
    ///
    /// Panics if `stack_size` is zero.
    pub fn new(name: impl Into<String>, effect: ConsumableEffect, stack_size: u16) -> Self {
        assert!(stack_size > 0, "consumable stack size must be at least 1");
        Self {
            name: name.into(),
            effect,
            count: 1,
            stack_size,
            price: 0,
            rarity: Rarity::Normal,
        }
    }

    /// Sets the unit count, clamped to `[1, stack_size]`.
    pub fn with_count(mut self, count: u16) -> Self {
        self.count = count.clamp(1, self.stack_size);
        self
    }

    pub fn with_price(mut self, price: u32) -> Self {
        self.price = price;
        self
    }

    pub fn with_rarity(mut self, rarity: Rarity) -> Self {
        self.rarity = rarity;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn effect(&self) -> ConsumableEffect {
        self.effect
    }

    pub fn count(&self) -> u16 {
        self.count
    }

    pub fn stack_size(&self) -> u16 {
        self.stack_size
    }

    pub fn price(&self) -> u32 {
        self.price
    }

    pub fn rarity(&self) -> Rarity {
        self.rarity
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn free_space(&self) -> u16 {
        self.stack_size.saturating_sub(self.count)
    }

    /// Same stack type: identical names.
    pub fn is_same_stack(&self, other: &Consumable) -> bool {
        self.name == other.name
    }

    /// Moves as many units as fit from `source` into `self`.
    ///
    /// Returns the number of units moved. Nothing moves between different
    /// stack types.
    pub fn absorb_from(&mut self, source: &mut Consumable) -> u16 {
        if !self.is_same_stack(source) {
            return 0;
        }
        let moved = self.free_space().min(source.count);
        self.count += moved;
        source.count -= moved;
        moved
    }

    /// Takes one unit. Returns the remaining count.
    pub(crate) fn take_one(&mut self) -> u16 {
        self.count = self.count.saturating_sub(1);
        self.count
    }
}

/// Anything that can occupy a bag slot.
#[derive(Clone, Debug, PartialEq)]
pub enum BagItem {
    Gear(Arc<Gear>),
    Consumable(Consumable),
}

impl BagItem {
    pub fn name(&self) -> &str {
        match self {
            Self::Gear(gear) => &gear.name,
            Self::Consumable(consumable) => consumable.name(),
        }
    }

    pub fn as_gear(&self) -> Option<&Arc<Gear>> {
        match self {
            Self::Gear(gear) => Some(gear),
            Self::Consumable(_) => None,
        }
    }

    pub fn as_consumable(&self) -> Option<&Consumable> {
        match self {
            Self::Consumable(consumable) => Some(consumable),
            Self::Gear(_) => None,
        }
    }

    pub fn as_consumable_mut(&mut self) -> Option<&mut Consumable> {
        match self {
            Self::Consumable(consumable) => Some(consumable),
            Self::Gear(_) => None,
        }
    }

    /// Units represented by this slot (1 for gear).
    pub fn quantity(&self) -> u16 {
        match self {
            Self::Gear(_) => 1,
            Self::Consumable(consumable) => consumable.count(),
        }
    }

    /// Identity used by [`ItemBag::remove`]: gear by pointer, consumables by value.
    pub fn is_same_item(&self, other: &BagItem) -> bool {
        match (self, other) {
            (Self::Gear(a), Self::Gear(b)) => Arc::ptr_eq(a, b),
            (Self::Consumable(a), Self::Consumable(b)) => a == b,
            _ => false,
        }
    }
}

impl From<Arc<Gear>> for BagItem {
    fn from(gear: Arc<Gear>) -> Self {
        Self::Gear(gear)
    }
}

impl From<Consumable> for BagItem {
    fn from(consumable: Consumable) -> Self {
        Self::Consumable(consumable)
    }
}
