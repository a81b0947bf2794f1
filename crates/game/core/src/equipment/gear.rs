//! Gear definitions.
//!
//! A [`Gear`] value is immutable once built and is shared between owners through
//! `Arc`. Two mercenaries may hold the same definition; nobody mutates it.

use std::sync::Arc;

use crate::stats::StatBlock;

/// Every equippable kind. Slot routing is decided by [`GearKind::slot_group`].
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum GearKind {
    // Weapons
    Sword,
    Knuckle,
    Staff,
    Rod,

    Shield,

    // Armor
    HeavyArmor,
    LightArmor,
    Robe,

    // Headgear
    Helm,
    Cap,
    Hood,
    Circlet,

    Accessory,
}

impl GearKind {
    pub const fn is_weapon(self) -> bool {
        matches!(self, Self::Sword | Self::Knuckle | Self::Staff | Self::Rod)
    }

    pub const fn is_armor(self) -> bool {
        matches!(self, Self::HeavyArmor | Self::LightArmor | Self::Robe)
    }

    pub const fn is_hat(self) -> bool {
        matches!(self, Self::Helm | Self::Cap | Self::Hood | Self::Circlet)
    }
}

/// Item rarity tier.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Rarity {
    #[default]
    Normal,
    Uncommon,
    Rare,
    Epic,
    Legendary,
}

bitflags::bitflags! {
    /// Elemental tags carried by a piece of gear.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    #[cfg_attr(feature = "serde", serde(transparent))]
    pub struct Element: u8 {
        const FIRE    = 1 << 0;
        const ICE     = 1 << 1;
        const THUNDER = 1 << 2;
        const EARTH   = 1 << 3;
        const HOLY    = 1 << 4;
        const DARK    = 1 << 5;
    }
}

/// Immutable equippable item.
///
/// # Example
/// ```
/// # use rpg_core::{Gear, GearKind, StatBlock};
/// let sword = Gear::builder("Short Sword", GearKind::Sword)
///     .price(120)
///     .stats(StatBlock::new(2.0, 0.0, 0.0, 0.0))
///     .attack(5)
///     .build();
/// assert_eq!(sword.attack, 5);
/// assert!(sword.kind.is_weapon());
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Gear {
    pub name: String,
    pub kind: GearKind,
    #[cfg_attr(feature = "serde", serde(default))]
    pub rarity: Rarity,
    #[cfg_attr(feature = "serde", serde(default))]
    pub price: u32,
    /// Bonus added to the wearer's stat block.
    #[cfg_attr(feature = "serde", serde(default))]
    pub stats: StatBlock,
    /// Flat attack. Counts only from weapon/shield slots.
    #[cfg_attr(feature = "serde", serde(default))]
    pub attack: i32,
    /// Flat defense. Counts from armor, hat and weapon/shield slots.
    #[cfg_attr(feature = "serde", serde(default))]
    pub defense: i32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub ability_points: i32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub hp: i32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub mp: i32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub elements: Element,
}

impl Gear {
    pub fn builder(name: impl Into<String>, kind: GearKind) -> GearBuilder {
        GearBuilder::new(name, kind)
    }
}

/// Builder for constructing gear definitions.
pub struct GearBuilder {
    gear: Gear,
}

impl GearBuilder {
    pub fn new(name: impl Into<String>, kind: GearKind) -> Self {
        Self {
            gear: Gear {
                name: name.into(),
                kind,
                rarity: Rarity::Normal,
                price: 0,
                stats: StatBlock::ZERO,
                attack: 0,
                defense: 0,
                ability_points: 0,
                hp: 0,
                mp: 0,
                elements: Element::empty(),
            },
        }
    }

    pub fn rarity(mut self, rarity: Rarity) -> Self {
        self.gear.rarity = rarity;
        self
    }

    pub fn price(mut self, price: u32) -> Self {
        self.gear.price = price;
        self
    }

    pub fn stats(mut self, stats: StatBlock) -> Self {
        self.gear.stats = stats;
        self
    }

    pub fn attack(mut self, attack: i32) -> Self {
        self.gear.attack = attack;
        self
    }

    pub fn defense(mut self, defense: i32) -> Self {
        self.gear.defense = defense;
        self
    }

    pub fn ability_points(mut self, ability_points: i32) -> Self {
        self.gear.ability_points = ability_points;
        self
    }

    pub fn hp(mut self, hp: i32) -> Self {
        self.gear.hp = hp;
        self
    }

    pub fn mp(mut self, mp: i32) -> Self {
        self.gear.mp = mp;
        self
    }

    pub fn elements(mut self, elements: Element) -> Self {
        self.gear.elements = elements;
        self
    }

    pub fn build(self) -> Gear {
        self.gear
    }

    /// Builds the gear behind an `Arc`, ready to be shared between owners.
    pub fn shared(self) -> Arc<Gear> {
        Arc::new(self.gear)
    }
}
