//! Built-in consumable table.

use std::collections::BTreeMap;

use rpg_core::{Consumable, ConsumableEffect, Rarity, RulesConfig};

#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum ConsumableId {
    Potion,
    HiPotion,
    Ether,
    PhoenixDown,
    BagExpander,
}

/// Data form of a consumable stack type.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConsumableSpec {
    pub name: String,
    pub effect: ConsumableEffect,
    pub stack_size: u16,
    #[cfg_attr(feature = "serde", serde(default))]
    pub price: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub rarity: Rarity,
}

impl ConsumableSpec {
    /// A single-unit stack, or `None` for a zero stack size.
    pub fn build(&self) -> Option<Consumable> {
        (self.stack_size > 0).then(|| {
            Consumable::new(self.name.clone(), self.effect, self.stack_size)
                .with_price(self.price)
                .with_rarity(self.rarity)
        })
    }
}

impl ConsumableId {
    pub fn spec(self) -> ConsumableSpec {
        let (name, effect, stack_size, price, rarity) = match self {
            Self::Potion => ("Potion", ConsumableEffect::Heal(30), 9, 25, Rarity::Normal),
            Self::HiPotion => ("Hi-Potion", ConsumableEffect::Heal(120), 9, 90, Rarity::Uncommon),
            Self::Ether => ("Ether", ConsumableEffect::RestoreMp(25), 9, 120, Rarity::Uncommon),
            Self::PhoenixDown => ("Phoenix Down", ConsumableEffect::Revive(1), 5, 300, Rarity::Rare),
            Self::BagExpander => (
                "Bag Expander",
                ConsumableEffect::UpgradeBag(RulesConfig::DEFAULT_BAG_UPGRADE_STEP),
                1,
                1_000,
                Rarity::Epic,
            ),
        };
        ConsumableSpec {
            name: name.to_string(),
            effect,
            stack_size,
            price,
            rarity,
        }
    }
}

/// Consumable templates keyed by [`ConsumableId`].
///
/// Templates are single-unit stacks; [`create`](Self::create) hands out fresh
/// stacks of any size.
#[derive(Clone, Debug, Default)]
pub struct ConsumableCatalog {
    entries: BTreeMap<ConsumableId, Consumable>,
}

impl ConsumableCatalog {
    pub fn builtin() -> Self {
        use strum::IntoEnumIterator;

        Self::default().with_overrides(ConsumableId::iter().map(|id| (id, id.spec())))
    }

    /// Built-in templates with the bag expander growing the bag by
    /// `rules.bag_upgrade_step` slots.
    pub fn for_rules(rules: &RulesConfig) -> Self {
        let mut expander = ConsumableId::BagExpander.spec();
        expander.effect = ConsumableEffect::UpgradeBag(rules.bag_upgrade_step);
        Self::builtin().with_overrides([(ConsumableId::BagExpander, expander)])
    }

    /// Replaces or adds the given templates. Specs with a zero stack size are skipped.
    pub fn with_overrides(
        mut self,
        specs: impl IntoIterator<Item = (ConsumableId, ConsumableSpec)>,
    ) -> Self {
        for (id, spec) in specs {
            match spec.build() {
                Some(template) => {
                    self.entries.insert(id, template);
                }
                None => tracing::warn!("ignoring {id}: stack size must be at least 1"),
            }
        }
        self
    }

    pub fn template(&self, id: ConsumableId) -> Option<&Consumable> {
        self.entries.get(&id)
    }

    /// A new stack of `count` units, clamped to the stack size.
    pub fn create(&self, id: ConsumableId, count: u16) -> Option<Consumable> {
        self.template(id).map(|t| t.clone().with_count(count))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
