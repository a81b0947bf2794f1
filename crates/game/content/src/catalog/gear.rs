//! Built-in gear table.

use std::collections::BTreeMap;
use std::sync::Arc;

use rpg_core::{Element, Gear, GearKind, Rarity, StatBlock};

/// Key for every gear definition shipped with the game.
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
pub enum GearId {
    // Weapons
    ShortSword,
    Broadsword,
    IronKnuckle,
    OakStaff,
    FlameRod,

    // Shields
    WoodenShield,
    KiteShield,

    // Armor
    ChainMail,
    LeatherVest,
    SilkRobe,

    // Headgear
    IronHelm,
    FeltCap,
    MageHood,
    SilverCirclet,

    // Accessories
    PowerRing,
    GuardAmulet,
    GiantBelt,
}

impl GearId {
    /// Built-in definition for this id.
    pub fn definition(self) -> Gear {
        use GearId::*;

        let stats = StatBlock::new;
        match self {
            ShortSword => Gear::builder("Short Sword", GearKind::Sword)
                .price(80)
                .attack(4)
                .build(),
            Broadsword => Gear::builder("Broadsword", GearKind::Sword)
                .price(240)
                .rarity(Rarity::Uncommon)
                .stats(stats(2.0, 0.0, 0.0, 0.0))
                .attack(9)
                .build(),
            IronKnuckle => Gear::builder("Iron Knuckle", GearKind::Knuckle)
                .price(150)
                .stats(stats(1.0, 1.0, 0.0, 0.0))
                .attack(6)
                .build(),
            OakStaff => Gear::builder("Oak Staff", GearKind::Staff)
                .price(90)
                .stats(stats(0.0, 0.0, 0.0, 2.0))
                .attack(2)
                .mp(5)
                .build(),
            FlameRod => Gear::builder("Flame Rod", GearKind::Rod)
                .price(320)
                .rarity(Rarity::Rare)
                .stats(stats(0.0, 0.0, 0.0, 4.0))
                .attack(3)
                .elements(Element::FIRE)
                .build(),
            WoodenShield => Gear::builder("Wooden Shield", GearKind::Shield)
                .price(60)
                .defense(2)
                .build(),
            KiteShield => Gear::builder("Kite Shield", GearKind::Shield)
                .price(200)
                .rarity(Rarity::Uncommon)
                .defense(5)
                .build(),
            ChainMail => Gear::builder("Chain Mail", GearKind::HeavyArmor)
                .price(260)
                .stats(stats(0.0, -1.0, 1.0, 0.0))
                .defense(4)
                .build(),
            LeatherVest => Gear::builder("Leather Vest", GearKind::LightArmor)
                .price(120)
                .defense(2)
                .build(),
            SilkRobe => Gear::builder("Silk Robe", GearKind::Robe)
                .price(140)
                .stats(stats(0.0, 0.0, 0.0, 1.0))
                .defense(1)
                .mp(10)
                .build(),
            IronHelm => Gear::builder("Iron Helm", GearKind::Helm)
                .price(110)
                .defense(3)
                .build(),
            FeltCap => Gear::builder("Felt Cap", GearKind::Cap)
                .price(40)
                .defense(1)
                .build(),
            MageHood => Gear::builder("Mage Hood", GearKind::Hood)
                .price(90)
                .stats(stats(0.0, 0.0, 0.0, 1.0))
                .defense(1)
                .build(),
            SilverCirclet => Gear::builder("Silver Circlet", GearKind::Circlet)
                .price(400)
                .rarity(Rarity::Rare)
                .stats(stats(0.0, 1.0, 0.0, 2.0))
                .defense(2)
                .elements(Element::HOLY)
                .build(),
            PowerRing => Gear::builder("Power Ring", GearKind::Accessory)
                .price(300)
                .stats(stats(3.0, 0.0, 0.0, 0.0))
                .ability_points(1)
                .build(),
            GuardAmulet => Gear::builder("Guard Amulet", GearKind::Accessory)
                .price(280)
                // Accessories never add flat defense; this one boosts vitality instead.
                .stats(stats(0.0, 0.0, 2.0, 0.0))
                .ability_points(1)
                .build(),
            GiantBelt => Gear::builder("Giant Belt", GearKind::Accessory)
                .price(350)
                .rarity(Rarity::Uncommon)
                .hp(20)
                .build(),
        }
    }
}

/// Immutable gear definitions keyed by [`GearId`], shared through `Arc`.
#[derive(Clone, Debug, Default)]
pub struct GearCatalog {
    entries: BTreeMap<GearId, Arc<Gear>>,
}

impl GearCatalog {
    /// Every built-in definition.
    pub fn builtin() -> Self {
        use strum::IntoEnumIterator;

        Self {
            entries: GearId::iter()
                .map(|id| (id, Arc::new(id.definition())))
                .collect(),
        }
    }

    /// Replaces or adds the given definitions.
    pub fn with_overrides(mut self, overrides: impl IntoIterator<Item = (GearId, Gear)>) -> Self {
        for (id, gear) in overrides {
            self.entries.insert(id, Arc::new(gear));
        }
        self
    }

    pub fn get(&self, id: GearId) -> Option<&Arc<Gear>> {
        self.entries.get(&id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (GearId, &Arc<Gear>)> + '_ {
        self.entries.iter().map(|(id, gear)| (*id, gear))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn builtin_covers_every_id() {
        let catalog = GearCatalog::builtin();
        assert_eq!(catalog.len(), GearId::iter().count());
    }

    #[test]
    fn lookups_share_one_definition() {
        let catalog = GearCatalog::builtin();
        let a = catalog.get(GearId::Broadsword).unwrap().clone();
        let b = catalog.get(GearId::Broadsword).unwrap().clone();
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(a.kind, GearKind::Sword);
    }

    #[test]
    fn overrides_replace_entries() {
        let custom = Gear::builder("Rusty Sword", GearKind::Sword).attack(1).build();
        let catalog = GearCatalog::builtin().with_overrides([(GearId::ShortSword, custom)]);
        assert_eq!(catalog.get(GearId::ShortSword).unwrap().name, "Rusty Sword");
        assert_eq!(catalog.len(), GearId::iter().count());
    }

    #[test]
    fn ids_parse_from_snake_case() {
        assert_eq!("guard_amulet".parse::<GearId>().ok(), Some(GearId::GuardAmulet));
        assert_eq!(GearId::KiteShield.to_string(), "kite_shield");
    }
}
