//! Equipment slots for mercenaries.
//!
//! A mercenary has six slots. Which slot a piece of gear lands in is decided in
//! exactly one place, [`GearKind::slot_group`], and each group lists its
//! candidate slots in priority order:
//!
//! | Group         | Candidate slots                     |
//! |---------------|-------------------------------------|
//! | WeaponShield  | `WeaponShield1`, `WeaponShield2`    |
//! | Armor         | `Armor`                             |
//! | Hat           | `Hat`                               |
//! | Accessory     | `Accessory1`, `Accessory2`          |
//!
//! Equipping never replaces an occupied slot; when every candidate is taken the
//! request is rejected and nothing changes.

pub mod gear;

use std::sync::Arc;

pub use gear::{Element, Gear, GearBuilder, GearKind, Rarity};

use crate::config::RulesConfig;
use crate::error::{ErrorSeverity, GameError};
use crate::stats::{FlatBonuses, StatBlock};

/// One of the six fixed equipment positions.
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
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum EquipSlot {
    WeaponShield1 = 0,
    WeaponShield2 = 1,
    Armor = 2,
    Hat = 3,
    Accessory1 = 4,
    Accessory2 = 5,
}

impl EquipSlot {
    /// Order in which equipped stat bonuses are accumulated.
    pub const SUMMATION_ORDER: [EquipSlot; RulesConfig::EQUIP_SLOTS] = [
        EquipSlot::WeaponShield1,
        EquipSlot::Armor,
        EquipSlot::Hat,
        EquipSlot::WeaponShield2,
        EquipSlot::Accessory1,
        EquipSlot::Accessory2,
    ];

    const fn index(self) -> usize {
        self as usize
    }

    pub const fn group(self) -> SlotGroup {
        match self {
            Self::WeaponShield1 | Self::WeaponShield2 => SlotGroup::WeaponShield,
            Self::Armor => SlotGroup::Armor,
            Self::Hat => SlotGroup::Hat,
            Self::Accessory1 | Self::Accessory2 => SlotGroup::Accessory,
        }
    }
}

/// Family of slots a gear kind may occupy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum SlotGroup {
    WeaponShield,
    Armor,
    Hat,
    Accessory,
}

impl SlotGroup {
    /// Candidate slots in the order they are tried.
    pub const fn slots(self) -> &'static [EquipSlot] {
        match self {
            Self::WeaponShield => &[EquipSlot::WeaponShield1, EquipSlot::WeaponShield2],
            Self::Armor => &[EquipSlot::Armor],
            Self::Hat => &[EquipSlot::Hat],
            Self::Accessory => &[EquipSlot::Accessory1, EquipSlot::Accessory2],
        }
    }
}

impl GearKind {
    /// Routes a gear kind to its slot group.
    pub const fn slot_group(self) -> SlotGroup {
        match self {
            Self::Sword | Self::Knuckle | Self::Staff | Self::Rod | Self::Shield => {
                SlotGroup::WeaponShield
            }
            Self::HeavyArmor | Self::LightArmor | Self::Robe => SlotGroup::Armor,
            Self::Helm | Self::Cap | Self::Hood | Self::Circlet => SlotGroup::Hat,
            Self::Accessory => SlotGroup::Accessory,
        }
    }
}

/// Errors returned when equipping gear.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum EquipError {
    #[error("cannot equip {kind}: every {group} slot is occupied")]
    SlotsOccupied { kind: GearKind, group: SlotGroup },
}

impl GameError for EquipError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Recoverable
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::SlotsOccupied { .. } => "EQUIP_SLOTS_OCCUPIED",
        }
    }
}

/// Equipment state for a mercenary.
///
/// Slots hold shared references to immutable [`Gear`] definitions.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Equipment {
    slots: [Option<Arc<Gear>>; RulesConfig::EQUIP_SLOTS],
}

impl Equipment {
    /// Creates empty equipment.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn get(&self, slot: EquipSlot) -> Option<&Arc<Gear>> {
        self.slots[slot.index()].as_ref()
    }

    pub fn is_slot_empty(&self, slot: EquipSlot) -> bool {
        self.slots[slot.index()].is_none()
    }

    /// Returns the slot `kind` would be placed in, without equipping.
    pub fn slot_for(&self, kind: GearKind) -> Option<EquipSlot> {
        kind.slot_group()
            .slots()
            .iter()
            .copied()
            .find(|slot| self.is_slot_empty(*slot))
    }

    /// Places `gear` in the first free candidate slot of its group.
    pub fn equip(&mut self, gear: Arc<Gear>) -> Result<EquipSlot, EquipError> {
        let kind = gear.kind;
        let Some(slot) = self.slot_for(kind) else {
            tracing::trace!("no free {} slot for {}", kind.slot_group(), gear.name);
            return Err(EquipError::SlotsOccupied {
                kind,
                group: kind.slot_group(),
            });
        };

        tracing::trace!("routing {} ({}) to {}", gear.name, kind, slot);
        self.slots[slot.index()] = Some(gear);
        Ok(slot)
    }

    /// Empties `slot`, returning what was there.
    pub fn unequip(&mut self, slot: EquipSlot) -> Option<Arc<Gear>> {
        self.slots[slot.index()].take()
    }

    /// Occupied slots in summation order.
    pub fn iter(&self) -> impl Iterator<Item = (EquipSlot, &Arc<Gear>)> + '_ {
        EquipSlot::SUMMATION_ORDER
            .into_iter()
            .filter_map(|slot| self.get(slot).map(|gear| (slot, gear)))
    }

    pub fn occupied(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    /// Sum of every equipped stat bonus, unclamped.
    pub fn stat_bonus(&self) -> StatBlock {
        self.iter().map(|(_, gear)| gear.stats).sum()
    }

    /// Flat attack from weapon slots and flat defense from armor, hat and weapon slots.
    pub fn flat_bonuses(&self) -> FlatBonuses {
        self.iter()
            .fold(FlatBonuses::default(), |mut acc, (slot, gear)| {
                match slot.group() {
                    SlotGroup::WeaponShield => {
                        acc.attack = acc.attack.saturating_add(gear.attack);
                        acc.defense = acc.defense.saturating_add(gear.defense);
                    }
                    SlotGroup::Armor | SlotGroup::Hat => {
                        acc.defense = acc.defense.saturating_add(gear.defense);
                    }
                    SlotGroup::Accessory => {}
                }
                acc
            })
    }

    pub fn hp_bonus(&self) -> i32 {
        self.saturating_total(|gear| gear.hp)
    }

    pub fn mp_bonus(&self) -> i32 {
        self.saturating_total(|gear| gear.mp)
    }

    pub fn ability_points(&self) -> i32 {
        self.saturating_total(|gear| gear.ability_points)
    }

    fn saturating_total(&self, field: impl Fn(&Gear) -> i32) -> i32 {
        self.iter()
            .fold(0i32, |total, (_, gear)| total.saturating_add(field(gear)))
    }
}
