//! A group of mercenaries sharing one item bag.
//!
//! The party is the owner that moves items between the bag and its members:
//! using consumables, and shuttling gear between bag slots and equipment
//! slots. Every operation either completes or leaves both sides unchanged.

use crate::actor::Mercenary;
use crate::config::RulesConfig;
use crate::equipment::{EquipError, EquipSlot};
use crate::error::{ErrorSeverity, GameError};
use crate::item::{BagError, BagHolder, BagItem, ItemBag, UseContext, UseError, UseOutcome};

/// Errors from party-level item operations.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum PartyError {
    #[error("no party member at index {0}")]
    NoSuchMember(usize),

    #[error("bag slot {slot} does not hold gear")]
    NotGear { slot: usize },

    #[error("equipment slot {0} is empty")]
    NothingEquipped(EquipSlot),

    #[error(transparent)]
    Bag(#[from] BagError),

    #[error(transparent)]
    Equip(#[from] EquipError),

    #[error(transparent)]
    Use(#[from] UseError),
}

impl GameError for PartyError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::NoSuchMember(_) | Self::NotGear { .. } | Self::NothingEquipped(_) => {
                ErrorSeverity::Validation
            }
            Self::Bag(err) => err.severity(),
            Self::Equip(err) => err.severity(),
            Self::Use(err) => err.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::NoSuchMember(_) => "PARTY_NO_SUCH_MEMBER",
            Self::NotGear { .. } => "PARTY_NOT_GEAR",
            Self::NothingEquipped(_) => "PARTY_NOTHING_EQUIPPED",
            Self::Bag(err) => err.error_code(),
            Self::Equip(err) => err.error_code(),
            Self::Use(err) => err.error_code(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Party {
    pub bag: ItemBag,
    pub members: Vec<Mercenary>,
}

impl BagHolder for Party {
    fn bag(&self) -> &ItemBag {
        &self.bag
    }

    fn bag_mut(&mut self) -> &mut ItemBag {
        &mut self.bag
    }
}

impl Party {
    pub fn new(bag: ItemBag) -> Self {
        Self {
            bag,
            members: Vec::new(),
        }
    }

    /// Empty party with a bag sized from `config`.
    pub fn from_config(config: &RulesConfig) -> Self {
        Self::new(ItemBag::from_config(config))
    }

    pub fn add_member(&mut self, member: Mercenary) -> usize {
        self.members.push(member);
        self.members.len() - 1
    }

    pub fn member(&self, index: usize) -> Option<&Mercenary> {
        self.members.get(index)
    }

    pub fn member_mut(&mut self, index: usize) -> Result<&mut Mercenary, PartyError> {
        self.members
            .get_mut(index)
            .ok_or(PartyError::NoSuchMember(index))
    }

    /// Uses one unit of the consumable in bag slot `slot`.
    ///
    /// Bag upgrades act on the party bag; every other effect targets `member`.
    /// The unit is consumed only if the effect succeeds.
    pub fn use_item(&mut self, slot: usize, member: usize) -> Result<UseOutcome, PartyError> {
        let consumable = match self.bag.get(slot)? {
            BagItem::Consumable(consumable) => consumable.clone(),
            BagItem::Gear(_) => return Err(BagError::NotConsumable { slot }.into()),
        };

        let outcome = if consumable.effect().targets_bag() {
            consumable.apply(&mut UseContext::Bag(&mut self.bag))?
        } else {
            let target = self
                .members
                .get_mut(member)
                .ok_or(PartyError::NoSuchMember(member))?;
            consumable.apply(&mut UseContext::Mercenary(target))?
        };

        let remaining = self.bag.consume_from_stack(slot)?;
        tracing::debug!("{} used from slot {}, {} left", consumable.name(), slot, remaining);
        Ok(outcome)
    }

    /// Moves gear from bag slot `slot` onto `member`.
    ///
    /// The bag slot is emptied only once the member accepts the gear.
    pub fn equip_from_bag(&mut self, member: usize, slot: usize) -> Result<EquipSlot, PartyError> {
        let gear = match self.bag.get(slot)? {
            BagItem::Gear(gear) => gear.clone(),
            BagItem::Consumable(_) => return Err(PartyError::NotGear { slot }),
        };

        let equipped = self.member_mut(member)?.equip(gear)?;
        self.bag.take(slot)?;
        Ok(equipped)
    }

    /// Moves the gear in `member`'s `slot` into the bag.
    ///
    /// Fails and keeps the gear equipped when the bag is full.
    pub fn unequip_to_bag(&mut self, member: usize, slot: EquipSlot) -> Result<usize, PartyError> {
        let Some(mercenary) = self.members.get_mut(member) else {
            return Err(PartyError::NoSuchMember(member));
        };
        if mercenary.equipment().is_slot_empty(slot) {
            return Err(PartyError::NothingEquipped(slot));
        }
        if self.bag.is_full() {
            return Err(BagError::Full {
                capacity: self.bag.capacity(),
            }
            .into());
        }

        let gear = mercenary
            .unequip(slot)
            .ok_or(PartyError::NothingEquipped(slot))?;
        match self.bag.try_add(BagItem::Gear(gear.clone())) {
            Ok(insert) => Ok(insert.slot()),
            Err(err) => {
                // A slot in its group was just vacated, so this cannot be rejected.
                if let Err(equip_err) = mercenary.equip(gear) {
                    tracing::warn!("could not re-equip after failed unequip: {equip_err}");
                }
                Err(err.into())
            }
        }
    }
}
