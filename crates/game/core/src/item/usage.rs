//! Applying consumables to whatever they are used on.
//!
//! The target is an explicit [`UseContext`] variant. Bag upgrades need a
//! context that exposes an [`ItemBag`], either directly or through a
//! [`BagHolder`]; every other effect needs a mercenary.

use super::bag::{BagError, ItemBag};
use super::{Consumable, ConsumableEffect};
use crate::actor::Mercenary;
use crate::error::{ErrorSeverity, GameError};

/// Capability: owns an item bag.
pub trait BagHolder {
    fn bag(&self) -> &ItemBag;
    fn bag_mut(&mut self) -> &mut ItemBag;
}

/// Target of a consumable.
pub enum UseContext<'a> {
    Bag(&'a mut ItemBag),
    Holder(&'a mut dyn BagHolder),
    Mercenary(&'a mut Mercenary),
}

impl<'a> UseContext<'a> {
    /// The bag exposed by this context, if it has one.
    pub fn bag_mut(&mut self) -> Option<&mut ItemBag> {
        match self {
            Self::Bag(bag) => Some(&mut **bag),
            Self::Holder(holder) => Some(holder.bag_mut()),
            Self::Mercenary(_) => None,
        }
    }

    pub fn mercenary_mut(&mut self) -> Option<&mut Mercenary> {
        match self {
            Self::Mercenary(mercenary) => Some(&mut **mercenary),
            Self::Bag(_) | Self::Holder(_) => None,
        }
    }
}

/// What a successful use did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UseOutcome {
    Healed { amount: u32 },
    MpRestored { amount: u32 },
    Revived { hp: u32 },
    BagUpgraded { capacity: usize },
}

/// Reasons a consumable could not be used. Nothing is mutated on failure.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum UseError {
    #[error("target has no item bag")]
    NoBag,

    #[error("effect needs a mercenary target")]
    NoTarget,

    #[error("target is down")]
    TargetDown,

    #[error("target is not down")]
    TargetAlive,

    #[error("target is already at full strength")]
    NoEffect,

    #[error(transparent)]
    Bag(#[from] BagError),
}

impl GameError for UseError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Bag(err) => err.severity(),
            Self::NoBag | Self::NoTarget => ErrorSeverity::Validation,
            _ => ErrorSeverity::Recoverable,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::NoBag => "USE_NO_BAG",
            Self::NoTarget => "USE_NO_TARGET",
            Self::TargetDown => "USE_TARGET_DOWN",
            Self::TargetAlive => "USE_TARGET_ALIVE",
            Self::NoEffect => "USE_NO_EFFECT",
            Self::Bag(err) => err.error_code(),
        }
    }
}

impl ConsumableEffect {
    pub fn apply(&self, ctx: &mut UseContext<'_>) -> Result<UseOutcome, UseError> {
        match *self {
            Self::Heal(amount) => {
                let target = living_target(ctx)?;
                match target.heal(saturating_i32(amount)) {
                    0 => Err(UseError::NoEffect),
                    amount => Ok(UseOutcome::Healed { amount }),
                }
            }
            Self::RestoreMp(amount) => {
                let target = living_target(ctx)?;
                match target.restore_mp(saturating_i32(amount)) {
                    0 => Err(UseError::NoEffect),
                    amount => Ok(UseOutcome::MpRestored { amount }),
                }
            }
            Self::Revive(hp) => {
                let target = ctx.mercenary_mut().ok_or(UseError::NoTarget)?;
                if target.is_alive() {
                    return Err(UseError::TargetAlive);
                }
                Ok(UseOutcome::Revived {
                    hp: target.revive(hp),
                })
            }
            Self::UpgradeBag(extra) => {
                let bag = ctx.bag_mut().ok_or(UseError::NoBag)?;
                let capacity = bag.try_upgrade(extra)?;
                Ok(UseOutcome::BagUpgraded { capacity })
            }
        }
    }
}

impl Consumable {
    /// Applies this consumable's effect. Does not touch the stack count.
    pub fn apply(&self, ctx: &mut UseContext<'_>) -> Result<UseOutcome, UseError> {
        let outcome = self.effect().apply(ctx);
        match &outcome {
            Ok(result) => tracing::debug!("used {}: {:?}", self.name(), result),
            Err(err) => tracing::debug!("cannot use {}: {}", self.name(), err),
        }
        outcome
    }
}

fn living_target<'c>(ctx: &'c mut UseContext<'_>) -> Result<&'c mut Mercenary, UseError> {
    let target = ctx.mercenary_mut().ok_or(UseError::NoTarget)?;
    if !target.is_alive() {
        return Err(UseError::TargetDown);
    }
    Ok(target)
}

fn saturating_i32(amount: u32) -> i32 {
    i32::try_from(amount).unwrap_or(i32::MAX)
}
