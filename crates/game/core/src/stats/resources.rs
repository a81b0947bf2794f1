//! Resources - HP and MP pools.
//!
//! Resource pools are partially stored:
//! - Maximum values: derived from effective stats on every recompute
//! - Current values: mutable game state, always within `[0, maximum]`
//!
//! Formulas:
//! - HP_max = 25 + VIT × 5 + gear HP
//! - MP_max = 10 + MAG × 3 + gear MP

use super::bounds::{StatBounds, round_half_up};
use super::core::StatBlock;
use crate::error::{ErrorSeverity, GameError};

/// Enum representing individual resource types.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ResourceKind {
    /// Health points.
    #[strum(serialize = "HP")]
    Hp,
    /// Magic points.
    #[strum(serialize = "MP")]
    Mp,
}

/// Maximum resource values computed from effective stats.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResourceMaximums {
    pub hp_max: u32,
    pub mp_max: u32,
}

impl ResourceMaximums {
    /// Compute both maximums from clamped effective stats plus flat gear bonuses.
    pub fn compute(effective: &StatBlock, hp_bonus: i32, mp_bonus: i32) -> Self {
        Self {
            hp_max: Self::compute_hp(effective, hp_bonus),
            mp_max: Self::compute_mp(effective, mp_bonus),
        }
    }

    /// Formula: clamp_hp(round(25 + VIT × 5) + gear HP)
    pub fn compute_hp(effective: &StatBlock, hp_bonus: i32) -> u32 {
        let base = round_half_up(25.0 + effective.vitality * 5.0);
        StatBounds::HP.clamp(base.saturating_add(hp_bonus)) as u32
    }

    /// Formula: clamp_mp(round(10 + MAG × 3) + gear MP)
    pub fn compute_mp(effective: &StatBlock, mp_bonus: i32) -> u32 {
        let base = round_half_up(10.0 + effective.magic * 3.0);
        StatBounds::MP.clamp(base.saturating_add(mp_bonus)) as u32
    }

    pub fn get(&self, resource: ResourceKind) -> u32 {
        match resource {
            ResourceKind::Hp => self.hp_max,
            ResourceKind::Mp => self.mp_max,
        }
    }
}

/// A current/maximum pair with `current <= maximum` maintained by every method.
///
/// Deserialized pools go through [`ResourcePool::new`], so a stored `current`
/// above `maximum` is lowered on load.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "PoolFields"))]
pub struct ResourcePool {
    current: u32,
    maximum: u32,
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct PoolFields {
    current: u32,
    maximum: u32,
}

#[cfg(feature = "serde")]
impl From<PoolFields> for ResourcePool {
    fn from(fields: PoolFields) -> Self {
        Self::new(fields.current, fields.maximum)
    }
}

impl ResourcePool {
    /// Creates a pool with `current` lowered to fit `maximum`.
    pub const fn new(current: u32, maximum: u32) -> Self {
        Self {
            current: if current > maximum { maximum } else { current },
            maximum,
        }
    }

    /// Creates a pool filled to `maximum`.
    pub const fn full(maximum: u32) -> Self {
        Self {
            current: maximum,
            maximum,
        }
    }

    pub const fn current(&self) -> u32 {
        self.current
    }

    pub const fn maximum(&self) -> u32 {
        self.maximum
    }

    pub const fn is_empty(&self) -> bool {
        self.current == 0
    }

    pub const fn is_full(&self) -> bool {
        self.current == self.maximum
    }

    /// Replaces the maximum. Current is lowered to fit, never raised.
    pub fn set_maximum(&mut self, maximum: u32) {
        self.maximum = maximum;
        self.current = self.current.min(maximum);
    }

    /// Removes up to `amount`, flooring at zero. Returns the amount removed.
    pub fn drain(&mut self, amount: u32) -> u32 {
        let removed = amount.min(self.current);
        self.current -= removed;
        removed
    }

    /// Adds up to `amount`, capping at the maximum. Returns the amount added.
    pub fn fill(&mut self, amount: u32) -> u32 {
        let added = amount.min(self.maximum.saturating_sub(self.current));
        self.current += added;
        added
    }

    /// Removes exactly `amount` or nothing.
    pub fn spend(&mut self, kind: ResourceKind, amount: u32) -> Result<(), ResourceError> {
        if self.current < amount {
            return Err(ResourceError::Insufficient {
                kind,
                required: amount,
                available: self.current,
            });
        }
        self.current -= amount;
        Ok(())
    }
}

/// Failure to pay a resource cost.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ResourceError {
    #[error("not enough {kind}: need {required}, have {available}")]
    Insufficient {
        kind: ResourceKind,
        required: u32,
        available: u32,
    },
}

impl GameError for ResourceError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Recoverable
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Insufficient { .. } => "RESOURCE_INSUFFICIENT",
        }
    }
}
