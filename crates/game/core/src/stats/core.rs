//! Core stat vector shared by base stats, job growth and gear bonuses.
//!
//! Every source of stats (a mercenary's innate block, a job's contribution at a
//! level, each equipped item) is a `StatBlock`. Blocks are summed without any
//! clamping; clamping and rounding happen only where integer quantities are
//! derived (see [`super::bounds`]).

use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul};

use super::bounds::StatBounds;

/// The four attributes that define a character.
///
/// - **Strength**: physical attack
/// - **Agility**: evasion
/// - **Vitality**: maximum HP and defense
/// - **Magic**: maximum MP
///
/// Values are `f32` because per-level growth is fractional.
///
/// # Example
/// ```
/// # use rpg_core::StatBlock;
/// let base = StatBlock::new(8.0, 5.0, 9.0, 3.0);
/// let ring = StatBlock::new(0.0, 2.0, 0.0, 1.0);
/// let total = base + ring;
/// assert_eq!(total, StatBlock::new(8.0, 7.0, 9.0, 4.0));
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct StatBlock {
    pub strength: f32,
    pub agility: f32,
    pub vitality: f32,
    pub magic: f32,
}

impl StatBlock {
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0, 0.0);

    pub const fn new(strength: f32, agility: f32, vitality: f32, magic: f32) -> Self {
        Self {
            strength,
            agility,
            vitality,
            magic,
        }
    }

    /// Multiplies every attribute by `factor`.
    pub fn scaled(self, factor: f32) -> Self {
        Self {
            strength: self.strength * factor,
            agility: self.agility * factor,
            vitality: self.vitality * factor,
            magic: self.magic * factor,
        }
    }

    /// Clamps every attribute into `bounds`.
    pub fn clamped(self, bounds: StatBounds) -> Self {
        Self {
            strength: bounds.clamp_f32(self.strength),
            agility: bounds.clamp_f32(self.agility),
            vitality: bounds.clamp_f32(self.vitality),
            magic: bounds.clamp_f32(self.magic),
        }
    }

    pub fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }
}

/// Element-wise sum. Never clamps.
impl Add for StatBlock {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            strength: self.strength + rhs.strength,
            agility: self.agility + rhs.agility,
            vitality: self.vitality + rhs.vitality,
            magic: self.magic + rhs.magic,
        }
    }
}

impl AddAssign for StatBlock {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Mul<f32> for StatBlock {
    type Output = Self;

    fn mul(self, rhs: f32) -> Self {
        self.scaled(rhs)
    }
}

impl Sum for StatBlock {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, |acc, block| acc + block)
    }
}

impl<'a> Sum<&'a StatBlock> for StatBlock {
    fn sum<I: Iterator<Item = &'a Self>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn addition_is_commutative() {
        let a = StatBlock::new(1.5, 2.0, 3.25, 4.0);
        let b = StatBlock::new(0.5, -1.0, 0.75, 2.0);
        assert_eq!(a + b, b + a);
    }

    #[test]
    fn addition_does_not_clamp() {
        let a = StatBlock::new(900.0, 0.0, 0.0, 0.0);
        let b = StatBlock::new(900.0, -5.0, 0.0, 0.0);
        let sum = a + b;
        assert_eq!(sum.strength, 1800.0);
        assert_eq!(sum.agility, -5.0);
    }

    #[test]
    fn clamped_respects_bounds() {
        let block = StatBlock::new(1800.0, -5.0, 12.5, 0.0).clamped(StatBounds::STATS);
        assert_eq!(block, StatBlock::new(999.0, 0.0, 12.5, 0.0));
    }

    #[test]
    fn sum_over_iterator() {
        let parts = [
            StatBlock::new(1.0, 0.0, 0.0, 0.0),
            StatBlock::new(0.0, 2.0, 0.0, 0.0),
            StatBlock::new(0.0, 0.0, 3.0, 4.0),
        ];
        let total: StatBlock = parts.iter().sum();
        assert_eq!(total, StatBlock::new(1.0, 2.0, 3.0, 4.0));
    }
}
