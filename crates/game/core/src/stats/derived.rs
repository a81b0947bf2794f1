//! Battle stats derived from effective stats and flat gear bonuses.
//!
//! These are NOT stored - recomputed on demand from the mercenary's current
//! base stats, job, level and equipment.

use super::bounds::{StatBounds, round_half_up};
use super::core::StatBlock;
use crate::env::BalanceOracle;

/// Flat attack/defense bonuses contributed by equipped gear.
///
/// Only weapon-slot items add attack. Defense comes from the armor, hat and
/// both weapon/shield slots; accessories never add flat defense.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FlatBonuses {
    pub attack: i32,
    pub defense: i32,
}

/// Attack, defense and evasion at a point in time.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BattleStats {
    pub attack: i32,
    pub defense: i32,
    pub evasion: i32,
}

impl BattleStats {
    /// Derives battle stats.
    ///
    /// Formulas:
    /// - Attack: round(STR) + weapon attack
    /// - Defense: round(VIT) + passive defense + armor/hat/weapon defense
    /// - Evasion: supplied by the balance oracle from (AGI, level)
    pub fn compute(
        effective: &StatBlock,
        level: u32,
        flat: FlatBonuses,
        passive_defense: i32,
        balance: &dyn BalanceOracle,
    ) -> Self {
        const BOUNDS: StatBounds = StatBounds::BATTLE;

        let attack = round_half_up(effective.strength).saturating_add(flat.attack);
        let defense = round_half_up(effective.vitality)
            .saturating_add(passive_defense)
            .saturating_add(flat.defense);

        Self {
            attack: BOUNDS.clamp(attack),
            defense: BOUNDS.clamp(defense),
            evasion: balance.evasion(effective.agility, level),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FlatEvasion;

    impl BalanceOracle for FlatEvasion {
        fn evasion(&self, agility: f32, level: u32) -> i32 {
            round_half_up(agility) + level as i32
        }
    }

    #[test]
    fn attack_and_defense_include_flat_bonuses() {
        let effective = StatBlock::new(12.4, 6.0, 9.5, 3.0);
        let flat = FlatBonuses {
            attack: 7,
            defense: 4,
        };

        let stats = BattleStats::compute(&effective, 3, flat, 2, &FlatEvasion);

        assert_eq!(stats.attack, 12 + 7);
        // round(9.5) = 10
        assert_eq!(stats.defense, 10 + 2 + 4);
        assert_eq!(stats.evasion, 6 + 3);
    }

    #[test]
    fn extreme_bonuses_saturate_into_bounds() {
        let flat = FlatBonuses {
            attack: i32::MAX,
            defense: i32::MAX,
        };
        let strong = StatBlock::new(999.0, 0.0, 999.0, 0.0);
        let stats = BattleStats::compute(&strong, 1, flat, i32::MAX, &FlatEvasion);
        assert_eq!(stats.attack, 9999);
        assert_eq!(stats.defense, 9999);

        let stats = BattleStats::compute(
            &StatBlock::ZERO,
            1,
            FlatBonuses::default(),
            i32::MIN,
            &FlatEvasion,
        );
        assert_eq!(stats.defense, 0);
    }

    #[test]
    fn negative_totals_clamp_to_zero() {
        let stats = BattleStats::compute(
            &StatBlock::ZERO,
            1,
            FlatBonuses::default(),
            -50,
            &FlatEvasion,
        );
        assert_eq!(stats.defense, 0);
        assert_eq!(stats.attack, 0);
    }
}
