//! Balance table backing the evasion curve.

use rpg_core::{BalanceOracle, round_half_up};

/// Linear evasion curve with a hard cap.
///
/// `evasion = round_half_up(base + agility × per_agility + level × per_level)`,
/// clamped to `[0, cap]`.
///
/// # Example
/// ```
/// # use rpg_content::BalanceTable;
/// # use rpg_core::BalanceOracle;
/// let table = BalanceTable::default();
/// // 10 × 0.5 + 4 × 0.25 = 6
/// assert_eq!(table.evasion(10.0, 4), 6);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BalanceTable {
    pub base: f32,
    pub per_agility: f32,
    pub per_level: f32,
    pub cap: i32,
}

impl BalanceTable {
    pub const DEFAULT_BASE: f32 = 0.0;
    pub const DEFAULT_PER_AGILITY: f32 = 0.5;
    pub const DEFAULT_PER_LEVEL: f32 = 0.25;
    pub const DEFAULT_CAP: i32 = 75;
}

impl Default for BalanceTable {
    fn default() -> Self {
        Self {
            base: Self::DEFAULT_BASE,
            per_agility: Self::DEFAULT_PER_AGILITY,
            per_level: Self::DEFAULT_PER_LEVEL,
            cap: Self::DEFAULT_CAP,
        }
    }
}

impl BalanceOracle for BalanceTable {
    fn evasion(&self, agility: f32, level: u32) -> i32 {
        let raw = self.base + agility * self.per_agility + level as f32 * self.per_level;
        round_half_up(raw).clamp(0, self.cap.max(0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_curve() {
        let table = BalanceTable::default();
        // 5 × 0.5 + 1 × 0.25 = 2.75
        assert_eq!(table.evasion(5.0, 1), 3);
        // 3 × 0.5 + 2 × 0.25 = 2.0
        assert_eq!(table.evasion(3.0, 2), 2);
    }

    #[test]
    fn evasion_is_capped() {
        let table = BalanceTable::default();
        assert_eq!(table.evasion(999.0, 99), 75);
    }

    #[test]
    fn negative_base_floors_at_zero() {
        let table = BalanceTable {
            base: -20.0,
            ..BalanceTable::default()
        };
        assert_eq!(table.evasion(4.0, 1), 0);
    }
}
