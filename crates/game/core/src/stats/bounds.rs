//! Clamping bounds and the rounding rule for integer-facing quantities.
//!
//! All stat sums are carried as `f32`. Conversion to integers happens in one
//! place, [`round_half_up`], and every clamp range is declared here.

/// Bounds configuration for a specific stat calculation.
///
/// Different quantities require different ranges:
/// - **Stats**: [0, 999] per attribute after summing every source
/// - **HP**: [1, 9999] so a living mercenary always has a maximum
/// - **MP**: [0, 999]
/// - **Battle**: [0, 9999] for attack and defense
///
/// # Usage
/// ```
/// # use rpg_core::stats::StatBounds;
/// let bounds = StatBounds::HP;
/// assert_eq!(bounds.clamp(0), 1);
/// assert_eq!(bounds.clamp(12_000), 9999);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StatBounds {
    pub min: i32,
    pub max: i32,
}

impl StatBounds {
    /// Per-attribute bounds for the summed stat block.
    pub const STATS: Self = Self { min: 0, max: 999 };

    /// Maximum HP bounds.
    pub const HP: Self = Self { min: 1, max: 9999 };

    /// Maximum MP bounds.
    pub const MP: Self = Self { min: 0, max: 999 };

    /// Attack and defense bounds.
    pub const BATTLE: Self = Self { min: 0, max: 9999 };

    pub const fn clamp(&self, value: i32) -> i32 {
        if value < self.min {
            self.min
        } else if value > self.max {
            self.max
        } else {
            value
        }
    }

    pub fn clamp_f32(&self, value: f32) -> f32 {
        value.clamp(self.min as f32, self.max as f32)
    }
}

/// Rounds to the nearest integer, halves going up (2.5 → 3, -2.5 → -2).
///
/// This is the single rounding rule for fractional growth: HP, MP, attack and
/// defense all pass through it.
pub fn round_half_up(value: f32) -> i32 {
    (value + 0.5).floor() as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn halves_round_up() {
        assert_eq!(round_half_up(2.5), 3);
        assert_eq!(round_half_up(2.49), 2);
        assert_eq!(round_half_up(-2.5), -2);
        assert_eq!(round_half_up(-2.51), -3);
        assert_eq!(round_half_up(70.0), 70);
    }

    #[test]
    fn clamp_to_bounds() {
        assert_eq!(StatBounds::MP.clamp(-4), 0);
        assert_eq!(StatBounds::MP.clamp(1200), 999);
        assert_eq!(StatBounds::STATS.clamp_f32(-0.5), 0.0);
        assert_eq!(StatBounds::STATS.clamp_f32(17.25), 17.25);
    }
}
