/// Oracle providing balance formulas.
///
/// The evasion curve is a tuning decision owned by content, so the rules only
/// call it. Implementations must be pure: the same inputs always yield the
/// same value.
pub trait BalanceOracle: Send + Sync {
    /// Evasion rating for the given effective agility and level.
    fn evasion(&self, agility: f32, level: u32) -> i32;
}

impl<T: BalanceOracle + ?Sized> BalanceOracle for &T {
    fn evasion(&self, agility: f32, level: u32) -> i32 {
        (**self).evasion(agility, level)
    }
}
