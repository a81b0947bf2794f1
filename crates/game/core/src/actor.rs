//! Mercenaries: the actors whose stats this crate derives.
//!
//! # Design Principles
//!
//! 1. **Stored inputs**: base stats, job, level, equipment and current HP/MP
//! 2. **Cached outputs**: effective stats and HP/MP maximums, rebuilt by
//!    [`Mercenary::recalculate_derived`] after every level, job or gear change
//! 3. **On-demand outputs**: battle stats, recomputed from inputs on each call
//!
//! # Invariants
//!
//! - `effective` equals `clamp(base + job(level) + gear)` for the current inputs
//! - current HP/MP never exceed their maximums; a recompute only lowers them

use std::sync::Arc;

use crate::config::RulesConfig;
use crate::env::BalanceOracle;
use crate::equipment::{EquipError, EquipSlot, Equipment, Gear};
use crate::job::Job;
use crate::stats::{
    BattleStats, ResourceError, ResourceKind, ResourceMaximums, ResourcePool, StatBlock,
    StatBounds,
};

/// Numeric hooks that skill effects set from outside.
///
/// The rules read `defense_bonus` for battle stats and the regen values in
/// [`Mercenary::regenerate`]; the chances are carried for battle resolution.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PassiveModifiers {
    pub defense_bonus: i32,
    /// Chance in `[0, 1]` to deflect an incoming hit.
    pub deflect_chance: f32,
    /// Chance in `[0, 1]` to counter after being hit.
    pub counter_chance: f32,
    pub hp_regen: i32,
    pub mp_regen: i32,
}

/// A playable character.
///
/// # Example
/// ```
/// # use std::sync::Arc;
/// # use rpg_core::{Job, JobTier, Mercenary, StatBlock};
/// let knight = Arc::new(Job::new(
///     "Knight",
///     JobTier::Primary,
///     StatBlock::new(8.0, 5.0, 9.0, 3.0),
///     StatBlock::new(0.612, 0.35, 0.7, 0.2),
/// ));
/// let merc = Mercenary::new("Aldo", knight, 1, StatBlock::ZERO);
/// assert_eq!(merc.hp().maximum(), 70);
/// assert!(merc.hp().is_full());
/// ```
#[derive(Clone, Debug)]
pub struct Mercenary {
    name: String,
    job: Arc<Job>,
    level: u32,
    base_stats: StatBlock,
    equipment: Equipment,
    passives: PassiveModifiers,

    // Cached from the fields above.
    effective: StatBlock,

    hp: ResourcePool,
    mp: ResourcePool,
}

impl Mercenary {
    /// Creates a mercenary at full HP and MP. `level` is clamped to the legal range.
    pub fn new(name: impl Into<String>, job: Arc<Job>, level: u32, base_stats: StatBlock) -> Self {
        let mut mercenary = Self {
            name: name.into(),
            job,
            level: RulesConfig::clamp_level(level),
            base_stats,
            equipment: Equipment::empty(),
            passives: PassiveModifiers::default(),
            effective: StatBlock::ZERO,
            hp: ResourcePool::default(),
            mp: ResourcePool::default(),
        };
        mercenary.recalculate_derived();
        mercenary.hp = ResourcePool::full(mercenary.hp.maximum());
        mercenary.mp = ResourcePool::full(mercenary.mp.maximum());
        mercenary
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn job(&self) -> &Arc<Job> {
        &self.job
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn base_stats(&self) -> StatBlock {
        self.base_stats
    }

    pub fn equipment(&self) -> &Equipment {
        &self.equipment
    }

    pub fn passives(&self) -> &PassiveModifiers {
        &self.passives
    }

    pub fn passives_mut(&mut self) -> &mut PassiveModifiers {
        &mut self.passives
    }

    /// Clamped base + job + gear stats as of the last recompute.
    pub fn effective_stats(&self) -> StatBlock {
        self.effective
    }

    pub fn hp(&self) -> &ResourcePool {
        &self.hp
    }

    pub fn mp(&self) -> &ResourcePool {
        &self.mp
    }

    pub fn is_alive(&self) -> bool {
        !self.hp.is_empty()
    }

    /// Ability points granted by equipped gear.
    pub fn ability_points(&self) -> i32 {
        self.equipment.ability_points()
    }

    // ========================================================================
    // Derivation
    // ========================================================================

    /// Base + job contribution, then each equipped bonus in summation order,
    /// clamped once at the end.
    fn compute_effective(&self) -> StatBlock {
        let unequipped = self.base_stats + self.job.contribution_at_level(self.level);
        self.equipment
            .iter()
            .fold(unequipped, |total, (_, gear)| total + gear.stats)
            .clamped(StatBounds::STATS)
    }

    /// Rebuilds effective stats and HP/MP maximums.
    ///
    /// Current HP/MP are lowered to fit new maximums and never raised.
    /// Calling this twice in a row changes nothing the second time.
    pub fn recalculate_derived(&mut self) {
        self.effective = self.compute_effective();
        let maximums = ResourceMaximums::compute(
            &self.effective,
            self.equipment.hp_bonus(),
            self.equipment.mp_bonus(),
        );
        self.hp.set_maximum(maximums.hp_max);
        self.mp.set_maximum(maximums.mp_max);

        tracing::debug!(
            "{} recomputed: hp {}/{}, mp {}/{}",
            self.name,
            self.hp.current(),
            self.hp.maximum(),
            self.mp.current(),
            self.mp.maximum()
        );
    }

    /// Attack, defense and evasion from the current inputs.
    ///
    /// Independent of the cached maximums and current HP/MP.
    pub fn get_battle_stats(&self, balance: &dyn BalanceOracle) -> BattleStats {
        BattleStats::compute(
            &self.compute_effective(),
            self.level,
            self.equipment.flat_bonuses(),
            self.passives.defense_bonus,
            balance,
        )
    }

    // ========================================================================
    // Equipment
    // ========================================================================

    /// Equips `gear` in the first free compatible slot.
    pub fn equip(&mut self, gear: Arc<Gear>) -> Result<EquipSlot, EquipError> {
        let name = gear.name.clone();
        let slot = self
            .equipment
            .equip(gear)
            .inspect_err(|err| tracing::debug!("{} cannot equip {}: {}", self.name, name, err))?;
        tracing::debug!("{} equipped {} in {}", self.name, name, slot);
        self.recalculate_derived();
        Ok(slot)
    }

    /// Empties `slot`. Recomputes only if something was removed.
    pub fn unequip(&mut self, slot: EquipSlot) -> Option<Arc<Gear>> {
        let removed = self.equipment.unequip(slot)?;
        tracing::debug!("{} unequipped {} from {}", self.name, removed.name, slot);
        self.recalculate_derived();
        Some(removed)
    }

    // ========================================================================
    // Progression
    // ========================================================================

    pub fn set_level(&mut self, level: u32) {
        let level = RulesConfig::clamp_level(level);
        if level != self.level {
            tracing::debug!("{} level {} -> {}", self.name, self.level, level);
            self.level = level;
            self.recalculate_derived();
        }
    }

    /// Advances one level. Returns false at the level cap.
    pub fn level_up(&mut self) -> bool {
        if self.level >= RulesConfig::MAX_LEVEL {
            return false;
        }
        self.set_level(self.level + 1);
        true
    }

    pub fn change_job(&mut self, job: Arc<Job>) {
        tracing::debug!("{} changes job {} -> {}", self.name, self.job.name(), job.name());
        self.job = job;
        self.recalculate_derived();
    }

    // ========================================================================
    // HP / MP
    // ========================================================================

    /// Applies damage. Returns true only on the hit that brings HP to zero.
    pub fn take_damage(&mut self, amount: i32) -> bool {
        if amount <= 0 || self.hp.is_empty() {
            return false;
        }
        self.hp.drain(amount.unsigned_abs());
        let died = self.hp.is_empty();
        if died {
            tracing::debug!("{} fell", self.name);
        }
        died
    }

    /// Restores HP up to the maximum. Returns the amount restored.
    pub fn heal(&mut self, amount: i32) -> u32 {
        if amount <= 0 {
            return 0;
        }
        self.hp.fill(amount.unsigned_abs())
    }

    /// Spends exactly `amount` MP, or nothing if there is not enough.
    pub fn use_mp(&mut self, amount: i32) -> Result<(), ResourceError> {
        if amount <= 0 {
            return Ok(());
        }
        self.mp.spend(ResourceKind::Mp, amount.unsigned_abs())
    }

    /// Restores MP up to the maximum. Returns the amount restored.
    pub fn restore_mp(&mut self, amount: i32) -> u32 {
        if amount <= 0 {
            return 0;
        }
        self.mp.fill(amount.unsigned_abs())
    }

    /// Brings a fallen mercenary back with at least 1 HP. Returns the new HP,
    /// or 0 if the mercenary was not down.
    pub fn revive(&mut self, hp: u32) -> u32 {
        if self.is_alive() {
            return 0;
        }
        self.hp.fill(hp.max(1));
        tracing::debug!("{} revived with {} HP", self.name, self.hp.current());
        self.hp.current()
    }

    /// Applies passive HP/MP regeneration. Fallen mercenaries do not regenerate.
    ///
    /// Returns the HP and MP restored.
    pub fn regenerate(&mut self) -> (u32, u32) {
        if !self.is_alive() {
            return (0, 0);
        }
        let hp = self.heal(self.passives.hp_regen);
        let mp = self.restore_mp(self.passives.mp_regen);
        (hp, mp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::equipment::GearKind;
    use crate::stats::round_half_up;

    struct AgilityEvasion;

    impl BalanceOracle for AgilityEvasion {
        fn evasion(&self, agility: f32, _level: u32) -> i32 {
            round_half_up(agility)
        }
    }

    fn knight() -> Arc<Job> {
        Arc::new(Job::new(
            "Knight",
            crate::job::JobTier::Primary,
            StatBlock::new(8.0, 5.0, 9.0, 3.0),
            StatBlock::new(0.612, 0.35, 0.7, 0.2),
        ))
    }

    fn mercenary() -> Mercenary {
        Mercenary::new("Aldo", knight(), 1, StatBlock::ZERO)
    }

    #[test]
    fn construction_fills_resources() {
        let merc = mercenary();
        assert_eq!(merc.hp().maximum(), 70);
        assert_eq!(merc.hp().current(), 70);
        // 10 + 3 × 3
        assert_eq!(merc.mp().maximum(), 19);
        assert_eq!(merc.effective_stats(), StatBlock::new(8.0, 5.0, 9.0, 3.0));
    }

    #[test]
    fn level_is_clamped_on_construction() {
        assert_eq!(Mercenary::new("A", knight(), 0, StatBlock::ZERO).level(), 1);
        assert_eq!(
            Mercenary::new("B", knight(), 500, StatBlock::ZERO).level(),
            RulesConfig::MAX_LEVEL
        );
    }

    #[test]
    fn recompute_is_idempotent() {
        let mut merc = mercenary();
        merc.take_damage(15);
        merc.recalculate_derived();
        let first = (merc.hp, merc.mp, merc.effective_stats());
        merc.recalculate_derived();
        assert_eq!((merc.hp, merc.mp, merc.effective_stats()), first);
    }

    #[test]
    fn defense_gear_adds_exactly_its_bonus() {
        let mut merc = mercenary();
        let baseline = merc.get_battle_stats(&AgilityEvasion);

        let mail = Gear::builder("Chain Mail", GearKind::HeavyArmor)
            .defense(4)
            .shared();
        assert_eq!(merc.equip(mail), Ok(EquipSlot::Armor));

        let equipped = merc.get_battle_stats(&AgilityEvasion);
        assert_eq!(equipped.defense, baseline.defense + 4);
        assert_eq!(equipped.attack, baseline.attack);
    }

    #[test]
    fn gear_stats_feed_maximums() {
        let mut merc = mercenary();
        let belt = Gear::builder("Giant Belt", GearKind::Accessory)
            .stats(StatBlock::new(0.0, 0.0, 2.0, 0.0))
            .hp(5)
            .shared();
        merc.equip(belt).unwrap();
        // 25 + 11 × 5 + 5
        assert_eq!(merc.hp().maximum(), 85);
        // raising the maximum never raises current HP
        assert_eq!(merc.hp().current(), 70);

        merc.unequip(EquipSlot::Accessory1).unwrap();
        assert_eq!(merc.hp().maximum(), 70);
        assert!(merc.unequip(EquipSlot::Accessory1).is_none());
    }

    #[test]
    fn unequip_lowers_current_to_new_maximum() {
        let mut merc = mercenary();
        merc.equip(Gear::builder("Charm", GearKind::Accessory).hp(30).shared())
            .unwrap();
        merc.heal(100);
        assert_eq!(merc.hp().current(), 100);

        merc.unequip(EquipSlot::Accessory1);
        assert_eq!(merc.hp().current(), 70);
    }

    #[test]
    fn rejected_equip_leaves_stats_alone() {
        let mut merc = mercenary();
        merc.equip(Gear::builder("A", GearKind::Sword).attack(3).shared())
            .unwrap();
        merc.equip(Gear::builder("B", GearKind::Shield).defense(2).shared())
            .unwrap();
        let before = merc.get_battle_stats(&AgilityEvasion);

        let axe = Gear::builder("C", GearKind::Knuckle).attack(50).shared();
        assert!(merc.equip(axe).is_err());
        assert_eq!(merc.get_battle_stats(&AgilityEvasion), before);
    }

    #[test]
    fn damage_signals_death_once() {
        let mut merc = mercenary();
        assert!(!merc.take_damage(0));
        assert!(!merc.take_damage(-5));
        assert_eq!(merc.hp().current(), 70);

        assert!(!merc.take_damage(69));
        assert!(merc.take_damage(500));
        assert_eq!(merc.hp().current(), 0);
        assert!(!merc.take_damage(10));
    }

    #[test]
    fn heal_and_restore_cap_at_maximum() {
        let mut merc = mercenary();
        merc.take_damage(30);
        assert_eq!(merc.heal(-4), 0);
        assert_eq!(merc.heal(100), 30);

        merc.use_mp(10).unwrap();
        assert_eq!(merc.restore_mp(0), 0);
        assert_eq!(merc.restore_mp(50), 10);
    }

    #[test]
    fn use_mp_is_all_or_nothing() {
        let mut merc = mercenary();
        assert!(merc.use_mp(-3).is_ok());
        assert!(merc.use_mp(0).is_ok());
        assert!(merc.use_mp(20).is_err());
        assert_eq!(merc.mp().current(), 19);
        assert!(merc.use_mp(19).is_ok());
        assert_eq!(merc.mp().current(), 0);
    }

    #[test]
    fn level_up_applies_growth() {
        let mut merc = mercenary();
        assert!(merc.level_up());
        assert!(merc.level_up());
        assert_eq!(merc.level(), 3);
        // 25 + 10.4 × 5 = 77
        assert_eq!(merc.hp().maximum(), 77);
        assert_eq!(merc.hp().current(), 70);

        merc.set_level(RulesConfig::MAX_LEVEL);
        assert!(!merc.level_up());
    }

    #[test]
    fn change_job_recomputes() {
        let mut merc = mercenary();
        let mage = Arc::new(Job::new(
            "Mage",
            crate::job::JobTier::Primary,
            StatBlock::new(2.0, 4.0, 3.0, 10.0),
            StatBlock::ZERO,
        ));
        merc.change_job(mage);
        assert_eq!(merc.job().name(), "Mage");
        assert_eq!(merc.hp().maximum(), 40);
        assert_eq!(merc.hp().current(), 40);
        assert_eq!(merc.mp().maximum(), 40);
    }

    #[test]
    fn passive_defense_feeds_battle_stats() {
        let mut merc = mercenary();
        let before = merc.get_battle_stats(&AgilityEvasion).defense;
        merc.passives_mut().defense_bonus = 3;
        assert_eq!(merc.get_battle_stats(&AgilityEvasion).defense, before + 3);
        assert_eq!(merc.get_battle_stats(&AgilityEvasion).evasion, 5);
    }

    #[test]
    fn oversized_bonuses_hit_the_clamps() {
        let mut merc = mercenary();
        let charm = Gear::builder("Charm", GearKind::Accessory)
            .hp(i32::MAX)
            .shared();
        merc.equip(charm).unwrap();
        assert_eq!(merc.hp().maximum(), StatBounds::HP.max as u32);

        merc.passives_mut().defense_bonus = i32::MAX;
        let battle = merc.get_battle_stats(&AgilityEvasion);
        assert_eq!(battle.defense, StatBounds::BATTLE.max);
    }

    #[test]
    fn regeneration_skips_the_fallen() {
        let mut merc = mercenary();
        merc.passives_mut().hp_regen = 5;
        merc.passives_mut().mp_regen = 2;
        merc.take_damage(10);
        merc.use_mp(1).unwrap();
        assert_eq!(merc.regenerate(), (5, 1));

        merc.take_damage(1_000);
        assert_eq!(merc.regenerate(), (0, 0));
        assert!(!merc.is_alive());
    }

    #[test]
    fn revive_restores_at_least_one_hp() {
        let mut merc = mercenary();
        assert_eq!(merc.revive(10), 0);
        merc.take_damage(1_000);
        assert_eq!(merc.revive(0), 1);
        assert!(merc.is_alive());
    }
}
