//! Party builder assembling recruits from catalog content.

use anyhow::{Context, Result};
use rpg_content::{ConsumableId, Content, GearId, JobId};
use rpg_core::{Mercenary, Party, StatBlock};

/// One mercenary to recruit: who, which job, and what to wear.
#[derive(Clone, Debug)]
pub struct Recruit {
    pub name: String,
    pub job: JobId,
    pub base_stats: StatBlock,
    pub gear: Vec<GearId>,
}

impl Recruit {
    pub fn new(name: impl Into<String>, job: JobId, base_stats: StatBlock) -> Self {
        Self {
            name: name.into(),
            job,
            base_stats,
            gear: Vec::new(),
        }
    }

    pub fn wearing(mut self, gear: impl IntoIterator<Item = GearId>) -> Self {
        self.gear.extend(gear);
        self
    }
}

/// The default company printed by the sheet.
pub fn default_roster() -> Vec<Recruit> {
    use GearId::*;

    vec![
        Recruit::new("Aldo", JobId::Knight, StatBlock::new(2.0, 1.0, 3.0, 0.0))
            .wearing([Broadsword, KiteShield, ChainMail, IronHelm, GuardAmulet]),
        Recruit::new("Brina", JobId::Thief, StatBlock::new(1.0, 3.0, 1.0, 1.0))
            .wearing([ShortSword, LeatherVest, FeltCap, PowerRing]),
        Recruit::new("Corvin", JobId::Mage, StatBlock::new(0.0, 1.0, 1.0, 4.0))
            .wearing([FlameRod, SilkRobe, MageHood]),
    ]
}

/// Builder for a stocked party.
///
/// # Design Principles
///
/// - **Required input**: content catalogs the recruits are looked up in
/// - **Fail-fast**: a recruit naming a job the catalog lacks fails `build()`
/// - **Tolerant gear**: gear that cannot be equipped is logged and stored in the bag
pub struct PartyBuilder<'c> {
    content: &'c Content,
    level: u32,
    recruits: Vec<Recruit>,
    supplies: Vec<(ConsumableId, u16)>,
}

impl<'c> PartyBuilder<'c> {
    pub fn new(content: &'c Content) -> Self {
        Self {
            content,
            level: 1,
            recruits: Vec::new(),
            supplies: Vec::new(),
        }
    }

    /// Level for every recruit.
    pub fn level(mut self, level: u32) -> Self {
        self.level = level;
        self
    }

    pub fn recruit(mut self, recruit: Recruit) -> Self {
        self.recruits.push(recruit);
        self
    }

    pub fn recruits(mut self, recruits: impl IntoIterator<Item = Recruit>) -> Self {
        self.recruits.extend(recruits);
        self
    }

    /// Adds `count` units of a consumable to the shared bag.
    pub fn supply(mut self, id: ConsumableId, count: u16) -> Self {
        self.supplies.push((id, count));
        self
    }

    pub fn build(self) -> Result<Party> {
        let mut party = Party::from_config(&self.content.rules);

        for recruit in self.recruits {
            let job = self
                .content
                .jobs
                .get(recruit.job)
                .with_context(|| format!("Job {} is not in the catalog", recruit.job))?
                .clone();
            let mut member = Mercenary::new(&recruit.name, job, self.level, recruit.base_stats);

            for id in recruit.gear {
                let gear = self
                    .content
                    .gear
                    .get(id)
                    .with_context(|| format!("Gear {} is not in the catalog", id))?
                    .clone();
                if let Err(err) = member.equip(gear.clone()) {
                    tracing::warn!("{} cannot wear {}: {}; storing it", recruit.name, id, err);
                    party
                        .bag
                        .try_add(gear)
                        .with_context(|| format!("No room in the bag for {}", id))?;
                }
            }
            party.add_member(member);
        }

        for (id, count) in self.supplies {
            let mut remaining = count;
            while remaining > 0 {
                let stack = self
                    .content
                    .consumables
                    .create(id, remaining)
                    .with_context(|| format!("Consumable {} is not in the catalog", id))?;
                remaining -= stack.count();
                party
                    .bag
                    .try_add(stack)
                    .with_context(|| format!("No room in the bag for {}", id))?;
            }
        }

        tracing::info!(
            "party ready: {} members, {}/{} bag slots used",
            party.members.len(),
            party.bag.len(),
            party.bag.capacity()
        );
        Ok(party)
    }
}
