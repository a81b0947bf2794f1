//! Character sheet views of a party.
//!
//! A [`PartySheet`] is a plain snapshot: it owns its strings and numbers, so it
//! can be rendered as text or serialized to JSON after the party is gone.

use std::fmt::{self, Write as _};

use rpg_core::{BalanceOracle, BattleStats, Mercenary, Party, StatBlock};
use serde::Serialize;

#[derive(Clone, Debug, Serialize)]
pub struct PartySheet {
    pub members: Vec<MemberSheet>,
    pub bag: BagSheet,
}

#[derive(Clone, Debug, Serialize)]
pub struct MemberSheet {
    pub name: String,
    pub job: String,
    pub level: u32,
    pub hp: Gauge,
    pub mp: Gauge,
    pub stats: StatBlock,
    pub battle: BattleStats,
    pub ability_points: i32,
    pub equipment: Vec<EquippedLine>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Gauge {
    pub current: u32,
    pub maximum: u32,
}

#[derive(Clone, Debug, Serialize)]
pub struct EquippedLine {
    pub slot: String,
    pub gear: String,
}

#[derive(Clone, Debug, Serialize)]
pub struct BagSheet {
    pub capacity: usize,
    pub limit: usize,
    pub items: Vec<BagLine>,
}

#[derive(Clone, Debug, Serialize)]
pub struct BagLine {
    pub slot: usize,
    pub name: String,
    pub quantity: u16,
}

impl PartySheet {
    pub fn capture(party: &Party, balance: &dyn BalanceOracle) -> Self {
        let members = party
            .members
            .iter()
            .map(|member| MemberSheet::capture(member, balance))
            .collect();

        let bag = BagSheet {
            capacity: party.bag.capacity(),
            limit: party.bag.limit(),
            items: party
                .bag
                .compact_slots()
                .iter()
                .filter_map(|&slot| {
                    party.bag.slot(slot).map(|item| BagLine {
                        slot,
                        name: item.name().to_string(),
                        quantity: item.quantity(),
                    })
                })
                .collect(),
        };

        Self { members, bag }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn render_text(&self) -> String {
        self.to_string()
    }
}

impl MemberSheet {
    pub fn capture(member: &Mercenary, balance: &dyn BalanceOracle) -> Self {
        Self {
            name: member.name().to_string(),
            job: member.job().name().to_string(),
            level: member.level(),
            hp: Gauge {
                current: member.hp().current(),
                maximum: member.hp().maximum(),
            },
            mp: Gauge {
                current: member.mp().current(),
                maximum: member.mp().maximum(),
            },
            stats: member.effective_stats(),
            battle: member.get_battle_stats(balance),
            ability_points: member.ability_points(),
            equipment: member
                .equipment()
                .iter()
                .map(|(slot, gear)| EquippedLine {
                    slot: slot.to_string(),
                    gear: gear.name.clone(),
                })
                .collect(),
        }
    }
}

impl fmt::Display for Gauge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.current, self.maximum)
    }
}

impl fmt::Display for PartySheet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for member in &self.members {
            writeln!(f, "{}", member)?;
        }
        write!(f, "{}", self.bag)
    }
}

impl fmt::Display for MemberSheet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = &self.stats;
        writeln!(f, "{} - Lv {} {}", self.name, self.level, self.job)?;
        writeln!(f, "  HP {}  MP {}  AP {}", self.hp, self.mp, self.ability_points)?;
        writeln!(
            f,
            "  STR {:.1}  AGI {:.1}  VIT {:.1}  MAG {:.1}",
            s.strength, s.agility, s.vitality, s.magic
        )?;
        writeln!(
            f,
            "  ATK {}  DEF {}  EVA {}",
            self.battle.attack, self.battle.defense, self.battle.evasion
        )?;
        for line in &self.equipment {
            writeln!(f, "  [{}] {}", line.slot, line.gear)?;
        }
        Ok(())
    }
}

impl fmt::Display for BagSheet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Bag {}/{} (limit {})",
            self.items.len(),
            self.capacity,
            self.limit
        )?;
        let mut line = String::new();
        for item in &self.items {
            line.clear();
            let _ = write!(line, "  {:>2}: {}", item.slot, item.name);
            if item.quantity > 1 {
                let _ = write!(line, " x{}", item.quantity);
            }
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use rpg_content::{ConsumableId, Content, JobId};

    use super::*;
    use crate::builder::{PartyBuilder, Recruit, default_roster};

    fn sample() -> (Content, Party) {
        let content = Content::builtin();
        let party = PartyBuilder::new(&content)
            .recruits(default_roster())
            .supply(ConsumableId::Potion, 12)
            .build()
            .unwrap();
        (content, party)
    }

    #[test]
    fn capture_lists_members_and_stacks() {
        let (content, party) = sample();
        let sheet = PartySheet::capture(&party, &content.balance);

        assert_eq!(sheet.members.len(), 3);
        assert_eq!(sheet.members[0].name, "Aldo");
        assert_eq!(sheet.members[0].job, "Knight");
        assert_eq!(sheet.members[0].equipment.len(), 5);
        assert_eq!(sheet.members[0].equipment[0].slot, "weapon_shield1");

        let quantities: Vec<u16> = sheet.bag.items.iter().map(|i| i.quantity).collect();
        assert_eq!(quantities, [9, 3]);
    }

    #[test]
    fn text_shows_gauges_and_bag() {
        let content = Content::builtin();
        let party = PartyBuilder::new(&content)
            .recruit(Recruit::new("Edda", JobId::Priest, StatBlock::ZERO))
            .supply(ConsumableId::Ether, 2)
            .build()
            .unwrap();
        let text = PartySheet::capture(&party, &content.balance).render_text();

        assert!(text.contains("Edda - Lv 1 Priest"));
        assert!(text.contains("Ether x2"));
        assert!(text.contains("Bag 1/"));
    }

    #[test]
    fn json_is_structured() {
        let (content, party) = sample();
        let json = PartySheet::capture(&party, &content.balance).to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["members"][1]["name"], "Brina");
        assert_eq!(value["bag"]["items"][0]["name"], "Potion");
        assert!(value["members"][0]["hp"]["maximum"].as_u64().unwrap() > 0);
    }
}
