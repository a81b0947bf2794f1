//! Built-in job table.
//!
//! Jobs hold opaque skills, so the table stores serializable [`JobSpec`]s and
//! builds the shared [`Job`] values once.

use std::collections::BTreeMap;
use std::sync::Arc;

use rpg_core::{Job, JobError, JobTier, Skill, StatBlock};

#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum JobId {
    // Primary
    Knight,
    Fighter,
    Thief,
    Priest,
    Mage,

    // Advanced
    Paladin,
    Sage,
}

/// Skill known only by name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SkillDescriptor {
    name: String,
}

impl SkillDescriptor {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Skill for SkillDescriptor {
    fn name(&self) -> &str {
        &self.name
    }
}

/// Data form of a job.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct JobSpec {
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub tier: JobTier,
    pub base_bonus: StatBlock,
    pub growth: StatBlock,
    #[cfg_attr(feature = "serde", serde(default))]
    pub skills: Vec<String>,
}

impl JobSpec {
    pub fn build(&self) -> Result<Job, JobError> {
        Job::new(self.name.clone(), self.tier, self.base_bonus, self.growth).with_skills(
            self.skills
                .iter()
                .map(|name| Arc::new(SkillDescriptor::new(name.clone())) as Arc<dyn Skill>),
        )
    }
}

impl JobId {
    pub fn spec(self) -> JobSpec {
        let stats = StatBlock::new;
        let (name, tier, base_bonus, growth, skills): (_, _, _, _, &[&str]) = match self {
            Self::Knight => (
                "Knight",
                JobTier::Primary,
                stats(8.0, 5.0, 9.0, 3.0),
                stats(0.612, 0.35, 0.7, 0.2),
                &["Guard", "Cover"],
            ),
            Self::Fighter => (
                "Fighter",
                JobTier::Primary,
                stats(10.0, 6.0, 7.0, 2.0),
                stats(0.75, 0.4, 0.5, 0.1),
                &["Power Strike"],
            ),
            Self::Thief => (
                "Thief",
                JobTier::Primary,
                stats(6.0, 10.0, 5.0, 3.0),
                stats(0.4, 0.8, 0.35, 0.15),
                &["Steal", "Flee"],
            ),
            Self::Priest => (
                "Priest",
                JobTier::Primary,
                stats(4.0, 5.0, 6.0, 8.0),
                stats(0.2, 0.3, 0.4, 0.6),
                &["Cure", "Protect"],
            ),
            Self::Mage => (
                "Mage",
                JobTier::Primary,
                stats(2.0, 5.0, 4.0, 11.0),
                stats(0.1, 0.3, 0.25, 0.85),
                &["Fire", "Blizzard", "Thunder"],
            ),
            Self::Paladin => (
                "Paladin",
                JobTier::Advanced,
                stats(12.0, 7.0, 13.0, 6.0),
                stats(0.7, 0.4, 0.8, 0.35),
                &["Guard", "Cover", "Holy Strike"],
            ),
            Self::Sage => (
                "Sage",
                JobTier::Advanced,
                stats(4.0, 7.0, 7.0, 14.0),
                stats(0.2, 0.4, 0.4, 0.9),
                &["Cure", "Fire", "Dispel"],
            ),
        };

        JobSpec {
            name: name.to_string(),
            tier,
            base_bonus,
            growth,
            skills: skills.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Shared jobs keyed by [`JobId`].
#[derive(Clone, Debug, Default)]
pub struct JobCatalog {
    entries: BTreeMap<JobId, Arc<Job>>,
}

impl JobCatalog {
    pub fn builtin() -> Self {
        use strum::IntoEnumIterator;

        let entries = JobId::iter()
            .filter_map(|id| match id.spec().build() {
                Ok(job) => Some((id, Arc::new(job))),
                Err(err) => {
                    tracing::error!("skipping built-in job {id}: {err}");
                    None
                }
            })
            .collect();
        Self { entries }
    }

    /// Builds a catalog from specs; fails on the first invalid job.
    pub fn from_specs(
        specs: impl IntoIterator<Item = (JobId, JobSpec)>,
    ) -> Result<Self, JobError> {
        Self::default().with_overrides(specs)
    }

    /// Replaces or adds the given jobs.
    pub fn with_overrides(
        mut self,
        specs: impl IntoIterator<Item = (JobId, JobSpec)>,
    ) -> Result<Self, JobError> {
        for (id, spec) in specs {
            self.entries.insert(id, Arc::new(spec.build()?));
        }
        Ok(self)
    }

    pub fn get(&self, id: JobId) -> Option<&Arc<Job>> {
        self.entries.get(&id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (JobId, &Arc<Job>)> + '_ {
        self.entries.iter().map(|(id, job)| (*id, job))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
