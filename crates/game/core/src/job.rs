//! Jobs: level-dependent stat growth plus a skill list.
//!
//! A job contributes `base_bonus + growth × (level - 1)` to its holder's stats.
//! Jobs are immutable after construction and shared between mercenaries through
//! `Arc`.

use std::fmt;
use std::sync::Arc;

use arrayvec::ArrayVec;

use crate::config::RulesConfig;
use crate::error::{ErrorSeverity, GameError};
use crate::stats::StatBlock;

/// Opaque capability attached to a job.
///
/// The rules hold and expose skills but never look inside them.
pub trait Skill: fmt::Debug + Send + Sync {
    fn name(&self) -> &str;
}

/// Job tier.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display, strum::EnumString,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum JobTier {
    #[default]
    Primary,
    Advanced,
}

/// Errors raised while assembling a job.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum JobError {
    #[error("job {job} cannot hold more than {max} skills")]
    TooManySkills { job: String, max: usize },
}

impl GameError for JobError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::TooManySkills { .. } => "JOB_TOO_MANY_SKILLS",
        }
    }
}

/// Character class with a linear growth curve.
///
/// # Example
/// ```
/// # use rpg_core::{Job, JobTier, StatBlock};
/// let knight = Job::new(
///     "Knight",
///     JobTier::Primary,
///     StatBlock::new(8.0, 5.0, 9.0, 3.0),
///     StatBlock::new(0.5, 0.25, 1.0, 0.0),
/// );
/// assert_eq!(knight.contribution_at_level(1), StatBlock::new(8.0, 5.0, 9.0, 3.0));
/// assert_eq!(knight.contribution_at_level(3), StatBlock::new(9.0, 5.5, 11.0, 3.0));
/// ```
#[derive(Clone, Debug)]
pub struct Job {
    name: String,
    tier: JobTier,
    base_bonus: StatBlock,
    growth: StatBlock,
    skills: ArrayVec<Arc<dyn Skill>, { RulesConfig::MAX_SKILLS }>,
}

impl Job {
    pub fn new(
        name: impl Into<String>,
        tier: JobTier,
        base_bonus: StatBlock,
        growth: StatBlock,
    ) -> Self {
        Self {
            name: name.into(),
            tier,
            base_bonus,
            growth,
            skills: ArrayVec::new(),
        }
    }

    /// Appends skills in order, failing once the skill list is full.
    pub fn with_skills(
        mut self,
        skills: impl IntoIterator<Item = Arc<dyn Skill>>,
    ) -> Result<Self, JobError> {
        for skill in skills {
            self.skills
                .try_push(skill)
                .map_err(|_| JobError::TooManySkills {
                    job: self.name.clone(),
                    max: RulesConfig::MAX_SKILLS,
                })?;
        }
        Ok(self)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn tier(&self) -> JobTier {
        self.tier
    }

    /// Stat bonus at level 1.
    pub fn base_bonus(&self) -> StatBlock {
        self.base_bonus
    }

    /// Stat bonus gained per level after the first.
    pub fn growth(&self) -> StatBlock {
        self.growth
    }

    pub fn skills(&self) -> &[Arc<dyn Skill>] {
        &self.skills
    }

    /// `base_bonus + growth × (level - 1)`, with `level` floored to 1.
    ///
    /// No rounding happens here; fractional growth is carried through.
    pub fn contribution_at_level(&self, level: u32) -> StatBlock {
        let steps = level.max(RulesConfig::MIN_LEVEL) - RulesConfig::MIN_LEVEL;
        self.base_bonus + self.growth * steps as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Named(&'static str);

    impl Skill for Named {
        fn name(&self) -> &str {
            self.0
        }
    }

    fn knight() -> Job {
        Job::new(
            "Knight",
            JobTier::Primary,
            StatBlock::new(8.0, 5.0, 9.0, 3.0),
            StatBlock::new(0.612, 0.35, 0.7, 0.2),
        )
    }

    #[test]
    fn contribution_is_linear_in_level() {
        let job = knight();
        for level in 1..=50u32 {
            let expected = job.base_bonus() + job.growth() * (level - 1) as f32;
            assert_eq!(job.contribution_at_level(level), expected);
        }
    }

    #[test]
    fn level_zero_is_treated_as_one() {
        let job = knight();
        assert_eq!(job.contribution_at_level(0), job.base_bonus());
        assert_eq!(job.contribution_at_level(1), job.base_bonus());
    }

    #[test]
    fn growth_stays_fractional() {
        let job = knight();
        let at_two = job.contribution_at_level(2);
        assert!((at_two.strength - 8.612).abs() < 1e-5);
    }

    #[test]
    fn skills_keep_their_order() {
        let job = knight()
            .with_skills([
                Arc::new(Named("Guard")) as Arc<dyn Skill>,
                Arc::new(Named("Cover")) as Arc<dyn Skill>,
            ])
            .unwrap();
        let names: Vec<&str> = job.skills().iter().map(|s| s.name()).collect();
        assert_eq!(names, ["Guard", "Cover"]);
    }

    #[test]
    fn skill_list_is_bounded() {
        let skills = (0..=RulesConfig::MAX_SKILLS).map(|_| Arc::new(Named("Dup")) as Arc<dyn Skill>);
        let err = knight().with_skills(skills).unwrap_err();
        assert_eq!(
            err,
            JobError::TooManySkills {
                job: "Knight".into(),
                max: RulesConfig::MAX_SKILLS,
            }
        );
    }
}
