//! Matcher - Who can teach what I want to learn
//!
//! Matching is a flat set intersection:
//! 1. Collect the skill ids the learner wants
//! 2. Keep candidate rows for those skills that are marked `can_teach`
//! 3. Drop the learner's own rows
//!
//! There is no ranking, weighting or scoring. A row either matches or it
//! doesn't. This is pure domain logic - no I/O.

use std::collections::HashSet;

use crate::model::ids::{SkillId, UserId};
use crate::model::skill::{SkillWanted, UserSkill};

/// Matching engine
///
/// Stateless; candidates come from the repository, the rules live here.
#[derive(Debug, Clone, Copy, Default)]
pub struct Matcher;

impl Matcher {
    pub fn new() -> Self {
        Self
    }

    /// The distinct skill ids `learner` wants
    pub fn wanted_skill_ids(&self, learner: UserId, wants: &[SkillWanted]) -> Vec<SkillId> {
        let mut seen = HashSet::new();
        wants
            .iter()
            .filter(|w| w.user() == learner)
            .map(|w| w.skill())
            .filter(|skill| seen.insert(*skill))
            .collect()
    }

    /// Teachable rows, not owned by `learner`, whose skill `learner` wants
    pub fn find_matches(
        &self,
        learner: UserId,
        wants: &[SkillWanted],
        candidates: &[UserSkill],
    ) -> Vec<UserSkill> {
        let wanted: HashSet<SkillId> = self.wanted_skill_ids(learner, wants).into_iter().collect();

        candidates
            .iter()
            .filter(|c| c.can_teach() && c.user() != learner && wanted.contains(&c.skill()))
            .cloned()
            .collect()
    }

    /// Teachable rows for one skill
    pub fn teachers_of(&self, skill: SkillId, candidates: &[UserSkill]) -> Vec<UserSkill> {
        candidates
            .iter()
            .filter(|c| c.can_teach() && c.skill() == skill)
            .cloned()
            .collect()
    }
}
