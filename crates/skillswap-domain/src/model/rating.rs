//! Ratings - bounded 1–5 scores and user-to-user ratings

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::{RatingId, SkillId, UserId};
use crate::error::{DomainError, DomainResult};

/// A score on the 1–5 scale
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Score(u8);

impl Score {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    /// Validate a raw value, reporting failures against `field`
    pub fn parse(field: &'static str, value: u8) -> DomainResult<Self> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(DomainError::validation(
                field,
                format!("Ensure this value is between {} and {}.", Self::MIN, Self::MAX),
            ))
        }
    }

    pub fn value(&self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for Score {
    type Error = DomainError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Score::parse("rating", value)
    }
}

impl From<Score> for u8 {
    fn from(score: Score) -> Self {
        score.0
    }
}

impl core::fmt::Display for Score {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One user's rating of another. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRating {
    id: RatingId,
    rated_user: UserId,
    rated_by: UserId,
    score: Score,
    review: String,
    skill: Option<SkillId>,
    created_at: DateTime<Utc>,
}

impl UserRating {
    pub fn new(
        rated_user: UserId,
        rated_by: UserId,
        score: Score,
        review: impl Into<String>,
        skill: Option<SkillId>,
        now: DateTime<Utc>,
    ) -> DomainResult<Self> {
        if rated_user == rated_by {
            return Err(DomainError::validation("rated_user", "You cannot rate yourself."));
        }
        Ok(Self {
            id: RatingId::generate(),
            rated_user,
            rated_by,
            score,
            review: review.into(),
            skill,
            created_at: now,
        })
    }

    pub fn id(&self) -> RatingId {
        self.id
    }

    pub fn rated_user(&self) -> UserId {
        self.rated_user
    }

    pub fn rated_by(&self) -> UserId {
        self.rated_by
    }

    pub fn score(&self) -> Score {
        self.score
    }

    pub fn review(&self) -> &str {
        &self.review
    }

    pub fn skill(&self) -> Option<SkillId> {
        self.skill
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// Mean score rounded to two decimals, `None` when there are no ratings
pub fn average_rating(ratings: &[UserRating]) -> Option<f64> {
    if ratings.is_empty() {
        return None;
    }
    let total: u32 = ratings.iter().map(|r| u32::from(r.score.value())).sum();
    let mean = f64::from(total) / ratings.len() as f64;
    Some((mean * 100.0).round() / 100.0)
}
