//! Skill taxonomy and the user × skill join rows
//!
//! `UserSkill` records what a user can teach, `SkillWanted` what they want
//! to learn. Both are unique per (user, skill); the repository enforces
//! that, the entities only guard their own fields.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::{CategoryId, SkillId, SkillWantedId, UserId, UserSkillId};
use crate::error::{DomainError, DomainResult};

pub const MAX_YEARS_OF_EXPERIENCE: u8 = 50;

/// Grouping for skills (Programming, Design, Languages, ...)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillCategory {
    pub id: CategoryId,
    pub name: String,
    pub description: String,
    pub icon: String,
}

impl SkillCategory {
    pub fn new(name: impl Into<String>) -> DomainResult<Self> {
        let name = name.into().trim().to_string();
        if name.is_empty() {
            return Err(DomainError::validation("name", "This field is required."));
        }
        Ok(Self {
            id: CategoryId::generate(),
            name,
            description: String::new(),
            icon: String::new(),
        })
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = icon.into();
        self
    }
}

/// An individual skill that users can offer or want to learn
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Skill {
    pub id: SkillId,
    pub name: String,
    pub category: CategoryId,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

impl Skill {
    pub fn new(name: impl Into<String>, category: CategoryId, now: DateTime<Utc>) -> DomainResult<Self> {
        let name = name.into().trim().to_string();
        if name.is_empty() {
            return Err(DomainError::validation("name", "This field is required."));
        }
        Ok(Self {
            id: SkillId::generate(),
            name,
            category,
            description: String::new(),
            created_at: now,
        })
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

/// How well a user knows a skill
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProficiencyLevel {
    Beginner,
    Intermediate,
    Advanced,
    Expert,
}

impl ProficiencyLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProficiencyLevel::Beginner => "beginner",
            ProficiencyLevel::Intermediate => "intermediate",
            ProficiencyLevel::Advanced => "advanced",
            ProficiencyLevel::Expert => "expert",
        }
    }
}

impl core::fmt::Display for ProficiencyLevel {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl core::str::FromStr for ProficiencyLevel {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "beginner" => Ok(ProficiencyLevel::Beginner),
            "intermediate" => Ok(ProficiencyLevel::Intermediate),
            "advanced" => Ok(ProficiencyLevel::Advanced),
            "expert" => Ok(ProficiencyLevel::Expert),
            other => Err(DomainError::validation(
                "proficiency_level",
                format!("\"{}\" is not a valid choice.", other),
            )),
        }
    }
}

/// How eager a user is to learn a skill
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }
}

impl core::fmt::Display for Priority {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl core::str::FromStr for Priority {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(Priority::Low),
            "medium" => Ok(Priority::Medium),
            "high" => Ok(Priority::High),
            other => Err(DomainError::validation(
                "priority",
                format!("\"{}\" is not a valid choice.", other),
            )),
        }
    }
}

/// A skill a user possesses (and usually can teach)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSkill {
    id: UserSkillId,
    user: UserId,
    skill: SkillId,
    proficiency: ProficiencyLevel,
    years_of_experience: u8,
    can_teach: bool,
    description: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl UserSkill {
    pub fn new(
        user: UserId,
        skill: SkillId,
        proficiency: ProficiencyLevel,
        years_of_experience: u8,
        now: DateTime<Utc>,
    ) -> DomainResult<Self> {
        validate_years(years_of_experience)?;
        Ok(Self {
            id: UserSkillId::generate(),
            user,
            skill,
            proficiency,
            years_of_experience,
            can_teach: true,
            description: String::new(),
            created_at: now,
            updated_at: now,
        })
    }

    /// Builder: mark as not teachable
    pub fn learning_only(mut self) -> Self {
        self.can_teach = false;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    // ========== Getters ==========

    pub fn id(&self) -> UserSkillId {
        self.id
    }

    pub fn user(&self) -> UserId {
        self.user
    }

    pub fn skill(&self) -> SkillId {
        self.skill
    }

    pub fn proficiency(&self) -> ProficiencyLevel {
        self.proficiency
    }

    pub fn years_of_experience(&self) -> u8 {
        self.years_of_experience
    }

    pub fn can_teach(&self) -> bool {
        self.can_teach
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    // ========== Mutations ==========

    pub fn update(
        &mut self,
        proficiency: ProficiencyLevel,
        years_of_experience: u8,
        can_teach: bool,
        now: DateTime<Utc>,
    ) -> DomainResult<()> {
        validate_years(years_of_experience)?;
        self.proficiency = proficiency;
        self.years_of_experience = years_of_experience;
        self.can_teach = can_teach;
        self.updated_at = now;
        Ok(())
    }
}

/// A skill a user wants to learn
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillWanted {
    id: SkillWantedId,
    user: UserId,
    skill: SkillId,
    priority: Priority,
    description: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl SkillWanted {
    pub fn new(user: UserId, skill: SkillId, priority: Priority, now: DateTime<Utc>) -> Self {
        Self {
            id: SkillWantedId::generate(),
            user,
            skill,
            priority,
            description: String::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn id(&self) -> SkillWantedId {
        self.id
    }

    pub fn user(&self) -> UserId {
        self.user
    }

    pub fn skill(&self) -> SkillId {
        self.skill
    }

    pub fn priority(&self) -> Priority {
        self.priority
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn set_priority(&mut self, priority: Priority, now: DateTime<Utc>) {
        self.priority = priority;
        self.updated_at = now;
    }
}

fn validate_years(years: u8) -> DomainResult<()> {
    if years > MAX_YEARS_OF_EXPERIENCE {
        return Err(DomainError::validation(
            "years_of_experience",
            format!(
                "Ensure this value is less than or equal to {}.",
                MAX_YEARS_OF_EXPERIENCE
            ),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_skill_defaults_to_teachable() {
        let skill = UserSkill::new(
            UserId::generate(),
            SkillId::generate(),
            ProficiencyLevel::Advanced,
            4,
            Utc::now(),
        )
        .unwrap();
        assert!(skill.can_teach());
        assert!(!skill.learning_only().can_teach());
    }

    #[test]
    fn test_years_of_experience_bounded() {
        let result = UserSkill::new(
            UserId::generate(),
            SkillId::generate(),
            ProficiencyLevel::Expert,
            MAX_YEARS_OF_EXPERIENCE + 1,
            Utc::now(),
        );
        assert_eq!(result.unwrap_err().field(), Some("years_of_experience"));
    }

    #[test]
    fn test_parse_proficiency_and_priority() {
        assert_eq!("Expert".parse::<ProficiencyLevel>().unwrap(), ProficiencyLevel::Expert);
        assert!("guru".parse::<ProficiencyLevel>().is_err());
        assert_eq!("high".parse::<Priority>().unwrap(), Priority::High);
        assert_eq!(Priority::default(), Priority::Medium);
        assert!(Priority::High > Priority::Low);
    }

    #[test]
    fn test_blank_names_rejected() {
        assert!(SkillCategory::new("  ").is_err());
        let category = SkillCategory::new("Programming").unwrap();
        assert!(Skill::new("", category.id, Utc::now()).is_err());
    }
}
