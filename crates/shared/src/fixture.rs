//! Seed fixture format
//!
//! A fixture describes a small marketplace: the skill catalog, users with
//! the skills they teach and want, and optionally ratings between them.
//! Skills are referenced by name. Proficiency and priority stay strings
//! here; the application layer parses them.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

use crate::error::{Result, SkillswapError};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SeedFixture {
    #[serde(default)]
    pub categories: Vec<CategoryFixture>,

    #[serde(default)]
    pub users: Vec<UserFixture>,

    #[serde(default)]
    pub ratings: Vec<RatingFixture>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryFixture {
    pub name: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub icon: String,

    #[serde(default)]
    pub skills: Vec<SkillFixture>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillFixture {
    pub name: String,

    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserFixture {
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,

    #[serde(default)]
    pub bio: String,

    #[serde(default)]
    pub location: String,

    #[serde(default)]
    pub teaches: Vec<TeachFixture>,

    #[serde(default)]
    pub wants: Vec<WantFixture>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeachFixture {
    pub skill: String,

    /// Disambiguates skills with the same name in different categories
    #[serde(default)]
    pub category: Option<String>,

    #[serde(default = "default_proficiency")]
    pub proficiency: String,

    #[serde(default)]
    pub years: u8,

    #[serde(default = "default_true")]
    pub can_teach: bool,

    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WantFixture {
    pub skill: String,

    #[serde(default)]
    pub category: Option<String>,

    #[serde(default = "default_priority")]
    pub priority: String,

    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatingFixture {
    /// Username of the rated user
    pub rated_user: String,

    /// Username of the author
    pub rated_by: String,

    pub score: u8,

    #[serde(default)]
    pub review: String,
}

fn default_proficiency() -> String {
    "intermediate".to_string()
}

fn default_priority() -> String {
    "medium".to_string()
}

fn default_true() -> bool {
    true
}

impl SeedFixture {
    /// Load a fixture from a YAML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let fixture: Self = serde_yaml::from_str(yaml)?;
        fixture.validate()?;
        Ok(fixture)
    }

    /// Structural checks: usernames are unique and ratings name known users
    pub fn validate(&self) -> Result<()> {
        let mut usernames = HashSet::new();
        for user in &self.users {
            if !usernames.insert(user.username.as_str()) {
                return Err(SkillswapError::Fixture(format!(
                    "duplicate username: {}",
                    user.username
                )));
            }
        }

        for rating in &self.ratings {
            for username in [&rating.rated_user, &rating.rated_by] {
                if !usernames.contains(username.as_str()) {
                    return Err(SkillswapError::Fixture(format!(
                        "rating references unknown user: {username}"
                    )));
                }
            }
        }
        Ok(())
    }

    pub fn user(&self, username: &str) -> Option<&UserFixture> {
        self.users.iter().find(|u| u.username == username)
    }
}
