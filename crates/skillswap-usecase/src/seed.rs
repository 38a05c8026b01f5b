//! Loading a seed fixture into the marketplace

use std::collections::{BTreeMap, HashMap};

use serde::Serialize;
use shared::SeedFixture;
use skillswap_domain::{
    DomainError, DomainResult, Priority, ProficiencyLevel, Registration, SkillCategory, SkillId,
    UserId,
};
use tracing::info;

use crate::accounts::{NewUserSkill, NewWantedSkill, RatingInput};
use crate::marketplace::Marketplace;

/// What a fixture created
#[derive(Debug, Clone, Default, Serialize)]
pub struct SeedReport {
    pub users: BTreeMap<String, UserId>,
    pub categories: usize,
    pub skills: usize,
    pub user_skills: usize,
    pub skills_wanted: usize,
    pub ratings: usize,
}

impl SeedReport {
    pub fn user(&self, username: &str) -> DomainResult<UserId> {
        self.users
            .get(username)
            .copied()
            .ok_or_else(|| DomainError::not_found("User", username))
    }
}

/// Skill names resolve within a category, or globally when unambiguous
#[derive(Default)]
struct SkillIndex {
    qualified: HashMap<(String, String), SkillId>,
    by_name: HashMap<String, Vec<SkillId>>,
}

impl SkillIndex {
    fn add(&mut self, category: &str, name: &str, id: SkillId) {
        self.qualified
            .insert((category.to_string(), name.to_string()), id);
        self.by_name.entry(name.to_string()).or_default().push(id);
    }

    fn resolve(&self, name: &str, category: Option<&str>) -> DomainResult<SkillId> {
        if let Some(category) = category {
            return self
                .qualified
                .get(&(category.to_string(), name.to_string()))
                .copied()
                .ok_or_else(|| DomainError::not_found("Skill", format!("{category}/{name}")));
        }
        match self.by_name.get(name).map(Vec::as_slice) {
            Some([id]) => Ok(*id),
            Some([_, _, ..]) => Err(DomainError::validation(
                "skill",
                format!("Skill name \"{name}\" exists in several categories; name the category."),
            )),
            _ => Err(DomainError::not_found("Skill", name)),
        }
    }
}

impl Marketplace {
    /// Create everything a fixture describes, through the normal operations
    ///
    /// Validation applies as for any other caller, so a bad fixture stops
    /// at the first invalid row.
    pub fn apply_fixture(&mut self, fixture: &SeedFixture) -> DomainResult<SeedReport> {
        let mut report = SeedReport::default();
        let mut index = SkillIndex::default();

        for category in &fixture.categories {
            let created = self.add_category(
                SkillCategory::new(category.name.as_str())?
                    .with_description(category.description.as_str())
                    .with_icon(category.icon.as_str()),
            )?;
            report.categories += 1;

            for skill in &category.skills {
                let created_skill = self.add_skill(&skill.name, created.id, &skill.description)?;
                index.add(&category.name, &skill.name, created_skill.id);
                report.skills += 1;
            }
        }

        // Fixtures carry no credentials and passwords are never stored
        let placeholder = "*".repeat(self.config.min_password_length);
        for user in &fixture.users {
            let created = self.register_user(Registration {
                username: user.username.clone(),
                email: user.email.clone(),
                password: placeholder.clone(),
                password_confirmation: placeholder.clone(),
                first_name: user.first_name.clone(),
                last_name: user.last_name.clone(),
                bio: user.bio.clone(),
                location: user.location.clone(),
                ..Default::default()
            })?;
            let id = created.id();
            report.users.insert(user.username.clone(), id);

            for teach in &user.teaches {
                self.add_user_skill(
                    id,
                    NewUserSkill {
                        skill: index.resolve(&teach.skill, teach.category.as_deref())?,
                        proficiency: teach.proficiency.parse::<ProficiencyLevel>()?,
                        years_of_experience: teach.years,
                        can_teach: teach.can_teach,
                        description: teach.description.clone(),
                    },
                )?;
                report.user_skills += 1;
            }

            for want in &user.wants {
                self.add_skill_wanted(
                    id,
                    NewWantedSkill {
                        skill: index.resolve(&want.skill, want.category.as_deref())?,
                        priority: want.priority.parse::<Priority>()?,
                        description: want.description.clone(),
                    },
                )?;
                report.skills_wanted += 1;
            }
        }

        for rating in &fixture.ratings {
            self.rate_user(
                report.user(&rating.rated_by)?,
                RatingInput {
                    rated_user: report.user(&rating.rated_user)?,
                    score: rating.score,
                    review: rating.review.clone(),
                    skill: None,
                },
            )?;
            report.ratings += 1;
        }

        info!(
            users = report.users.len(),
            skills = report.skills,
            user_skills = report.user_skills,
            skills_wanted = report.skills_wanted,
            "fixture applied"
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::marketplace;

    const FIXTURE: &str = r#"
categories:
  - name: Music
    skills:
      - name: Guitar
      - name: Theory
  - name: Mathematics
    skills:
      - name: Theory
      - name: Statistics
users:
  - username: alice
    email: alice@example.com
    first_name: Alice
    last_name: Moreau
    teaches:
      - { skill: Guitar, proficiency: expert, years: 12 }
    wants:
      - { skill: Statistics, priority: high }
  - username: bob
    email: bob@example.com
    first_name: Bob
    last_name: Tanaka
    teaches:
      - { skill: Statistics, proficiency: advanced, years: 4 }
      - { skill: Theory, category: Music }
    wants:
      - { skill: Guitar }
ratings:
  - { rated_user: alice, rated_by: bob, score: 5, review: "Patient" }
"#;

    #[test]
    fn test_apply_fixture() {
        let mut market = marketplace();
        let fixture = SeedFixture::from_yaml_str(FIXTURE).unwrap();
        let report = market.apply_fixture(&fixture).unwrap();

        assert_eq!(report.categories, 2);
        assert_eq!(report.skills, 4);
        assert_eq!(report.user_skills, 3);
        assert_eq!(report.ratings, 1);

        let alice = report.user("alice").unwrap();
        let bob = report.user("bob").unwrap();
        let matches = market.find_matches(alice).unwrap();
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].user(), bob);
        assert_eq!(market.find_matches(bob).unwrap()[0].user(), alice);
        assert_eq!(market.average_rating(alice).unwrap(), Some(5.0));
    }

    #[test]
    fn test_ambiguous_skill_name_rejected() {
        let yaml = r#"
categories:
  - { name: Music, skills: [ { name: Theory } ] }
  - { name: Mathematics, skills: [ { name: Theory } ] }
users:
  - username: sam
    email: sam@example.com
    first_name: Sam
    last_name: Reed
    wants:
      - { skill: Theory }
"#;
        let mut market = marketplace();
        let fixture = SeedFixture::from_yaml_str(yaml).unwrap();
        let err = market.apply_fixture(&fixture).unwrap_err();
        assert_eq!(err.field(), Some("skill"));
    }

    #[test]
    fn test_bad_proficiency_rejected() {
        let yaml = r#"
categories:
  - { name: Music, skills: [ { name: Guitar } ] }
users:
  - username: sam
    email: sam@example.com
    first_name: Sam
    last_name: Reed
    teaches:
      - { skill: Guitar, proficiency: wizard }
"#;
        let mut market = marketplace();
        let fixture = SeedFixture::from_yaml_str(yaml).unwrap();
        assert_eq!(market.apply_fixture(&fixture).unwrap_err().status_code(), 400);
    }
}
