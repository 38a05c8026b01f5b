//! Users, the skill catalog, user skills, wanted skills and ratings

use skillswap_domain::{
    CategoryId, RatingId, RatingRepository, RepositoryError, Skill, SkillCatalog, SkillCategory,
    SkillId, SkillWanted, SkillWantedId, SkillWantedRepository, User, UserId, UserRating,
    UserRepository, UserSkill, UserSkillId, UserSkillRepository,
};

use super::Table;

/// In-memory User Repository
///
/// Email is unique case-insensitively, username exactly.
#[derive(Debug, Clone, Default)]
pub struct InMemoryUserRepository {
    users: Table<UserId, User>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn check_user_unique<'a>(
    mut others: impl Iterator<Item = &'a User>,
    user: &User,
) -> Result<(), RepositoryError> {
    let email = user.email().to_lowercase();
    others.try_for_each(|other| {
        if other.id() == user.id() {
            return Ok(());
        }
        if other.email().to_lowercase() == email {
            return Err(RepositoryError::UniqueViolation {
                constraint: "users.email",
            });
        }
        if other.username() == user.username() {
            return Err(RepositoryError::UniqueViolation {
                constraint: "users.username",
            });
        }
        Ok(())
    })
}

impl UserRepository for InMemoryUserRepository {
    fn insert(&mut self, user: User) -> Result<(), RepositoryError> {
        let mut users = self.users.write()?;
        if users.contains_key(&user.id()) {
            return Err(RepositoryError::UniqueViolation { constraint: "users.id" });
        }
        check_user_unique(users.values(), &user)?;
        users.insert(user.id(), user);
        Ok(())
    }

    fn update(&mut self, user: &User) -> Result<(), RepositoryError> {
        let mut users = self.users.write()?;
        check_user_unique(users.values(), user)?;
        if !users.replace(&user.id(), user.clone()) {
            return Err(RepositoryError::not_found("User", user.id()));
        }
        Ok(())
    }

    fn find_by_id(&self, id: UserId) -> Result<Option<User>, RepositoryError> {
        Ok(self.users.read()?.get(&id).cloned())
    }

    fn find_by_email(&self, email: &str) -> Result<Option<User>, RepositoryError> {
        let email = email.to_lowercase();
        let users = self.users.read()?;
        let found = users.find(|u| u.email().to_lowercase() == email);
        Ok(found)
    }

    fn find_by_username(&self, username: &str) -> Result<Option<User>, RepositoryError> {
        let users = self.users.read()?;
        let found = users.find(|u| u.username() == username);
        Ok(found)
    }

    fn list_all(&self) -> Result<Vec<User>, RepositoryError> {
        Ok(self.users.read()?.select(|_| true))
    }
}

/// In-memory Skill Catalog (categories and skills)
#[derive(Debug, Clone, Default)]
pub struct InMemorySkillCatalog {
    categories: Table<CategoryId, SkillCategory>,
    skills: Table<SkillId, Skill>,
}

impl InMemorySkillCatalog {
    pub fn new() -> Self {
        Self::default()
    }
}

fn by_name<T>(mut rows: Vec<T>, name: impl Fn(&T) -> &str) -> Vec<T> {
    rows.sort_by(|a, b| name(a).cmp(name(b)));
    rows
}

impl SkillCatalog for InMemorySkillCatalog {
    fn insert_category(&mut self, category: SkillCategory) -> Result<(), RepositoryError> {
        let mut categories = self.categories.write()?;
        if categories.values().any(|c| c.name == category.name) {
            return Err(RepositoryError::UniqueViolation {
                constraint: "skill_categories.name",
            });
        }
        categories.insert(category.id, category);
        Ok(())
    }

    fn find_category(&self, id: CategoryId) -> Result<Option<SkillCategory>, RepositoryError> {
        Ok(self.categories.read()?.get(&id).cloned())
    }

    fn list_categories(&self) -> Result<Vec<SkillCategory>, RepositoryError> {
        let categories = self.categories.read()?.select(|_| true);
        Ok(by_name(categories, |c| c.name.as_str()))
    }

    fn insert_skill(&mut self, skill: Skill) -> Result<(), RepositoryError> {
        if !self.categories.read()?.contains_key(&skill.category) {
            return Err(RepositoryError::not_found("SkillCategory", skill.category));
        }
        let mut skills = self.skills.write()?;
        if skills
            .values()
            .any(|s| s.category == skill.category && s.name == skill.name)
        {
            return Err(RepositoryError::UniqueViolation {
                constraint: "skills.name_category",
            });
        }
        skills.insert(skill.id, skill);
        Ok(())
    }

    fn find_skill(&self, id: SkillId) -> Result<Option<Skill>, RepositoryError> {
        Ok(self.skills.read()?.get(&id).cloned())
    }

    fn skills_in_category(&self, category: CategoryId) -> Result<Vec<Skill>, RepositoryError> {
        let skills = self.skills.read()?.select(|s| s.category == category);
        Ok(by_name(skills, |s| s.name.as_str()))
    }

    fn list_skills(&self) -> Result<Vec<Skill>, RepositoryError> {
        let skills = self.skills.read()?.select(|_| true);
        Ok(by_name(skills, |s| s.name.as_str()))
    }
}

/// In-memory UserSkill Repository, unique per (user, skill)
#[derive(Debug, Clone, Default)]
pub struct InMemoryUserSkillRepository {
    rows: Table<UserSkillId, UserSkill>,
}

impl InMemoryUserSkillRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl UserSkillRepository for InMemoryUserSkillRepository {
    fn insert(&mut self, user_skill: UserSkill) -> Result<(), RepositoryError> {
        let mut rows = self.rows.write()?;
        if rows
            .values()
            .any(|r| r.user() == user_skill.user() && r.skill() == user_skill.skill())
        {
            return Err(RepositoryError::UniqueViolation {
                constraint: "user_skills.user_skill",
            });
        }
        rows.insert(user_skill.id(), user_skill);
        Ok(())
    }

    fn update(&mut self, user_skill: &UserSkill) -> Result<(), RepositoryError> {
        let mut rows = self.rows.write()?;
        if !rows.replace(&user_skill.id(), user_skill.clone()) {
            return Err(RepositoryError::not_found("UserSkill", user_skill.id()));
        }
        Ok(())
    }

    fn delete(&mut self, id: UserSkillId) -> Result<(), RepositoryError> {
        self.rows
            .write()?
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| RepositoryError::not_found("UserSkill", id))
    }

    fn find_by_id(&self, id: UserSkillId) -> Result<Option<UserSkill>, RepositoryError> {
        Ok(self.rows.read()?.get(&id).cloned())
    }

    fn find_by_user(&self, user: UserId) -> Result<Vec<UserSkill>, RepositoryError> {
        Ok(self.rows.read()?.select(|r| r.user() == user))
    }

    fn find_by_user_and_skill(
        &self,
        user: UserId,
        skill: SkillId,
    ) -> Result<Option<UserSkill>, RepositoryError> {
        let rows = self.rows.read()?;
        let found = rows.find(|r| r.user() == user && r.skill() == skill);
        Ok(found)
    }

    fn find_by_skills(&self, skills: &[SkillId]) -> Result<Vec<UserSkill>, RepositoryError> {
        Ok(self.rows.read()?.select(|r| skills.contains(&r.skill())))
    }
}

/// In-memory SkillWanted Repository, unique per (user, skill)
#[derive(Debug, Clone, Default)]
pub struct InMemorySkillWantedRepository {
    rows: Table<SkillWantedId, SkillWanted>,
}

impl InMemorySkillWantedRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SkillWantedRepository for InMemorySkillWantedRepository {
    fn insert(&mut self, wanted: SkillWanted) -> Result<(), RepositoryError> {
        let mut rows = self.rows.write()?;
        if rows
            .values()
            .any(|r| r.user() == wanted.user() && r.skill() == wanted.skill())
        {
            return Err(RepositoryError::UniqueViolation {
                constraint: "skills_wanted.user_skill",
            });
        }
        rows.insert(wanted.id(), wanted);
        Ok(())
    }

    fn update(&mut self, wanted: &SkillWanted) -> Result<(), RepositoryError> {
        let mut rows = self.rows.write()?;
        if !rows.replace(&wanted.id(), wanted.clone()) {
            return Err(RepositoryError::not_found("SkillWanted", wanted.id()));
        }
        Ok(())
    }

    fn delete(&mut self, id: SkillWantedId) -> Result<(), RepositoryError> {
        self.rows
            .write()?
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| RepositoryError::not_found("SkillWanted", id))
    }

    fn find_by_id(&self, id: SkillWantedId) -> Result<Option<SkillWanted>, RepositoryError> {
        Ok(self.rows.read()?.get(&id).cloned())
    }

    fn find_by_user(&self, user: UserId) -> Result<Vec<SkillWanted>, RepositoryError> {
        Ok(self.rows.read()?.select(|r| r.user() == user))
    }

    fn find_by_user_and_skill(
        &self,
        user: UserId,
        skill: SkillId,
    ) -> Result<Option<SkillWanted>, RepositoryError> {
        let rows = self.rows.read()?;
        let found = rows.find(|r| r.user() == user && r.skill() == skill);
        Ok(found)
    }
}

/// In-memory Rating Repository
#[derive(Debug, Clone, Default)]
pub struct InMemoryRatingRepository {
    ratings: Table<RatingId, UserRating>,
}

impl InMemoryRatingRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn newest_first(mut ratings: Vec<UserRating>) -> Vec<UserRating> {
    // select() is insertion-ordered; reverse first so ties stay newest first
    ratings.reverse();
    ratings.sort_by(|a, b| b.created_at().cmp(&a.created_at()));
    ratings
}

impl RatingRepository for InMemoryRatingRepository {
    fn insert(&mut self, rating: UserRating) -> Result<(), RepositoryError> {
        self.ratings.write()?.insert(rating.id(), rating);
        Ok(())
    }

    fn find_by_id(&self, id: RatingId) -> Result<Option<UserRating>, RepositoryError> {
        Ok(self.ratings.read()?.get(&id).cloned())
    }

    fn received_by(&self, user: UserId) -> Result<Vec<UserRating>, RepositoryError> {
        Ok(newest_first(
            self.ratings.read()?.select(|r| r.rated_user() == user),
        ))
    }

    fn given_by(&self, user: UserId) -> Result<Vec<UserRating>, RepositoryError> {
        Ok(newest_first(self.ratings.read()?.select(|r| r.rated_by() == user)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use skillswap_domain::{Priority, ProficiencyLevel, Registration, Score};

    fn user(username: &str, email: &str) -> User {
        User::register(
            Registration {
                username: username.to_string(),
                email: email.to_string(),
                password: "correct horse".to_string(),
                password_confirmation: "correct horse".to_string(),
                first_name: "Test".to_string(),
                last_name: "User".to_string(),
                ..Default::default()
            },
            Utc::now(),
        )
    }

    #[test]
    fn test_user_email_is_unique_case_insensitively() {
        let mut repo = InMemoryUserRepository::new();
        repo.insert(user("alice", "alice@example.com")).unwrap();

        let err = repo.insert(user("alice2", "ALICE@example.com")).unwrap_err();
        assert_eq!(
            err,
            RepositoryError::UniqueViolation {
                constraint: "users.email"
            }
        );

        let found = repo.find_by_email("Alice@Example.com").unwrap();
        assert_eq!(found.map(|u| u.username().to_string()), Some("alice".to_string()));
        assert!(repo.find_by_username("alice").unwrap().is_some());
        assert!(repo.find_by_username("Alice").unwrap().is_none());
    }

    #[test]
    fn test_update_missing_user() {
        let mut repo = InMemoryUserRepository::new();
        let err = repo.update(&user("ghost", "ghost@example.com")).unwrap_err();
        assert!(matches!(err, RepositoryError::NotFound { entity: "User", .. }));
    }

    #[test]
    fn test_user_update_keeps_own_email() {
        let mut repo = InMemoryUserRepository::new();
        let mut alice = user("alice", "alice@example.com");
        repo.insert(alice.clone()).unwrap();
        alice.verify_email(Utc::now());
        repo.update(&alice).unwrap();
        assert!(repo.find_by_id(alice.id()).unwrap().unwrap().is_email_verified());
    }

    #[test]
    fn test_skill_name_unique_within_category() {
        let mut catalog = InMemorySkillCatalog::new();
        let music = SkillCategory::new("Music").unwrap();
        let code = SkillCategory::new("Programming").unwrap();
        let (music_id, code_id) = (music.id, code.id);
        catalog.insert_category(music).unwrap();
        catalog.insert_category(code).unwrap();

        catalog.insert_skill(Skill::new("Guitar", music_id, Utc::now()).unwrap()).unwrap();
        assert!(catalog
            .insert_skill(Skill::new("Guitar", music_id, Utc::now()).unwrap())
            .is_err());
        // Same name, different category
        catalog.insert_skill(Skill::new("Guitar", code_id, Utc::now()).unwrap()).unwrap();

        assert_eq!(catalog.list_skills().unwrap().len(), 2);
        assert!(catalog.insert_category(SkillCategory::new("Music").unwrap()).is_err());
    }

    #[test]
    fn test_skill_requires_known_category() {
        let mut catalog = InMemorySkillCatalog::new();
        let err = catalog
            .insert_skill(Skill::new("Chess", CategoryId::generate(), Utc::now()).unwrap())
            .unwrap_err();
        assert!(matches!(err, RepositoryError::NotFound { .. }));
    }

    #[test]
    fn test_user_skill_pair_is_unique() {
        let mut repo = InMemoryUserSkillRepository::new();
        let (user, skill) = (UserId::generate(), SkillId::generate());

        repo.insert(UserSkill::new(user, skill, ProficiencyLevel::Expert, 5, Utc::now()).unwrap())
            .unwrap();
        let err = repo
            .insert(UserSkill::new(user, skill, ProficiencyLevel::Beginner, 1, Utc::now()).unwrap())
            .unwrap_err();
        assert!(matches!(err, RepositoryError::UniqueViolation { .. }));

        let found = repo.find_by_skills(&[skill]).unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].proficiency(), ProficiencyLevel::Expert);
        let pair = repo.find_by_user_and_skill(user, skill).unwrap().unwrap();
        assert_eq!(pair.years_of_experience(), 5);
        assert!(repo
            .find_by_user_and_skill(user, SkillId::generate())
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_skill_wanted_pair_is_unique_and_deletable() {
        let mut repo = InMemorySkillWantedRepository::new();
        let (user, skill) = (UserId::generate(), SkillId::generate());
        let wanted = SkillWanted::new(user, skill, Priority::High, Utc::now());
        let id = wanted.id();

        repo.insert(wanted).unwrap();
        assert_eq!(
            repo.find_by_user_and_skill(user, skill).unwrap().map(|w| w.id()),
            Some(id)
        );
        assert!(repo
            .insert(SkillWanted::new(user, skill, Priority::Low, Utc::now()))
            .is_err());

        repo.delete(id).unwrap();
        assert!(repo.find_by_user_and_skill(user, skill).unwrap().is_none());
        assert!(repo.delete(id).is_err());
    }

    #[test]
    fn test_ratings_newest_first() {
        let mut repo = InMemoryRatingRepository::new();
        let (alice, bob) = (UserId::generate(), UserId::generate());
        let earlier = Utc::now() - chrono::Duration::hours(1);

        let old = UserRating::new(alice, bob, Score::parse("rating", 3).unwrap(), "", None, earlier)
            .unwrap();
        let new = UserRating::new(alice, bob, Score::parse("rating", 5).unwrap(), "", None, Utc::now())
            .unwrap();
        repo.insert(old).unwrap();
        repo.insert(new).unwrap();

        let received = repo.received_by(alice).unwrap();
        assert_eq!(received[0].score().value(), 5);
        assert_eq!(repo.given_by(bob).unwrap().len(), 2);
        assert!(repo.given_by(alice).unwrap().is_empty());
    }
}
