//! Account Repositories - Users, the skill catalog, and per-user skill rows

use crate::model::ids::{CategoryId, RatingId, SkillId, SkillWantedId, UserId, UserSkillId};
use crate::model::rating::UserRating;
use crate::model::skill::{Skill, SkillCategory, SkillWanted, UserSkill};
use crate::model::user::User;
use crate::repository::RepositoryError;

/// User Repository Trait
///
/// Email and username are unique.
pub trait UserRepository {
    /// Insert a new user
    fn insert(&mut self, user: User) -> Result<(), RepositoryError>;

    /// Overwrite an existing user
    fn update(&mut self, user: &User) -> Result<(), RepositoryError>;

    fn find_by_id(&self, id: UserId) -> Result<Option<User>, RepositoryError>;

    fn find_by_email(&self, email: &str) -> Result<Option<User>, RepositoryError>;

    fn find_by_username(&self, username: &str) -> Result<Option<User>, RepositoryError>;

    fn list_all(&self) -> Result<Vec<User>, RepositoryError>;

    fn exists(&self, id: UserId) -> Result<bool, RepositoryError> {
        Ok(self.find_by_id(id)?.is_some())
    }
}

/// Skill taxonomy: categories and the skills inside them
///
/// Category names are unique; skill names are unique within a category.
pub trait SkillCatalog {
    fn insert_category(&mut self, category: SkillCategory) -> Result<(), RepositoryError>;

    fn find_category(&self, id: CategoryId) -> Result<Option<SkillCategory>, RepositoryError>;

    fn list_categories(&self) -> Result<Vec<SkillCategory>, RepositoryError>;

    fn insert_skill(&mut self, skill: Skill) -> Result<(), RepositoryError>;

    fn find_skill(&self, id: SkillId) -> Result<Option<Skill>, RepositoryError>;

    fn skills_in_category(&self, category: CategoryId) -> Result<Vec<Skill>, RepositoryError>;

    fn list_skills(&self) -> Result<Vec<Skill>, RepositoryError>;

    fn skill_exists(&self, id: SkillId) -> Result<bool, RepositoryError> {
        Ok(self.find_skill(id)?.is_some())
    }
}

/// Skills users possess; (user, skill) is unique
pub trait UserSkillRepository {
    fn insert(&mut self, user_skill: UserSkill) -> Result<(), RepositoryError>;

    fn update(&mut self, user_skill: &UserSkill) -> Result<(), RepositoryError>;

    fn delete(&mut self, id: UserSkillId) -> Result<(), RepositoryError>;

    fn find_by_id(&self, id: UserSkillId) -> Result<Option<UserSkill>, RepositoryError>;

    fn find_by_user(&self, user: UserId) -> Result<Vec<UserSkill>, RepositoryError>;

    fn find_by_user_and_skill(
        &self,
        user: UserId,
        skill: SkillId,
    ) -> Result<Option<UserSkill>, RepositoryError>;

    /// All rows whose skill is in `skills`, teachable or not
    fn find_by_skills(&self, skills: &[SkillId]) -> Result<Vec<UserSkill>, RepositoryError>;
}

/// Skills users want to learn; (user, skill) is unique
pub trait SkillWantedRepository {
    fn insert(&mut self, wanted: SkillWanted) -> Result<(), RepositoryError>;

    fn update(&mut self, wanted: &SkillWanted) -> Result<(), RepositoryError>;

    fn delete(&mut self, id: SkillWantedId) -> Result<(), RepositoryError>;

    fn find_by_id(&self, id: SkillWantedId) -> Result<Option<SkillWanted>, RepositoryError>;

    fn find_by_user(&self, user: UserId) -> Result<Vec<SkillWanted>, RepositoryError>;

    fn find_by_user_and_skill(
        &self,
        user: UserId,
        skill: SkillId,
    ) -> Result<Option<SkillWanted>, RepositoryError>;
}

/// User ratings. Append-only: there is no update or delete.
pub trait RatingRepository {
    fn insert(&mut self, rating: UserRating) -> Result<(), RepositoryError>;

    fn find_by_id(&self, id: RatingId) -> Result<Option<UserRating>, RepositoryError>;

    /// Ratings about `user`, newest first
    fn received_by(&self, user: UserId) -> Result<Vec<UserRating>, RepositoryError>;

    /// Ratings written by `user`, newest first
    fn given_by(&self, user: UserId) -> Result<Vec<UserRating>, RepositoryError>;
}
