//! Accounts, the skill catalog, skill listings, matching and ratings

use skillswap_domain::{
    average_rating, CategoryId, DomainError, DomainResult, LifecycleEvent, Priority,
    ProficiencyLevel, ProfileUpdate, Registration, Score, Skill, SkillCategory, SkillId,
    SkillWanted, SkillWantedId, User, UserId, UserRating, UserSkill, UserSkillId,
};
use tracing::{debug, info};

use crate::marketplace::Marketplace;

/// A skill a user lists as something they know
#[derive(Debug, Clone)]
pub struct NewUserSkill {
    pub skill: SkillId,
    pub proficiency: ProficiencyLevel,
    pub years_of_experience: u8,
    pub can_teach: bool,
    pub description: String,
}

/// A skill a user wants to learn
#[derive(Debug, Clone)]
pub struct NewWantedSkill {
    pub skill: SkillId,
    pub priority: Priority,
    pub description: String,
}

#[derive(Debug, Clone)]
pub struct RatingInput {
    pub rated_user: UserId,
    pub score: u8,
    pub review: String,
    pub skill: Option<SkillId>,
}

impl Marketplace {
    // ========== Users ==========

    /// Register a new user
    ///
    /// Duplicate emails and usernames are reported against their field
    /// before anything is written.
    pub fn register_user(&mut self, form: Registration) -> DomainResult<User> {
        form.validate(self.config.min_password_length)?;
        if self.repos.users.find_by_email(&form.email)?.is_some() {
            return Err(DomainError::validation(
                "email",
                "A user with that email already exists.",
            ));
        }
        if self.repos.users.find_by_username(form.username.trim())?.is_some() {
            return Err(DomainError::validation(
                "username",
                "A user with that username already exists.",
            ));
        }

        let user = User::register(form, self.now());
        self.repos.users.insert(user.clone())?;
        info!(user_id = %user.id(), username = %user.username(), "user registered");
        Ok(user)
    }

    pub fn user(&self, id: UserId) -> DomainResult<User> {
        self.require_user(id)
    }

    pub fn user_by_username(&self, username: &str) -> DomainResult<User> {
        self.repos
            .users
            .find_by_username(username)?
            .ok_or_else(|| DomainError::not_found("User", username))
    }

    pub fn update_profile(&mut self, user: UserId, update: ProfileUpdate) -> DomainResult<User> {
        let mut current = self.require_user(user)?;
        current.update_profile(update, self.now())?;
        self.repos.users.update(&current)?;
        debug!(user_id = %user, "profile updated");
        Ok(current)
    }

    pub fn verify_email(&mut self, user: UserId) -> DomainResult<User> {
        let mut current = self.require_user(user)?;
        current.verify_email(self.now());
        self.repos.users.update(&current)?;
        info!(user_id = %user, "email verified");
        Ok(current)
    }

    // ========== Catalog ==========

    pub fn add_category(&mut self, category: SkillCategory) -> DomainResult<SkillCategory> {
        if self
            .repos
            .catalog
            .list_categories()?
            .iter()
            .any(|c| c.name == category.name)
        {
            return Err(DomainError::validation(
                "name",
                "skill category with this name already exists.",
            ));
        }
        self.repos.catalog.insert_category(category.clone())?;
        debug!(category_id = %category.id, name = %category.name, "category added");
        Ok(category)
    }

    pub fn add_skill(
        &mut self,
        name: &str,
        category: CategoryId,
        description: &str,
    ) -> DomainResult<Skill> {
        if self.repos.catalog.find_category(category)?.is_none() {
            return Err(DomainError::not_found("SkillCategory", category));
        }
        let skill = Skill::new(name, category, self.now())?.with_description(description);
        if self
            .repos
            .catalog
            .skills_in_category(category)?
            .iter()
            .any(|s| s.name == skill.name)
        {
            return Err(DomainError::validation(
                "name",
                "Skill with this name already exists in this category.",
            ));
        }
        self.repos.catalog.insert_skill(skill.clone())?;
        debug!(skill_id = %skill.id, name = %skill.name, "skill added");
        Ok(skill)
    }

    pub fn categories(&self) -> DomainResult<Vec<SkillCategory>> {
        Ok(self.repos.catalog.list_categories()?)
    }

    pub fn skills(&self) -> DomainResult<Vec<Skill>> {
        Ok(self.repos.catalog.list_skills()?)
    }

    pub fn skills_in_category(&self, category: CategoryId) -> DomainResult<Vec<Skill>> {
        Ok(self.repos.catalog.skills_in_category(category)?)
    }

    pub fn skill(&self, id: SkillId) -> DomainResult<Skill> {
        self.repos
            .catalog
            .find_skill(id)?
            .ok_or_else(|| DomainError::not_found("Skill", id))
    }

    // ========== Skills a user has ==========

    pub fn add_user_skill(&mut self, user: UserId, input: NewUserSkill) -> DomainResult<UserSkill> {
        self.require_user(user)?;
        self.skill(input.skill)?;
        if self
            .repos
            .user_skills
            .find_by_user_and_skill(user, input.skill)?
            .is_some()
        {
            return Err(DomainError::validation(
                "skill",
                "You already have this skill listed.",
            ));
        }

        let mut row = UserSkill::new(
            user,
            input.skill,
            input.proficiency,
            input.years_of_experience,
            self.now(),
        )?
        .with_description(input.description);
        if !input.can_teach {
            row = row.learning_only();
        }
        self.repos.user_skills.insert(row.clone())?;
        info!(user_id = %user, skill_id = %input.skill, can_teach = row.can_teach(), "user skill added");
        Ok(row)
    }

    /// Owner-only edit of proficiency, experience and teachability
    pub fn update_user_skill(
        &mut self,
        actor: UserId,
        id: UserSkillId,
        proficiency: ProficiencyLevel,
        years_of_experience: u8,
        can_teach: bool,
    ) -> DomainResult<UserSkill> {
        let mut row = self.owned_user_skill(actor, id)?;
        row.update(proficiency, years_of_experience, can_teach, self.now())?;
        self.repos.user_skills.update(&row)?;
        Ok(row)
    }

    pub fn remove_user_skill(&mut self, actor: UserId, id: UserSkillId) -> DomainResult<()> {
        self.owned_user_skill(actor, id)?;
        self.repos.user_skills.delete(id)?;
        debug!(user_id = %actor, user_skill_id = %id, "user skill removed");
        Ok(())
    }

    pub fn user_skills(&self, user: UserId) -> DomainResult<Vec<UserSkill>> {
        Ok(self.repos.user_skills.find_by_user(user)?)
    }

    fn owned_user_skill(&self, actor: UserId, id: UserSkillId) -> DomainResult<UserSkill> {
        let row = self
            .repos
            .user_skills
            .find_by_id(id)?
            .ok_or_else(|| DomainError::not_found("UserSkill", id))?;
        if row.user() != actor {
            return Err(DomainError::permission_denied(
                "only the owner can change a listed skill",
            ));
        }
        Ok(row)
    }

    // ========== Skills a user wants ==========

    pub fn add_skill_wanted(&mut self, user: UserId, input: NewWantedSkill) -> DomainResult<SkillWanted> {
        self.require_user(user)?;
        self.skill(input.skill)?;
        if self
            .repos
            .skills_wanted
            .find_by_user_and_skill(user, input.skill)?
            .is_some()
        {
            return Err(DomainError::validation(
                "skill",
                "You already want to learn this skill.",
            ));
        }

        let wanted = SkillWanted::new(user, input.skill, input.priority, self.now())
            .with_description(input.description);
        self.repos.skills_wanted.insert(wanted.clone())?;
        info!(user_id = %user, skill_id = %input.skill, priority = %input.priority, "wanted skill added");
        Ok(wanted)
    }

    pub fn set_wanted_priority(
        &mut self,
        actor: UserId,
        id: SkillWantedId,
        priority: Priority,
    ) -> DomainResult<SkillWanted> {
        let mut wanted = self.owned_wanted(actor, id)?;
        wanted.set_priority(priority, self.now());
        self.repos.skills_wanted.update(&wanted)?;
        Ok(wanted)
    }

    pub fn remove_skill_wanted(&mut self, actor: UserId, id: SkillWantedId) -> DomainResult<()> {
        self.owned_wanted(actor, id)?;
        self.repos.skills_wanted.delete(id)?;
        Ok(())
    }

    pub fn skills_wanted(&self, user: UserId) -> DomainResult<Vec<SkillWanted>> {
        Ok(self.repos.skills_wanted.find_by_user(user)?)
    }

    fn owned_wanted(&self, actor: UserId, id: SkillWantedId) -> DomainResult<SkillWanted> {
        let wanted = self
            .repos
            .skills_wanted
            .find_by_id(id)?
            .ok_or_else(|| DomainError::not_found("SkillWanted", id))?;
        if wanted.user() != actor {
            return Err(DomainError::permission_denied(
                "only the owner can change a wanted skill",
            ));
        }
        Ok(wanted)
    }

    // ========== Matching ==========

    /// Teachable rows from other users for the skills `user` wants
    pub fn find_matches(&self, user: UserId) -> DomainResult<Vec<UserSkill>> {
        self.require_user(user)?;
        let wants = self.repos.skills_wanted.find_by_user(user)?;
        let wanted_ids = self.matcher.wanted_skill_ids(user, &wants);
        if wanted_ids.is_empty() {
            return Ok(Vec::new());
        }

        let candidates = self.repos.user_skills.find_by_skills(&wanted_ids)?;
        let matches = self.matcher.find_matches(user, &wants, &candidates);
        debug!(user_id = %user, wanted = wanted_ids.len(), matches = matches.len(), "matches computed");
        Ok(matches)
    }

    /// Every teachable row for one skill
    pub fn users_with_skill(&self, skill: SkillId) -> DomainResult<Vec<UserSkill>> {
        self.skill(skill)?;
        let candidates = self.repos.user_skills.find_by_skills(&[skill])?;
        Ok(self.matcher.teachers_of(skill, &candidates))
    }

    pub fn teachable_skills(&self, user: UserId) -> DomainResult<Vec<UserSkill>> {
        Ok(self
            .repos
            .user_skills
            .find_by_user(user)?
            .into_iter()
            .filter(|row| row.can_teach())
            .collect())
    }

    // ========== Ratings ==========

    pub fn rate_user(&mut self, rated_by: UserId, input: RatingInput) -> DomainResult<UserRating> {
        self.require_user(rated_by)?;
        self.require_user(input.rated_user)?;
        if let Some(skill) = input.skill {
            self.skill(skill)?;
        }

        let score = Score::parse("rating", input.score)?;
        let rating = UserRating::new(
            input.rated_user,
            rated_by,
            score,
            input.review,
            input.skill,
            self.now(),
        )?;
        self.repos.ratings.insert(rating.clone())?;
        info!(
            rating_id = %rating.id(),
            rated_user = %rating.rated_user(),
            rated_by = %rated_by,
            score = %score,
            "user rated"
        );

        self.record(LifecycleEvent::RatingReceived { rating: &rating })?;
        Ok(rating)
    }

    pub fn ratings_received(&self, user: UserId) -> DomainResult<Vec<UserRating>> {
        Ok(self.repos.ratings.received_by(user)?)
    }

    /// Mean received score rounded to two decimals; `None` without ratings
    pub fn average_rating(&self, user: UserId) -> DomainResult<Option<f64>> {
        Ok(average_rating(&self.repos.ratings.received_by(user)?))
    }
}
