//! Marketplace - Dependency wiring for the application services

use chrono::{DateTime, Utc};
use shared::MarketplaceConfig;
use skillswap_domain::{
    BookingRepository, DomainError, DomainResult, ExchangeRequestRepository, FeedbackRepository,
    LifecycleEvent, Matcher, Notification, NotificationPolicy, NotificationRepository,
    OfferRepository, RatingRepository, SessionRepository, SkillCatalog, SkillWantedRepository,
    User, UserId, UserRepository, UserSkillRepository,
};
use tracing::debug;

/// The repository ports the marketplace writes through
///
/// Any adapter works; the CLI and the tests use the in-memory one.
pub struct Repositories {
    pub users: Box<dyn UserRepository>,
    pub catalog: Box<dyn SkillCatalog>,
    pub user_skills: Box<dyn UserSkillRepository>,
    pub skills_wanted: Box<dyn SkillWantedRepository>,
    pub ratings: Box<dyn RatingRepository>,
    pub requests: Box<dyn ExchangeRequestRepository>,
    pub sessions: Box<dyn SessionRepository>,
    pub feedback: Box<dyn FeedbackRepository>,
    pub offers: Box<dyn OfferRepository>,
    pub bookings: Box<dyn BookingRepository>,
    pub notifications: Box<dyn NotificationRepository>,
}

/// Application service for the whole marketplace
///
/// Operations are synchronous and single-writer: callers take `&mut self`
/// for every write.
pub struct Marketplace {
    pub(crate) repos: Repositories,
    pub(crate) config: MarketplaceConfig,
    pub(crate) matcher: Matcher,
    pub(crate) policy: NotificationPolicy,
    clock: fn() -> DateTime<Utc>,
}

impl Marketplace {
    pub fn new(repos: Repositories, config: MarketplaceConfig) -> Self {
        Self {
            repos,
            config,
            matcher: Matcher::new(),
            policy: NotificationPolicy::new(),
            clock: Utc::now,
        }
    }

    /// Replace the wall clock, e.g. with a fixed instant
    pub fn with_clock(mut self, clock: fn() -> DateTime<Utc>) -> Self {
        self.clock = clock;
        self
    }

    pub fn config(&self) -> &MarketplaceConfig {
        &self.config
    }

    pub(crate) fn now(&self) -> DateTime<Utc> {
        (self.clock)()
    }

    /// Load a user or fail with 404
    pub(crate) fn require_user(&self, id: UserId) -> DomainResult<User> {
        self.repos
            .users
            .find_by_id(id)?
            .ok_or_else(|| DomainError::not_found("User", id))
    }

    /// Persist the notifications an event produces
    ///
    /// A no-op when notifications are disabled.
    pub(crate) fn record(&mut self, event: LifecycleEvent<'_>) -> DomainResult<Vec<Notification>> {
        if !self.config.notifications.enabled {
            return Ok(Vec::new());
        }

        let now = self.now();
        let mut created = Vec::new();
        for draft in self.policy.drafts_for(event) {
            let notification = Notification::from_draft(draft, now);
            debug!(
                notification_id = %notification.id(),
                recipient = %notification.recipient(),
                kind = %notification.kind(),
                "notification recorded"
            );
            self.repos.notifications.insert(notification.clone())?;
            created.push(notification);
        }
        Ok(created)
    }
}
