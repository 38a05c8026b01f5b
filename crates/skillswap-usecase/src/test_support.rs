//! Builders shared by the service tests

use chrono::{DateTime, Duration, Utc};
use shared::MarketplaceConfig;
use skillswap_adapter::{
    InMemoryBookingRepository, InMemoryExchangeRequestRepository, InMemoryFeedbackRepository,
    InMemoryNotificationRepository, InMemoryOfferRepository, InMemoryRatingRepository,
    InMemorySessionRepository, InMemorySkillCatalog, InMemorySkillWantedRepository,
    InMemoryUserRepository, InMemoryUserSkillRepository,
};
use skillswap_domain::{
    ExchangeProposal, ExchangeRequestId, MeetingType, Registration, SessionPlan, SkillCategory,
    SkillId, User, UserId,
};

use crate::marketplace::{Marketplace, Repositories};

pub fn marketplace_with(config: MarketplaceConfig) -> Marketplace {
    let repos = Repositories {
        users: Box::new(InMemoryUserRepository::new()),
        catalog: Box::new(InMemorySkillCatalog::new()),
        user_skills: Box::new(InMemoryUserSkillRepository::new()),
        skills_wanted: Box::new(InMemorySkillWantedRepository::new()),
        ratings: Box::new(InMemoryRatingRepository::new()),
        requests: Box::new(InMemoryExchangeRequestRepository::new()),
        sessions: Box::new(InMemorySessionRepository::new()),
        feedback: Box::new(InMemoryFeedbackRepository::new()),
        offers: Box::new(InMemoryOfferRepository::new()),
        bookings: Box::new(InMemoryBookingRepository::new()),
        notifications: Box::new(InMemoryNotificationRepository::new()),
    };
    Marketplace::new(repos, config)
}

pub fn marketplace() -> Marketplace {
    marketplace_with(MarketplaceConfig::default())
}

pub fn register(market: &mut Marketplace, username: &str) -> User {
    let mut first_name = username.to_string();
    if let Some(first) = first_name.get_mut(0..1) {
        first.make_ascii_uppercase();
    }
    market
        .register_user(Registration {
            username: username.to_string(),
            email: format!("{username}@example.com"),
            password: "correct horse battery".to_string(),
            password_confirmation: "correct horse battery".to_string(),
            first_name,
            last_name: "Tester".to_string(),
            ..Default::default()
        })
        .unwrap()
}

/// Add a skill, creating its category on first use
pub fn seed_skill(market: &mut Marketplace, category: &str, name: &str) -> SkillId {
    let existing = market
        .categories()
        .unwrap()
        .into_iter()
        .find(|c| c.name == category);
    let category = match existing {
        Some(found) => found,
        None => market
            .add_category(SkillCategory::new(category).unwrap())
            .unwrap(),
    };
    market.add_skill(name, category.id, "").unwrap().id
}

pub fn propose(requester: UserId, receiver: UserId, offered: SkillId, requested: SkillId) -> ExchangeProposal {
    ExchangeProposal {
        requester,
        receiver,
        skill_offered: offered,
        skill_requested: requested,
        message: "Want to swap lessons?".to_string(),
        proposed_date: None,
        duration_minutes: None,
    }
}

pub fn plan(start: DateTime<Utc>, minutes: i64) -> SessionPlan {
    SessionPlan {
        scheduled_start: start,
        scheduled_end: start + Duration::minutes(minutes),
        meeting_type: MeetingType::Online,
        meeting_link: Some("https://meet.example.com/swap".to_string()),
        location: None,
        notes: String::new(),
    }
}

/// Alice's request to Bob, already accepted by Bob
pub fn accepted_pair(config: MarketplaceConfig) -> (Marketplace, UserId, UserId, ExchangeRequestId) {
    let mut market = marketplace_with(config);
    let alice = register(&mut market, "alice").id();
    let bob = register(&mut market, "bob").id();
    let guitar = seed_skill(&mut market, "Music", "Guitar");
    let piano = seed_skill(&mut market, "Music", "Piano");
    let request = market
        .create_exchange_request(propose(alice, bob, guitar, piano))
        .unwrap();
    market.accept_request(bob, request.id(), None).unwrap();
    (market, alice, bob, request.id())
}
