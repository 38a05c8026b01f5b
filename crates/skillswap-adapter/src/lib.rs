//! # SkillSwap Adapter Layer
//!
//! Outbound adapters for the domain's repository ports (Hexagonal
//! Architecture).
//!
//! ## Structure
//!
//! - `repository/` - Persistence implementations

pub mod repository;

pub use repository::in_memory::{
    InMemoryBookingRepository, InMemoryExchangeRequestRepository, InMemoryFeedbackRepository,
    InMemoryNotificationRepository, InMemoryOfferRepository, InMemoryRatingRepository,
    InMemorySessionRepository, InMemorySkillCatalog, InMemorySkillWantedRepository,
    InMemoryUserRepository, InMemoryUserSkillRepository,
};
