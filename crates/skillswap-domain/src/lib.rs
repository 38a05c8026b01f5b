//! # SkillSwap Domain Layer
//!
//! The heart of SkillSwap - the matching and exchange-lifecycle rules.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                    Domain Layer (This Crate)                     │
//! │  ┌─────────────────────────────────────────────────────────────┐│
//! │  │  model/     - Entities & Value Objects                      ││
//! │  │  repository/- Trait definitions (not implementations)       ││
//! │  │  service/   - Domain services (Matcher, NotificationPolicy) ││
//! │  └─────────────────────────────────────────────────────────────┘│
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## The Golden Rule
//!
//! **This crate performs no I/O.**
//!
//! Entities guard their own invariants (ordered session windows, bounded
//! scores, status transitions). Persistence is reached only through the
//! repository traits, so swapping the in-memory adapter for a relational
//! store never touches this crate.

pub mod error;
pub mod model;
pub mod repository;
pub mod service;

// Re-export commonly used types
pub use error::{DomainError, DomainResult};

pub use model::{
    exchange::{
        ExchangeProposal, ExchangeRequest, ExchangeStatus, MAX_DURATION_MINUTES,
        MIN_DURATION_MINUTES,
    },
    feedback::{FeedbackScores, SessionFeedback},
    ids::{
        BookingId, CategoryId, ExchangeRequestId, FeedbackId, NotificationId, OfferId, RatingId,
        SessionId, SkillId, SkillWantedId, UserId, UserSkillId,
    },
    notification::{Notification, NotificationKind},
    offer::{Booking, BookingStatus, OfferListing, OfferStatus, SkillExchangeOffer},
    rating::{average_rating, Score, UserRating},
    session::{ExchangeSession, MeetingType, SessionPlan, SessionStatus},
    skill::{Priority, ProficiencyLevel, Skill, SkillCategory, SkillWanted, UserSkill},
    user::{ProfileUpdate, Registration, User},
};

pub use repository::{
    account_repository::{
        RatingRepository, SkillCatalog, SkillWantedRepository, UserRepository,
        UserSkillRepository,
    },
    exchange_repository::{ExchangeRequestRepository, FeedbackRepository, SessionRepository},
    notification_repository::NotificationRepository,
    offer_repository::{BookingRepository, OfferRepository},
    RepositoryError,
};

pub use service::{
    matching::Matcher,
    notification_policy::{LifecycleEvent, NotificationDraft, NotificationPolicy},
};
