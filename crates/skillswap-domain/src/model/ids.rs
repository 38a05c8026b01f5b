//! Typed identifiers
//!
//! Every row is keyed by a UUID wrapped in its own newtype, so a `SkillId`
//! can never be passed where a `UserId` is expected.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Generate a fresh random identifier
            pub fn generate() -> Self {
                Self(Uuid::new_v4())
            }

            pub fn from_uuid(id: Uuid) -> Self {
                Self(id)
            }

            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl core::str::FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Uuid::parse_str(s).map(Self)
            }
        }
    };
}

define_id!(
    /// Unique identifier for a User
    UserId
);
define_id!(
    /// Unique identifier for a SkillCategory
    CategoryId
);
define_id!(
    /// Unique identifier for a Skill
    SkillId
);
define_id!(
    /// Unique identifier for a UserSkill row
    UserSkillId
);
define_id!(
    /// Unique identifier for a SkillWanted row
    SkillWantedId
);
define_id!(
    /// Unique identifier for a UserRating
    RatingId
);
define_id!(
    /// Unique identifier for an ExchangeRequest
    ExchangeRequestId
);
define_id!(
    /// Unique identifier for an ExchangeSession
    SessionId
);
define_id!(
    /// Unique identifier for a SessionFeedback
    FeedbackId
);
define_id!(
    /// Unique identifier for a SkillExchangeOffer
    OfferId
);
define_id!(
    /// Unique identifier for a Booking
    BookingId
);
define_id!(
    /// Unique identifier for a Notification
    NotificationId
);
