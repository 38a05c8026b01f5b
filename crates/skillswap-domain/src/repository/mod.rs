//! Repository Traits - The "Ports" of Hexagonal Architecture
//!
//! These traits define HOW the domain wants to persist data,
//! but NOT how it's actually done. That's the adapter's job.
//!
//! ```text
//! Domain Layer            │  Adapter Layer
//! ────────────────────────┼────────────────────────
//! trait UserSkillRepo     │  InMemoryUserSkillRepository
//!   fn insert()           │  (PostgresUserSkillRepository)
//!   fn find_by_skills()   │
//! ```
//!
//! Uniqueness constraints (one row per (user, skill), one feedback per
//! (session, user), ...) are the store's responsibility. Implementations
//! report them as [`RepositoryError::UniqueViolation`].
//!
//! Note: No async here. Request handling is synchronous, one write at a time.

use thiserror::Error;

pub mod account_repository;
pub mod exchange_repository;
pub mod notification_repository;
pub mod offer_repository;

/// Errors that can occur during repository operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepositoryError {
    /// Row to update does not exist
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    /// A uniqueness constraint rejected the write
    #[error("Unique constraint violated: {constraint}")]
    UniqueViolation { constraint: &'static str },

    /// Failed to persist
    #[error("Persistence error: {message}")]
    Persistence { message: String },
}

impl RepositoryError {
    pub fn not_found(entity: &'static str, id: impl core::fmt::Display) -> Self {
        RepositoryError::NotFound {
            entity,
            id: id.to_string(),
        }
    }
}
