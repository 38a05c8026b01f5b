//! Domain errors
//!
//! Every failure the core can produce. The variants line up with how the
//! surrounding API reports them: field-level validation (400), missing
//! records (404), forbidden actors (403).

use thiserror::Error;

use crate::repository::RepositoryError;

/// Errors raised by entities and domain services
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// A field failed validation
    #[error("{field}: {message}")]
    Validation { field: &'static str, message: String },

    /// A referenced record does not exist
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    /// A status change that the lifecycle does not allow
    #[error("Invalid {entity} transition from {from} to {to}")]
    InvalidTransition {
        entity: &'static str,
        from: String,
        to: String,
    },

    /// The acting user may not perform this operation
    #[error("Permission denied: {reason}")]
    PermissionDenied { reason: String },

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl DomainError {
    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        DomainError::Validation {
            field,
            message: message.into(),
        }
    }

    pub fn not_found(entity: &'static str, id: impl core::fmt::Display) -> Self {
        DomainError::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    pub fn permission_denied(reason: impl Into<String>) -> Self {
        DomainError::PermissionDenied {
            reason: reason.into(),
        }
    }

    pub fn invalid_transition(
        entity: &'static str,
        from: impl core::fmt::Display,
        to: impl core::fmt::Display,
    ) -> Self {
        DomainError::InvalidTransition {
            entity,
            from: from.to_string(),
            to: to.to_string(),
        }
    }

    /// HTTP-style status code for the surrounding API layer
    pub fn status_code(&self) -> u16 {
        match self {
            DomainError::Validation { .. } | DomainError::InvalidTransition { .. } => 400,
            DomainError::NotFound { .. } => 404,
            DomainError::PermissionDenied { .. } => 403,
            DomainError::Repository(RepositoryError::UniqueViolation { .. }) => 400,
            DomainError::Repository(RepositoryError::NotFound { .. }) => 404,
            DomainError::Repository(RepositoryError::Persistence { .. }) => 500,
        }
    }

    /// The offending field, for validation errors
    pub fn field(&self) -> Option<&'static str> {
        match self {
            DomainError::Validation { field, .. } => Some(field),
            _ => None,
        }
    }
}

pub type DomainResult<T> = Result<T, DomainError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(DomainError::validation("rating", "out of range").status_code(), 400);
        assert_eq!(DomainError::not_found("User", "u-1").status_code(), 404);
        assert_eq!(DomainError::permission_denied("nope").status_code(), 403);
        assert_eq!(
            DomainError::invalid_transition("ExchangeRequest", "accepted", "rejected").status_code(),
            400
        );
        assert_eq!(
            DomainError::from(RepositoryError::UniqueViolation {
                constraint: "user_skill(user, skill)"
            })
            .status_code(),
            400
        );
        assert_eq!(
            DomainError::from(RepositoryError::Persistence {
                message: "lock".to_string()
            })
            .status_code(),
            500
        );
    }

    #[test]
    fn test_validation_field_and_message() {
        let err = DomainError::validation("password", "Password fields didn't match.");
        assert_eq!(err.field(), Some("password"));
        assert_eq!(err.to_string(), "password: Password fields didn't match.");
    }
}
