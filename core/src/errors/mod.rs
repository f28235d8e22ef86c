//! Domain-specific error types and error handling.

mod types;

pub use types::{AuthError, TokenError, ValidationError};

use thiserror::Error;

/// Core domain errors (general purpose)
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Resource not found: {resource}")]
    NotFound { resource: String },

    /// A unique key was already taken
    #[error("Conflict: {resource}")]
    Conflict { resource: String },

    #[error("Unauthorized access")]
    Unauthorized,

    #[error("Internal error: {message}")]
    Internal { message: String },

    // Bridge to specific error types
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Token(#[from] TokenError),

    #[error(transparent)]
    ValidationErr(#[from] ValidationError),
}

impl DomainError {
    pub fn internal(message: impl Into<String>) -> Self {
        DomainError::Internal {
            message: message.into(),
        }
    }

    pub fn not_found(resource: impl Into<String>) -> Self {
        DomainError::NotFound {
            resource: resource.into(),
        }
    }
}

pub type DomainResult<T> = Result<T, DomainError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bridged_errors_keep_their_message() {
        let error: DomainError = AuthError::MaxAttemptsExceeded.into();
        assert_eq!(error.to_string(), "Maximum attempts exceeded");

        let error: DomainError = ValidationError::required("email").into();
        assert_eq!(error.to_string(), "Required field: email");
    }

    #[test]
    fn test_validation_error_field() {
        let error = ValidationError::InvalidLength {
            field: "subject".into(),
            min: 3,
            max: 200,
            actual: 1,
        };
        assert_eq!(error.field(), Some("subject"));
        assert_eq!(ValidationError::InvalidEmail.field(), Some("email"));
    }

    #[test]
    fn test_helpers() {
        assert!(matches!(DomainError::internal("db down"), DomainError::Internal { .. }));
        assert_eq!(
            DomainError::not_found("manifestation").to_string(),
            "Resource not found: manifestation"
        );
    }
}
