//! Error types for authentication, session tokens and input validation
//!
//! User-facing wording lives in the presentation layer; the messages here are
//! for logs and developers.

use thiserror::Error;

/// Authentication-related errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("Invalid email address: {email}")]
    InvalidEmail { email: String },

    /// Covers wrong, expired and missing codes alike
    #[error("Invalid or expired verification code")]
    InvalidVerificationCode { remaining_attempts: Option<i32> },

    #[error("Maximum attempts exceeded")]
    MaxAttemptsExceeded,

    #[error("Email delivery failure: {reason}")]
    EmailDeliveryFailure { reason: String },

    #[error("User not found")]
    UserNotFound,

    #[error("Authentication failed")]
    AuthenticationFailed,
}

/// Session token errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token format")]
    InvalidTokenFormat,

    #[error("Invalid signature")]
    InvalidSignature,

    #[error("Token not yet valid")]
    TokenNotYetValid,

    #[error("Invalid claims")]
    InvalidClaims,

    #[error("Token generation failed")]
    TokenGenerationFailed,
}

/// Input validation errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Required field: {field}")]
    RequiredField { field: String },

    #[error("Invalid format: {field}")]
    InvalidFormat { field: String },

    #[error("Invalid length: {field} (min: {min}, max: {max}, actual: {actual})")]
    InvalidLength {
        field: String,
        min: usize,
        max: usize,
        actual: usize,
    },

    #[error("Invalid email")]
    InvalidEmail,
}

impl ValidationError {
    pub fn required(field: &str) -> Self {
        ValidationError::RequiredField {
            field: field.to_string(),
        }
    }

    pub fn invalid_format(field: &str) -> Self {
        ValidationError::InvalidFormat {
            field: field.to_string(),
        }
    }

    /// Name of the offending field, if the error has one
    pub fn field(&self) -> Option<&str> {
        match self {
            ValidationError::RequiredField { field }
            | ValidationError::InvalidFormat { field }
            | ValidationError::InvalidLength { field, .. } => Some(field),
            ValidationError::InvalidEmail => Some("email"),
        }
    }
}
