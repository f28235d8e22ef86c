//! MySQL implementations of the core repository traits

pub mod manifestation_repository_impl;
pub mod otp_repository_impl;
pub mod user_repository_impl;

pub use manifestation_repository_impl::MySqlManifestationRepository;
pub use otp_repository_impl::MySqlOtpRepository;
pub use user_repository_impl::MySqlUserRepository;

use ouv_core::errors::DomainError;
use uuid::Uuid;

/// Parse a `CHAR(36)` id column
pub(crate) fn parse_uuid(value: &str) -> Result<Uuid, DomainError> {
    Uuid::parse_str(value).map_err(|e| DomainError::Internal {
        message: format!("Invalid UUID in database: {}", e),
    })
}

/// Column read failure
pub(crate) fn column_error(column: &'static str) -> impl FnOnce(sqlx::Error) -> DomainError {
    move |e| DomainError::Internal {
        message: format!("Failed to get {}: {}", column, e),
    }
}
