//! Database module - MySQL implementations using SQLx
//!
//! - Connection pool management and embedded migrations
//! - Repository implementations for codes, users and manifestations

pub mod connection;
pub mod mysql;

// Re-export commonly used types
pub use connection::{DatabasePool, PoolStats};
pub use mysql::{MySqlManifestationRepository, MySqlOtpRepository, MySqlUserRepository};

use ouv_core::errors::DomainError;

/// Log a failed statement and hide the driver error behind `DomainError::Internal`
pub(crate) fn storage_error(operation: &'static str) -> impl FnOnce(sqlx::Error) -> DomainError {
    move |e| {
        tracing::error!(operation, error = %e, "Database operation failed");
        DomainError::Internal {
            message: format!("Database operation '{}' failed: {}", operation, e),
        }
    }
}

/// Whether a driver error is a duplicate-key violation
pub(crate) fn is_unique_violation(error: &sqlx::Error) -> bool {
    matches!(error, sqlx::Error::Database(db) if db.is_unique_violation())
}

/// Whether a driver error is a lock conflict with a concurrent transaction
pub(crate) fn is_lock_conflict(error: &sqlx::Error) -> bool {
    matches!(error, sqlx::Error::Database(db) if db.code().as_deref() == Some("40001"))
}
