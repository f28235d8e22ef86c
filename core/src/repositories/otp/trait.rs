//! OTP code store interface.
//!
//! The store keeps at most one live code per email address. Issuing and the
//! resend cooldown are decided in a single atomic step so that two concurrent
//! requests for the same address cannot both pass the cooldown check.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::entities::OtpCode;
use crate::errors::DomainError;

/// Result of an atomic issue attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IssueOutcome {
    /// The code was stored and every previous code for the address removed
    Issued(OtpCode),

    /// A code issued after the cutoff already exists; nothing was changed
    CoolingDown { issued_at: DateTime<Utc> },
}

/// Repository trait for OTP code persistence
#[async_trait]
pub trait OtpRepository: Send + Sync {
    /// Store `code` as the only live code for `code.email`, unless the live
    /// code was created after `cooldown_cutoff`
    ///
    /// # Arguments
    /// * `code` - Freshly generated code
    /// * `cooldown_cutoff` - `now - cooldown`; a live code created strictly
    ///   after this instant blocks the issue
    ///
    /// # Returns
    /// * `Ok(IssueOutcome::Issued)` - Code stored, previous codes deleted
    /// * `Ok(IssueOutcome::CoolingDown)` - Existing code left untouched,
    ///   including when a concurrent issue won the race
    /// * `Err(DomainError)` - Storage failure
    async fn issue_if_cooled_down(
        &self,
        code: OtpCode,
        cooldown_cutoff: DateTime<Utc>,
    ) -> Result<IssueOutcome, DomainError>;

    /// Find the live code of an email address
    async fn find_by_email(&self, email: &str) -> Result<Option<OtpCode>, DomainError>;

    /// Increment the attempt counter of a specific issuance
    ///
    /// # Returns
    /// * `Ok(Some(attempts))` - Counter after the increment
    /// * `Ok(None)` - The issuance no longer exists
    async fn record_failed_attempt(&self, email: &str, id: Uuid) -> Result<Option<i32>, DomainError>;

    /// Delete a specific issuance
    ///
    /// # Returns
    /// `true` if this call removed it; a second consume of the same code
    /// returns `false`
    async fn consume(&self, email: &str, id: Uuid) -> Result<bool, DomainError>;

    /// Delete codes with `expires_at <= now`
    async fn purge_expired(&self, now: DateTime<Utc>) -> Result<u64, DomainError>;
}
