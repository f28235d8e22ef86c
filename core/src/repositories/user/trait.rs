//! User repository trait defining the interface for user data persistence.
//!
//! Email is a unique key when present. Writes keyed by email are atomic
//! upserts so that two concurrent first logins for the same address resolve
//! to one row.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::entities::{User, UserProfile};
use crate::errors::DomainError;

/// Repository trait for User entity persistence operations
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user by their unique identifier
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError>;

    /// Find a user by normalized email
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError>;

    /// Insert a new user
    ///
    /// # Returns
    /// * `Ok(User)` - The stored user
    /// * `Err(DomainError::Conflict)` - The email is already taken
    async fn create(&self, user: User) -> Result<User, DomainError>;

    /// Resolve the user for a freshly verified email, creating it if absent
    /// and marking it verified
    ///
    /// # Returns
    /// * `Ok((User, true))` - A new user was created
    /// * `Ok((User, false))` - An existing user was reused
    async fn upsert_verified_email(
        &self,
        email: &str,
        now: DateTime<Utc>,
    ) -> Result<(User, bool), DomainError>;

    /// Insert a user with `profile`, or overwrite the profile of the user
    /// that already owns `email`
    async fn upsert_profile_by_email(
        &self,
        email: &str,
        profile: UserProfile,
        now: DateTime<Utc>,
    ) -> Result<User, DomainError>;
}
