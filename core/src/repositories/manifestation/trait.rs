//! Manifestation repository trait.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::Manifestation;
use crate::errors::DomainError;

/// Repository trait for manifestation persistence
#[async_trait]
pub trait ManifestationRepository: Send + Sync {
    /// Store a new manifestation
    ///
    /// # Returns
    /// * `Err(DomainError::Conflict)` - The protocol number is already taken
    async fn create(&self, manifestation: Manifestation) -> Result<Manifestation, DomainError>;

    /// Find a manifestation by its protocol number
    async fn find_by_protocol(&self, protocol: &str) -> Result<Option<Manifestation>, DomainError>;

    /// All manifestations filed by a user, newest first
    async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<Manifestation>, DomainError>;
}
