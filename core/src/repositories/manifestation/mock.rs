//! Mock implementation of ManifestationRepository for testing

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::Manifestation;
use crate::errors::DomainError;

use super::trait_::ManifestationRepository;

/// Mock manifestation repository keyed by protocol
#[derive(Clone, Default)]
pub struct MockManifestationRepository {
    manifestations: Arc<RwLock<HashMap<String, Manifestation>>>,
}

impl MockManifestationRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn count(&self) -> usize {
        self.manifestations.read().await.len()
    }
}

#[async_trait]
impl ManifestationRepository for MockManifestationRepository {
    async fn create(&self, manifestation: Manifestation) -> Result<Manifestation, DomainError> {
        let mut manifestations = self.manifestations.write().await;

        if manifestations.contains_key(&manifestation.protocol) {
            return Err(DomainError::Conflict {
                resource: "manifestation protocol".to_string(),
            });
        }

        manifestations.insert(manifestation.protocol.clone(), manifestation.clone());
        Ok(manifestation)
    }

    async fn find_by_protocol(&self, protocol: &str) -> Result<Option<Manifestation>, DomainError> {
        Ok(self.manifestations.read().await.get(protocol).cloned())
    }

    async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<Manifestation>, DomainError> {
        let manifestations = self.manifestations.read().await;
        let mut owned: Vec<Manifestation> = manifestations
            .values()
            .filter(|m| m.user_id == Some(user_id))
            .cloned()
            .collect();
        owned.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(owned)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{ManifestationKind, NewManifestation};
    use chrono::{Duration, Utc};

    fn sample(user_id: Option<Uuid>, offset_minutes: i64) -> Manifestation {
        Manifestation::receive(
            NewManifestation {
                kind: ManifestationKind::Suggestion,
                subject: "Mais ciclovias".into(),
                description: "Sugiro ampliar a malha cicloviária.".into(),
                is_anonymous: false,
            },
            user_id,
            Utc::now() + Duration::minutes(offset_minutes),
        )
    }

    #[tokio::test]
    async fn test_duplicate_protocol_is_a_conflict() {
        let repo = MockManifestationRepository::new();
        let m = sample(None, 0);

        repo.create(m.clone()).await.unwrap();
        assert!(matches!(repo.create(m).await, Err(DomainError::Conflict { .. })));
    }

    #[tokio::test]
    async fn test_list_by_user_newest_first() {
        let repo = MockManifestationRepository::new();
        let user_id = Uuid::new_v4();

        let older = repo.create(sample(Some(user_id), -10)).await.unwrap();
        let newer = repo.create(sample(Some(user_id), 0)).await.unwrap();
        repo.create(sample(Some(Uuid::new_v4()), 0)).await.unwrap();

        let listed = repo.list_by_user(user_id).await.unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].id, newer.id);
        assert_eq!(listed[1].id, older.id);
    }
}
