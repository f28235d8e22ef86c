//! Mock implementation of UserRepository for testing

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::{User, UserProfile};
use crate::errors::DomainError;

use super::trait_::UserRepository;

/// Mock user repository for testing
#[derive(Clone, Default)]
pub struct MockUserRepository {
    users: Arc<RwLock<HashMap<Uuid, User>>>,
}

impl MockUserRepository {
    /// Create a new mock repository
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn count(&self) -> usize {
        self.users.read().await.len()
    }
}

fn email_taken(users: &HashMap<Uuid, User>, email: &str) -> Option<Uuid> {
    users
        .values()
        .find(|u| u.email.as_deref() == Some(email))
        .map(|u| u.id)
}

#[async_trait]
impl UserRepository for MockUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError> {
        Ok(self.users.read().await.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let users = self.users.read().await;
        Ok(email_taken(&users, email).and_then(|id| users.get(&id).cloned()))
    }

    async fn create(&self, user: User) -> Result<User, DomainError> {
        let mut users = self.users.write().await;

        if let Some(email) = user.email.as_deref() {
            if email_taken(&users, email).is_some() {
                return Err(DomainError::Conflict {
                    resource: "user email".to_string(),
                });
            }
        }

        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn upsert_verified_email(
        &self,
        email: &str,
        now: DateTime<Utc>,
    ) -> Result<(User, bool), DomainError> {
        let mut users = self.users.write().await;

        match email_taken(&users, email).and_then(|id| users.get_mut(&id)) {
            Some(user) => {
                user.mark_verified(now);
                Ok((user.clone(), false))
            }
            None => {
                let user = User::from_verified_email(email, now);
                users.insert(user.id, user.clone());
                Ok((user, true))
            }
        }
    }

    async fn upsert_profile_by_email(
        &self,
        email: &str,
        profile: UserProfile,
        now: DateTime<Utc>,
    ) -> Result<User, DomainError> {
        let mut users = self.users.write().await;

        match email_taken(&users, email).and_then(|id| users.get_mut(&id)) {
            Some(user) => {
                user.apply_profile(profile, now);
                Ok(user.clone())
            }
            None => {
                let user = User::registered(Some(email.to_string()), profile, now);
                users.insert(user.id, user.clone());
                Ok(user)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_upsert_verified_email_creates_once() {
        let repo = MockUserRepository::new();
        let now = Utc::now();

        let (first, created) = repo.upsert_verified_email("a@b.com", now).await.unwrap();
        assert!(created);
        assert!(first.is_verified);

        let (second, created) = repo.upsert_verified_email("a@b.com", now).await.unwrap();
        assert!(!created);
        assert_eq!(first.id, second.id);
        assert_eq!(repo.count().await, 1);
    }

    #[tokio::test]
    async fn test_upsert_profile_updates_in_place() {
        let repo = MockUserRepository::new();
        let now = Utc::now();

        let first = repo
            .upsert_profile_by_email("a@b.com", UserProfile::new(Some("Ana".into()), false, None), now)
            .await
            .unwrap();
        let second = repo
            .upsert_profile_by_email(
                "a@b.com",
                UserProfile::new(Some("Ana Paula".into()), true, Some("libras".into())),
                now,
            )
            .await
            .unwrap();

        assert_eq!(first.id, second.id);
        assert_eq!(second.name.as_deref(), Some("Ana Paula"));
        assert_eq!(repo.count().await, 1);
    }

    #[tokio::test]
    async fn test_create_rejects_duplicate_email_but_allows_anonymous() {
        let repo = MockUserRepository::new();
        let now = Utc::now();

        repo.create(User::from_verified_email("a@b.com", now)).await.unwrap();
        let duplicate = repo.create(User::from_verified_email("a@b.com", now)).await;
        assert!(matches!(duplicate, Err(DomainError::Conflict { .. })));

        repo.create(User::anonymous(UserProfile::default(), now)).await.unwrap();
        repo.create(User::anonymous(UserProfile::default(), now)).await.unwrap();
        assert_eq!(repo.count().await, 3);
    }
}
