//! In-memory OtpRepository for tests and local development

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::OtpCode;
use crate::errors::DomainError;

use super::trait_::{IssueOutcome, OtpRepository};

/// Mock OTP repository keyed by email
///
/// The write lock held across check and insert mirrors the row lock taken by
/// the SQL implementation.
#[derive(Clone, Default)]
pub struct MockOtpRepository {
    codes: Arc<RwLock<HashMap<String, OtpCode>>>,
}

impl MockOtpRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live codes across all addresses
    pub async fn count(&self) -> usize {
        self.codes.read().await.len()
    }

    /// Insert a code directly, bypassing the cooldown
    pub async fn insert(&self, code: OtpCode) {
        self.codes.write().await.insert(code.email.clone(), code);
    }
}

#[async_trait]
impl OtpRepository for MockOtpRepository {
    async fn issue_if_cooled_down(
        &self,
        code: OtpCode,
        cooldown_cutoff: DateTime<Utc>,
    ) -> Result<IssueOutcome, DomainError> {
        let mut codes = self.codes.write().await;

        if let Some(existing) = codes.get(&code.email) {
            if existing.created_at > cooldown_cutoff {
                return Ok(IssueOutcome::CoolingDown {
                    issued_at: existing.created_at,
                });
            }
        }

        codes.insert(code.email.clone(), code.clone());
        Ok(IssueOutcome::Issued(code))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<OtpCode>, DomainError> {
        Ok(self.codes.read().await.get(email).cloned())
    }

    async fn record_failed_attempt(&self, email: &str, id: Uuid) -> Result<Option<i32>, DomainError> {
        let mut codes = self.codes.write().await;
        Ok(codes.get_mut(email).filter(|c| c.id == id).map(|c| {
            c.attempts += 1;
            c.attempts
        }))
    }

    async fn consume(&self, email: &str, id: Uuid) -> Result<bool, DomainError> {
        let mut codes = self.codes.write().await;
        if codes.get(email).map(|c| c.id) == Some(id) {
            codes.remove(email);
            return Ok(true);
        }
        Ok(false)
    }

    async fn purge_expired(&self, now: DateTime<Utc>) -> Result<u64, DomainError> {
        let mut codes = self.codes.write().await;
        let before = codes.len();
        codes.retain(|_, c| !c.is_expired_at(now));
        Ok((before - codes.len()) as u64)
    }
}
