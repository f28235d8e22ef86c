//! MySQL implementation of the OtpRepository trait.
//!
//! `otp_codes.email` carries a unique key, so the table can never hold two
//! live codes for one address. Issuing runs in a transaction that locks the
//! address's row before deciding on the cooldown.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::mysql::MySqlRow;
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use ouv_core::domain::entities::OtpCode;
use ouv_core::errors::DomainError;
use ouv_core::repositories::{IssueOutcome, OtpRepository};
use ouv_shared::validation::mask_email;

use super::{column_error, parse_uuid};
use crate::database::{is_lock_conflict, is_unique_violation, storage_error};

/// MySQL implementation of OtpRepository
pub struct MySqlOtpRepository {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlOtpRepository {
    /// Create a new MySQL OTP repository
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Convert database row to OtpCode entity
    fn row_to_otp(row: &MySqlRow) -> Result<OtpCode, DomainError> {
        let id: String = row.try_get("id").map_err(column_error("id"))?;

        Ok(OtpCode {
            id: parse_uuid(&id)?,
            email: row.try_get("email").map_err(column_error("email"))?,
            code: row.try_get("code").map_err(column_error("code"))?,
            attempts: row.try_get("attempts").map_err(column_error("attempts"))?,
            created_at: row.try_get("created_at").map_err(column_error("created_at"))?,
            expires_at: row.try_get("expires_at").map_err(column_error("expires_at"))?,
        })
    }

    /// Issue time of the live code, read outside any transaction
    async fn live_issued_at(&self, email: &str) -> Result<Option<DateTime<Utc>>, DomainError> {
        sqlx::query_scalar("SELECT created_at FROM otp_codes WHERE email = ?")
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(storage_error("otp_live_issued_at"))
    }

    /// A concurrent issue for the same address won; report its cooldown
    async fn lost_race(&self, code: &OtpCode) -> Result<IssueOutcome, DomainError> {
        tracing::info!(
            email = %mask_email(&code.email),
            event = "otp_issue_race_lost",
            "Concurrent code issue detected, treating as cooldown"
        );
        let issued_at = self.live_issued_at(&code.email).await?.unwrap_or(code.created_at);
        Ok(IssueOutcome::CoolingDown { issued_at })
    }
}

#[async_trait]
impl OtpRepository for MySqlOtpRepository {
    async fn issue_if_cooled_down(
        &self,
        code: OtpCode,
        cooldown_cutoff: DateTime<Utc>,
    ) -> Result<IssueOutcome, DomainError> {
        let mut tx = self.pool.begin().await.map_err(storage_error("otp_begin"))?;

        let locked: Result<Option<DateTime<Utc>>, sqlx::Error> =
            sqlx::query_scalar("SELECT created_at FROM otp_codes WHERE email = ? FOR UPDATE")
                .bind(&code.email)
                .fetch_optional(&mut *tx)
                .await;

        let existing = match locked {
            Ok(existing) => existing,
            Err(e) if is_lock_conflict(&e) => {
                drop(tx);
                return self.lost_race(&code).await;
            }
            Err(e) => return Err(storage_error("otp_lock")(e)),
        };

        if let Some(issued_at) = existing {
            if issued_at > cooldown_cutoff {
                tx.rollback().await.map_err(storage_error("otp_rollback"))?;
                return Ok(IssueOutcome::CoolingDown { issued_at });
            }
        }

        sqlx::query("DELETE FROM otp_codes WHERE email = ?")
            .bind(&code.email)
            .execute(&mut *tx)
            .await
            .map_err(storage_error("otp_delete_previous"))?;

        let inserted = sqlx::query(
            r#"
            INSERT INTO otp_codes (id, email, code, attempts, created_at, expires_at)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(code.id.to_string())
        .bind(&code.email)
        .bind(&code.code)
        .bind(code.attempts)
        .bind(code.created_at)
        .bind(code.expires_at)
        .execute(&mut *tx)
        .await;

        match inserted {
            Ok(_) => {}
            Err(e) if is_unique_violation(&e) || is_lock_conflict(&e) => {
                drop(tx);
                return self.lost_race(&code).await;
            }
            Err(e) => return Err(storage_error("otp_insert")(e)),
        }

        tx.commit().await.map_err(storage_error("otp_commit"))?;
        Ok(IssueOutcome::Issued(code))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<OtpCode>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT id, email, code, attempts, created_at, expires_at
            FROM otp_codes
            WHERE email = ?
            LIMIT 1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(storage_error("otp_find_by_email"))?;

        row.as_ref().map(Self::row_to_otp).transpose()
    }

    async fn record_failed_attempt(&self, email: &str, id: Uuid) -> Result<Option<i32>, DomainError> {
        let result = sqlx::query("UPDATE otp_codes SET attempts = attempts + 1 WHERE email = ? AND id = ?")
            .bind(email)
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(storage_error("otp_record_attempt"))?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }

        sqlx::query_scalar("SELECT attempts FROM otp_codes WHERE email = ? AND id = ?")
            .bind(email)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(storage_error("otp_read_attempts"))
    }

    async fn consume(&self, email: &str, id: Uuid) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM otp_codes WHERE email = ? AND id = ?")
            .bind(email)
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(storage_error("otp_consume"))?;

        Ok(result.rows_affected() == 1)
    }

    async fn purge_expired(&self, now: DateTime<Utc>) -> Result<u64, DomainError> {
        let result = sqlx::query("DELETE FROM otp_codes WHERE expires_at <= ?")
            .bind(now)
            .execute(&self.pool)
            .await
            .map_err(storage_error("otp_purge_expired"))?;

        Ok(result.rows_affected())
    }
}
