//! MySQL implementation of the UserRepository trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::mysql::MySqlRow;
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use ouv_core::domain::entities::{User, UserProfile};
use ouv_core::errors::DomainError;
use ouv_core::repositories::UserRepository;

use super::{column_error, parse_uuid};
use crate::database::{is_unique_violation, storage_error};

const SELECT_USER: &str = r#"
    SELECT id, email, name, needs_accessibility, accessibility_details,
           is_verified, email_verified_at, created_at, updated_at
    FROM users
"#;

/// MySQL implementation of UserRepository
pub struct MySqlUserRepository {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlUserRepository {
    /// Create a new MySQL user repository
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Convert database row to User entity
    fn row_to_user(row: &MySqlRow) -> Result<User, DomainError> {
        let id: String = row.try_get("id").map_err(column_error("id"))?;

        Ok(User {
            id: parse_uuid(&id)?,
            email: row.try_get("email").map_err(column_error("email"))?,
            name: row.try_get("name").map_err(column_error("name"))?,
            needs_accessibility: row
                .try_get("needs_accessibility")
                .map_err(column_error("needs_accessibility"))?,
            accessibility_details: row
                .try_get("accessibility_details")
                .map_err(column_error("accessibility_details"))?,
            is_verified: row.try_get("is_verified").map_err(column_error("is_verified"))?,
            email_verified_at: row
                .try_get("email_verified_at")
                .map_err(column_error("email_verified_at"))?,
            created_at: row.try_get("created_at").map_err(column_error("created_at"))?,
            updated_at: row.try_get("updated_at").map_err(column_error("updated_at"))?,
        })
    }

    /// Re-read a row written by an upsert
    async fn require_by_email(&self, email: &str) -> Result<User, DomainError> {
        self.find_by_email(email)
            .await?
            .ok_or_else(|| DomainError::internal(format!("user row for {} vanished after upsert", email)))
    }
}

#[async_trait]
impl UserRepository for MySqlUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError> {
        let row = sqlx::query(&format!("{} WHERE id = ?", SELECT_USER))
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(storage_error("user_find_by_id"))?;

        row.as_ref().map(Self::row_to_user).transpose()
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let row = sqlx::query(&format!("{} WHERE email = ?", SELECT_USER))
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(storage_error("user_find_by_email"))?;

        row.as_ref().map(Self::row_to_user).transpose()
    }

    async fn create(&self, user: User) -> Result<User, DomainError> {
        let result = sqlx::query(
            r#"
            INSERT INTO users (
                id, email, name, needs_accessibility, accessibility_details,
                is_verified, email_verified_at, created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(user.id.to_string())
        .bind(&user.email)
        .bind(&user.name)
        .bind(user.needs_accessibility)
        .bind(&user.accessibility_details)
        .bind(user.is_verified)
        .bind(user.email_verified_at)
        .bind(user.created_at)
        .bind(user.updated_at)
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(user),
            Err(e) if is_unique_violation(&e) => Err(DomainError::Conflict {
                resource: "user email".to_string(),
            }),
            Err(e) => Err(storage_error("user_create")(e)),
        }
    }

    async fn upsert_verified_email(
        &self,
        email: &str,
        now: DateTime<Utc>,
    ) -> Result<(User, bool), DomainError> {
        // Affected rows: 1 for an insert, 2 for an update that changed the row,
        // 0 for one that changed nothing. `created` below relies on the update
        // branch never reporting 1, so keep `updated_at` in the UPDATE list.
        let result = sqlx::query(
            r#"
            INSERT INTO users (
                id, email, name, needs_accessibility, accessibility_details,
                is_verified, email_verified_at, created_at, updated_at
            ) VALUES (?, ?, NULL, FALSE, NULL, TRUE, ?, ?, ?)
            ON DUPLICATE KEY UPDATE
                is_verified = TRUE,
                email_verified_at = COALESCE(email_verified_at, VALUES(email_verified_at)),
                updated_at = VALUES(updated_at)
            "#,
        )
        .bind(Uuid::new_v4().to_string())
        .bind(email)
        .bind(now)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(storage_error("user_upsert_verified_email"))?;

        let created = result.rows_affected() == 1;
        let user = self.require_by_email(email).await?;
        Ok((user, created))
    }

    async fn upsert_profile_by_email(
        &self,
        email: &str,
        profile: UserProfile,
        now: DateTime<Utc>,
    ) -> Result<User, DomainError> {
        sqlx::query(
            r#"
            INSERT INTO users (
                id, email, name, needs_accessibility, accessibility_details,
                is_verified, email_verified_at, created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, FALSE, NULL, ?, ?)
            ON DUPLICATE KEY UPDATE
                name = VALUES(name),
                needs_accessibility = VALUES(needs_accessibility),
                accessibility_details = VALUES(accessibility_details),
                updated_at = VALUES(updated_at)
            "#,
        )
        .bind(Uuid::new_v4().to_string())
        .bind(email)
        .bind(&profile.name)
        .bind(profile.needs_accessibility)
        .bind(&profile.accessibility_details)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(storage_error("user_upsert_profile"))?;

        self.require_by_email(email).await
    }
}
