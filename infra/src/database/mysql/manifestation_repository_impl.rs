//! MySQL implementation of the ManifestationRepository trait.

use async_trait::async_trait;
use sqlx::mysql::MySqlRow;
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use ouv_core::domain::entities::{Manifestation, ManifestationKind, ManifestationStatus};
use ouv_core::errors::DomainError;
use ouv_core::repositories::ManifestationRepository;

use super::{column_error, parse_uuid};
use crate::database::{is_unique_violation, storage_error};

const SELECT_MANIFESTATION: &str = r#"
    SELECT id, protocol, user_id, kind, subject, description,
           is_anonymous, status, created_at, updated_at
    FROM manifestations
"#;

/// MySQL implementation of ManifestationRepository
pub struct MySqlManifestationRepository {
    pool: MySqlPool,
}

impl MySqlManifestationRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn row_to_manifestation(row: &MySqlRow) -> Result<Manifestation, DomainError> {
        let id: String = row.try_get("id").map_err(column_error("id"))?;
        let user_id: Option<String> = row.try_get("user_id").map_err(column_error("user_id"))?;
        let kind: String = row.try_get("kind").map_err(column_error("kind"))?;
        let status: String = row.try_get("status").map_err(column_error("status"))?;

        Ok(Manifestation {
            id: parse_uuid(&id)?,
            protocol: row.try_get("protocol").map_err(column_error("protocol"))?,
            user_id: user_id.as_deref().map(parse_uuid).transpose()?,
            kind: kind.parse::<ManifestationKind>().map_err(DomainError::internal)?,
            subject: row.try_get("subject").map_err(column_error("subject"))?,
            description: row.try_get("description").map_err(column_error("description"))?,
            is_anonymous: row.try_get("is_anonymous").map_err(column_error("is_anonymous"))?,
            status: status.parse::<ManifestationStatus>().map_err(DomainError::internal)?,
            created_at: row.try_get("created_at").map_err(column_error("created_at"))?,
            updated_at: row.try_get("updated_at").map_err(column_error("updated_at"))?,
        })
    }
}

#[async_trait]
impl ManifestationRepository for MySqlManifestationRepository {
    async fn create(&self, manifestation: Manifestation) -> Result<Manifestation, DomainError> {
        let result = sqlx::query(
            r#"
            INSERT INTO manifestations (
                id, protocol, user_id, kind, subject, description,
                is_anonymous, status, created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(manifestation.id.to_string())
        .bind(&manifestation.protocol)
        .bind(manifestation.user_id.map(|id| id.to_string()))
        .bind(manifestation.kind.as_str())
        .bind(&manifestation.subject)
        .bind(&manifestation.description)
        .bind(manifestation.is_anonymous)
        .bind(manifestation.status.as_str())
        .bind(manifestation.created_at)
        .bind(manifestation.updated_at)
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => {
                tracing::info!(
                    protocol = %manifestation.protocol,
                    kind = %manifestation.kind,
                    anonymous = manifestation.is_anonymous,
                    "Manifestation stored"
                );
                Ok(manifestation)
            }
            Err(e) if is_unique_violation(&e) => Err(DomainError::Conflict {
                resource: "manifestation protocol".to_string(),
            }),
            Err(e) => Err(storage_error("manifestation_create")(e)),
        }
    }

    async fn find_by_protocol(&self, protocol: &str) -> Result<Option<Manifestation>, DomainError> {
        let row = sqlx::query(&format!("{} WHERE protocol = ?", SELECT_MANIFESTATION))
            .bind(protocol)
            .fetch_optional(&self.pool)
            .await
            .map_err(storage_error("manifestation_find_by_protocol"))?;

        row.as_ref().map(Self::row_to_manifestation).transpose()
    }

    async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<Manifestation>, DomainError> {
        let rows = sqlx::query(&format!(
            "{} WHERE user_id = ? ORDER BY created_at DESC",
            SELECT_MANIFESTATION
        ))
        .bind(user_id.to_string())
        .fetch_all(&self.pool)
        .await
        .map_err(storage_error("manifestation_list_by_user"))?;

        rows.iter().map(Self::row_to_manifestation).collect()
    }
}
