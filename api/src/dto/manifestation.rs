use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use ouv_core::{Manifestation, ManifestationInput, ManifestationKind, ManifestationStatus};

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SubmitManifestationRequest {
    /// `complaint`, `report`, `compliment`, `suggestion` or `request`
    /// (Portuguese names are accepted too)
    #[validate(length(min = 1, max = 32))]
    pub kind: String,

    #[validate(length(max = 200))]
    pub subject: String,

    #[validate(length(max = 5000))]
    pub description: String,

    #[serde(default)]
    pub is_anonymous: bool,
}

impl From<SubmitManifestationRequest> for ManifestationInput {
    fn from(request: SubmitManifestationRequest) -> Self {
        Self {
            kind: request.kind,
            subject: request.subject,
            description: request.description,
            is_anonymous: request.is_anonymous,
        }
    }
}

/// Public view of a manifestation; the author is never exposed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManifestationResponse {
    pub id: Uuid,
    pub protocol: String,
    pub kind: ManifestationKind,
    pub subject: String,
    pub description: String,
    pub is_anonymous: bool,
    pub status: ManifestationStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Manifestation> for ManifestationResponse {
    fn from(m: Manifestation) -> Self {
        Self {
            id: m.id,
            protocol: m.protocol,
            kind: m.kind,
            subject: m.subject,
            description: m.description,
            is_anonymous: m.is_anonymous,
            status: m.status,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}
