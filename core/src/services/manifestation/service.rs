//! Manifestation desk service

use std::sync::Arc;
use uuid::Uuid;

use ouv_shared::validation::{char_len, sanitize_input};

use crate::domain::entities::{
    Manifestation, ManifestationKind, NewManifestation, DESCRIPTION_MAX_CHARS,
    DESCRIPTION_MIN_CHARS, SUBJECT_MAX_CHARS, SUBJECT_MIN_CHARS,
};
use crate::errors::{DomainError, DomainResult, ValidationError};
use crate::repositories::ManifestationRepository;
use crate::services::clock::Clock;

/// Fresh protocol draws after the first one collides
pub const MAX_PROTOCOL_RETRIES: usize = 3;

/// Raw manifestation data as received from a client
#[derive(Debug, Clone)]
pub struct ManifestationInput {
    pub kind: String,
    pub subject: String,
    pub description: String,
    pub is_anonymous: bool,
}

/// Service for filing and tracking manifestations
pub struct ManifestationService<M: ManifestationRepository> {
    repository: Arc<M>,
    clock: Arc<dyn Clock>,
}

impl<M: ManifestationRepository> ManifestationService<M> {
    pub fn new(repository: Arc<M>, clock: Arc<dyn Clock>) -> Self {
        Self { repository, clock }
    }

    /// Validate and file a manifestation
    ///
    /// # Arguments
    ///
    /// * `input` - Raw fields from the client
    /// * `user_id` - Authenticated author, ignored for anonymous filings
    ///
    /// # Returns
    ///
    /// * `Ok(Manifestation)` - Stored with status `received` and a fresh protocol
    /// * `Err(DomainError::ValidationErr)` - Unknown kind or bad field length
    /// * `Err(DomainError::Conflict)` - Every protocol drawn was already taken
    pub async fn submit(
        &self,
        input: ManifestationInput,
        user_id: Option<Uuid>,
    ) -> DomainResult<Manifestation> {
        let new = Self::validate(input)?;
        let mut manifestation = Manifestation::receive(new, user_id, self.clock.now());

        for attempt in 0..=MAX_PROTOCOL_RETRIES {
            match self.repository.create(manifestation.clone()).await {
                Ok(stored) => {
                    tracing::info!(
                        protocol = %stored.protocol,
                        kind = %stored.kind,
                        anonymous = stored.is_anonymous,
                        event = "manifestation_received",
                        "Manifestation filed"
                    );
                    return Ok(stored);
                }
                Err(DomainError::Conflict { .. }) => {
                    tracing::warn!(
                        attempt,
                        protocol = %manifestation.protocol,
                        event = "protocol_collision",
                        "Protocol number already taken, drawing another"
                    );
                    manifestation.regenerate_protocol();
                }
                Err(e) => return Err(e),
            }
        }

        tracing::error!(event = "protocol_exhausted", "No free protocol number after retries");
        Err(DomainError::Conflict {
            resource: "manifestation protocol".to_string(),
        })
    }

    /// Look up a manifestation by protocol number
    pub async fn track(&self, protocol: &str) -> DomainResult<Manifestation> {
        let protocol = protocol.trim();
        if !Manifestation::is_valid_protocol(protocol) {
            return Err(ValidationError::invalid_format("protocol").into());
        }

        self.repository
            .find_by_protocol(protocol)
            .await?
            .ok_or_else(|| DomainError::not_found("manifestation"))
    }

    /// Manifestations filed by a user, newest first
    pub async fn list_for_user(&self, user_id: Uuid) -> DomainResult<Vec<Manifestation>> {
        self.repository.list_by_user(user_id).await
    }

    fn validate(input: ManifestationInput) -> Result<NewManifestation, ValidationError> {
        let kind: ManifestationKind = input
            .kind
            .parse()
            .map_err(|_| ValidationError::invalid_format("kind"))?;

        let subject = sanitize_input(&input.subject);
        check_length("subject", &subject, SUBJECT_MIN_CHARS, SUBJECT_MAX_CHARS)?;

        let description = sanitize_input(&input.description);
        check_length(
            "description",
            &description,
            DESCRIPTION_MIN_CHARS,
            DESCRIPTION_MAX_CHARS,
        )?;

        Ok(NewManifestation {
            kind,
            subject,
            description,
            is_anonymous: input.is_anonymous,
        })
    }
}

fn check_length(field: &str, value: &str, min: usize, max: usize) -> Result<(), ValidationError> {
    let actual = char_len(value);
    if actual == 0 {
        return Err(ValidationError::required(field));
    }
    if actual < min || actual > max {
        return Err(ValidationError::InvalidLength {
            field: field.to_string(),
            min,
            max,
            actual,
        });
    }
    Ok(())
}
