//! Manifestation entity: a complaint, report, compliment, suggestion or
//! request filed with the ombudsman office.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use rand::{rngs::OsRng, Rng};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Subject length bounds, in characters
pub const SUBJECT_MIN_CHARS: usize = 3;
pub const SUBJECT_MAX_CHARS: usize = 200;

/// Description length bounds, in characters
pub const DESCRIPTION_MIN_CHARS: usize = 10;
pub const DESCRIPTION_MAX_CHARS: usize = 5000;

/// Kind of manifestation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ManifestationKind {
    /// Reclamação
    Complaint,
    /// Denúncia
    Report,
    /// Elogio
    Compliment,
    /// Sugestão
    Suggestion,
    /// Solicitação
    Request,
}

impl ManifestationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ManifestationKind::Complaint => "complaint",
            ManifestationKind::Report => "report",
            ManifestationKind::Compliment => "compliment",
            ManifestationKind::Suggestion => "suggestion",
            ManifestationKind::Request => "request",
        }
    }
}

impl fmt::Display for ManifestationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ManifestationKind {
    type Err = String;

    /// Accepts both the English identifiers and the Portuguese names
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "complaint" | "reclamacao" | "reclamação" => Ok(ManifestationKind::Complaint),
            "report" | "denuncia" | "denúncia" => Ok(ManifestationKind::Report),
            "compliment" | "elogio" => Ok(ManifestationKind::Compliment),
            "suggestion" | "sugestao" | "sugestão" => Ok(ManifestationKind::Suggestion),
            "request" | "solicitacao" | "solicitação" => Ok(ManifestationKind::Request),
            other => Err(format!("unknown manifestation kind: {}", other)),
        }
    }
}

/// Processing status of a manifestation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ManifestationStatus {
    #[default]
    Received,
    InAnalysis,
    Answered,
    Closed,
}

impl ManifestationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ManifestationStatus::Received => "received",
            ManifestationStatus::InAnalysis => "in_analysis",
            ManifestationStatus::Answered => "answered",
            ManifestationStatus::Closed => "closed",
        }
    }
}

impl fmt::Display for ManifestationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ManifestationStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "received" => Ok(ManifestationStatus::Received),
            "in_analysis" => Ok(ManifestationStatus::InAnalysis),
            "answered" => Ok(ManifestationStatus::Answered),
            "closed" => Ok(ManifestationStatus::Closed),
            other => Err(format!("unknown manifestation status: {}", other)),
        }
    }
}

/// Validated input for a new manifestation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewManifestation {
    pub kind: ManifestationKind,
    pub subject: String,
    pub description: String,
    pub is_anonymous: bool,
}

/// A manifestation as stored
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifestation {
    pub id: Uuid,

    /// Human-readable tracking number, `YYYYMMDD-NNNNNN`
    pub protocol: String,

    /// Author, never set for anonymous manifestations
    pub user_id: Option<Uuid>,

    pub kind: ManifestationKind,
    pub subject: String,
    pub description: String,
    pub is_anonymous: bool,
    pub status: ManifestationStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Manifestation {
    /// Builds a freshly received manifestation with a new protocol number
    pub fn receive(input: NewManifestation, user_id: Option<Uuid>, now: DateTime<Utc>) -> Self {
        let user_id = if input.is_anonymous { None } else { user_id };

        Self {
            id: Uuid::new_v4(),
            protocol: Self::generate_protocol(now),
            user_id,
            kind: input.kind,
            subject: input.subject,
            description: input.description,
            is_anonymous: input.is_anonymous,
            status: ManifestationStatus::Received,
            created_at: now,
            updated_at: now,
        }
    }

    /// UTC date of `now` followed by six random digits
    pub fn generate_protocol(now: DateTime<Utc>) -> String {
        let serial: u32 = OsRng.gen_range(0..1_000_000);
        format!("{}-{:06}", now.format("%Y%m%d"), serial)
    }

    /// Draws a new protocol number, used after a collision
    pub fn regenerate_protocol(&mut self) {
        self.protocol = Self::generate_protocol(self.created_at);
    }

    /// Syntax check for a protocol number supplied by a citizen
    pub fn is_valid_protocol(protocol: &str) -> bool {
        let bytes = protocol.as_bytes();
        bytes.len() == 15
            && bytes[8] == b'-'
            && bytes
                .iter()
                .enumerate()
                .all(|(i, b)| i == 8 || b.is_ascii_digit())
    }
}
