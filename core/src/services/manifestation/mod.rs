//! Manifestation desk: filing and tracking manifestations

mod service;

pub use service::{ManifestationInput, ManifestationService, MAX_PROTOCOL_RETRIES};
