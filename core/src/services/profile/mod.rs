//! Citizen profile registration

mod service;

pub use service::{ProfileService, RegisterInput, NAME_MAX_CHARS};
