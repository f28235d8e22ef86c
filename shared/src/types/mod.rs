//! Type definitions module
//!
//! - `language` - Internationalization and language types
//! - `response` - API response payloads

pub mod language;
pub mod response;

pub use language::Language;
pub use response::HealthResponse;
