//! Transactional email configuration

use serde::{Deserialize, Serialize};

/// Supported email delivery providers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EmailProvider {
    /// Resend HTTP API
    Resend,
    /// Logs messages instead of delivering them
    Mock,
}

impl std::fmt::Display for EmailProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EmailProvider::Resend => write!(f, "resend"),
            EmailProvider::Mock => write!(f, "mock"),
        }
    }
}

/// Email delivery configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EmailConfig {
    /// Provider used to deliver messages
    pub provider: EmailProvider,

    /// Provider API key
    #[serde(default)]
    pub api_key: Option<String>,

    /// Provider endpoint for sending a message
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Sender address
    pub from_address: String,

    /// Sender display name
    #[serde(default = "default_from_name")]
    pub from_name: String,

    /// Timeout for provider requests in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            provider: EmailProvider::Resend,
            api_key: None,
            api_url: default_api_url(),
            from_address: String::from("nao-responda@ouvidoria.gov.br"),
            from_name: default_from_name(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

impl EmailConfig {
    /// Configuration for the logging-only provider
    pub fn mock() -> Self {
        Self {
            provider: EmailProvider::Mock,
            ..Default::default()
        }
    }

    /// `From` header value, e.g. `Ouvidoria <nao-responda@ouvidoria.gov.br>`
    pub fn sender(&self) -> String {
        if self.from_name.is_empty() {
            self.from_address.clone()
        } else {
            format!("{} <{}>", self.from_name, self.from_address)
        }
    }
}

fn default_api_url() -> String {
    String::from("https://api.resend.com/emails")
}

fn default_from_name() -> String {
    String::from("Ouvidoria")
}

fn default_request_timeout() -> u64 {
    10
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sender_header() {
        let config = EmailConfig::default();
        assert_eq!(config.sender(), "Ouvidoria <nao-responda@ouvidoria.gov.br>");

        let config = EmailConfig {
            from_name: String::new(),
            ..EmailConfig::default()
        };
        assert_eq!(config.sender(), "nao-responda@ouvidoria.gov.br");
    }

    #[test]
    fn test_provider_serialization() {
        assert_eq!(serde_json::to_string(&EmailProvider::Mock).unwrap(), "\"mock\"");
        assert_eq!(
            serde_json::from_str::<EmailProvider>("\"resend\"").unwrap(),
            EmailProvider::Resend
        );
    }
}
