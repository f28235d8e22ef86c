//! Language and internationalization types

use serde::{Deserialize, Serialize};

/// Language used for user-facing messages
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Language {
    #[default]
    #[serde(rename = "pt")]
    Portuguese,
    #[serde(rename = "en")]
    English,
}

impl Language {
    /// Pick the preferred supported language from an Accept-Language header
    ///
    /// Entries are weighed by their `q` value; unsupported languages are
    /// ignored and Portuguese is the fallback.
    pub fn from_accept_language(header: &str) -> Self {
        let mut preferred = Language::Portuguese;
        let mut best_quality = 0.0_f32;

        for entry in header.split(',') {
            let mut parts = entry.trim().split(';');
            let tag = parts.next().unwrap_or_default().trim().to_lowercase();
            let quality = parts
                .find_map(|p| p.trim().strip_prefix("q="))
                .and_then(|q| q.parse::<f32>().ok())
                .unwrap_or(1.0);

            let candidate = if tag.starts_with("pt") {
                Language::Portuguese
            } else if tag.starts_with("en") {
                Language::English
            } else {
                continue;
            };

            if quality > best_quality {
                preferred = candidate;
                best_quality = quality;
            }
        }

        preferred
    }

    /// Get language code (ISO 639-1)
    pub fn code(&self) -> &'static str {
        match self {
            Language::Portuguese => "pt",
            Language::English => "en",
        }
    }

    /// Get locale code
    pub fn locale(&self) -> &'static str {
        match self {
            Language::Portuguese => "pt-BR",
            Language::English => "en-US",
        }
    }

    /// Choose between a Portuguese and an English message
    pub fn pick<'a>(&self, pt: &'a str, en: &'a str) -> &'a str {
        match self {
            Language::Portuguese => pt,
            Language::English => en,
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_from_header() {
        assert_eq!(Language::from_accept_language("en-US,en;q=0.9"), Language::English);
        assert_eq!(Language::from_accept_language("pt-BR,pt;q=0.9"), Language::Portuguese);
        assert_eq!(Language::from_accept_language("fr-FR"), Language::Portuguese);
        assert_eq!(Language::from_accept_language("EN-GB"), Language::English);
        assert_eq!(
            Language::from_accept_language("en;q=0.4,pt-BR;q=0.8"),
            Language::Portuguese
        );
        assert_eq!(Language::from_accept_language(""), Language::Portuguese);
    }

    #[test]
    fn test_language_properties() {
        assert_eq!(Language::English.locale(), "en-US");
        assert_eq!(Language::Portuguese.code(), "pt");
        assert_eq!(Language::English.pick("sim", "yes"), "yes");
    }
}
