//! Input sanitization and email helpers
//!
//! Everything a citizen types passes through [`sanitize_input`] before it is
//! stored or used as a lookup key.

use once_cell::sync::Lazy;
use regex::Regex;

static SCRIPT_BLOCK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)<\s*(script|style)\b[^>]*>.*?<\s*/\s*(script|style)\s*>")
        .expect("script pattern is valid")
});

static HTML_TAG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)<[^>]*>").expect("tag pattern is valid"));

static EMAIL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-z0-9](?:[a-z0-9-]{0,61}[a-z0-9])?(?:\.[a-z0-9](?:[a-z0-9-]{0,61}[a-z0-9])?)+$")
        .expect("email pattern is valid")
});

/// Maximum length of an email address (RFC 5321)
pub const MAX_EMAIL_LENGTH: usize = 254;

/// Strip `<script>`/`<style>` blocks and any remaining HTML tags, then trim
pub fn sanitize_input(input: &str) -> String {
    let without_scripts = SCRIPT_BLOCK.replace_all(input, "");
    let without_tags = HTML_TAG.replace_all(&without_scripts, "");
    without_tags.trim().to_string()
}

/// Sanitize and lower-case an email address for use as a lookup key
pub fn normalize_email(input: &str) -> String {
    sanitize_input(input).to_lowercase()
}

/// Syntax check for an already normalized email address
pub fn is_valid_email(email: &str) -> bool {
    !email.is_empty() && email.len() <= MAX_EMAIL_LENGTH && EMAIL.is_match(email)
}

/// Mask an email address for logging: `maria@gov.br` -> `m***@gov.br`
pub fn mask_email(email: &str) -> String {
    match email.split_once('@') {
        Some((local, domain)) => {
            let first = local.chars().next().map(String::from).unwrap_or_default();
            format!("{}***@{}", first, domain)
        }
        None => "***".to_string(),
    }
}

/// Length of a string in characters rather than bytes
pub fn char_len(value: &str) -> usize {
    value.chars().count()
}
