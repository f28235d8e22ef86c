//! HTTP listener and CORS settings

use serde::{Deserialize, Serialize};

const DEFAULT_PORT: u16 = 8080;
const KEEP_ALIVE_SECS: u64 = 75;
/// Manifestation descriptions are capped well below this
const MAX_PAYLOAD_BYTES: usize = 256 * 1024;
const PREFLIGHT_MAX_AGE_SECS: usize = 3600;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,

    /// actix worker count; `0` keeps the actix default of one per core
    #[serde(default)]
    pub workers: usize,

    #[serde(default = "keep_alive_secs")]
    pub keep_alive: u64,

    /// Upper bound for JSON request bodies, in bytes
    #[serde(default = "max_payload_bytes")]
    pub max_payload_size: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self::listen_on("0.0.0.0", DEFAULT_PORT)
    }
}

impl ServerConfig {
    pub fn listen_on(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            workers: 0,
            keep_alive: KEEP_ALIVE_SECS,
            max_payload_size: MAX_PAYLOAD_BYTES,
        }
    }

    /// `host:port` for `HttpServer::bind`
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Browser origins allowed to call the API
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CorsConfig {
    /// Exact origins, or a single `*` for any origin
    #[serde(default)]
    pub allowed_origins: Vec<String>,

    /// Ignored when any origin is allowed
    #[serde(default)]
    pub allow_credentials: bool,

    #[serde(default = "preflight_max_age")]
    pub max_age: usize,
}

impl Default for CorsConfig {
    /// No cross-origin access until origins are configured
    fn default() -> Self {
        Self {
            allowed_origins: Vec::new(),
            allow_credentials: false,
            max_age: PREFLIGHT_MAX_AGE_SECS,
        }
    }
}

impl CorsConfig {
    /// Any origin, no credentials; local frontends only
    pub fn permissive() -> Self {
        Self {
            allowed_origins: vec!["*".to_string()],
            ..Self::default()
        }
    }

    pub fn allows_any_origin(&self) -> bool {
        self.allowed_origins.iter().any(|origin| origin == "*")
    }
}

fn keep_alive_secs() -> u64 {
    KEEP_ALIVE_SECS
}

fn max_payload_bytes() -> usize {
    MAX_PAYLOAD_BYTES
}

fn preflight_max_age() -> usize {
    PREFLIGHT_MAX_AGE_SECS
}
