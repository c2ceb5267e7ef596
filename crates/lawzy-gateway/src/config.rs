//! Backend connection configuration.
//!
//! The base URL has no default: a missing or unparsable value is a startup
//! error, never a silent fallback to localhost. The binary reads
//! `LAWZY_BACKEND_URL` and `LAWZY_TIMEOUT_SECS` through its argument parser
//! and hands the raw values to [`GatewayConfig::new`].

use url::Url;

pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Backend root, always normalised to end with `/`.
    pub base_url: Url,
    /// Transport timeout applied to every request.
    pub timeout_secs: u64,
}

impl GatewayConfig {
    pub fn new(base_url: &str, timeout_secs: u64) -> Result<Self, ConfigError> {
        Ok(Self {
            base_url: parse_base_url(base_url)?,
            timeout_secs,
        })
    }
}

fn parse_base_url(raw: &str) -> Result<Url, ConfigError> {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return Err(ConfigError::MissingBaseUrl);
    }
    Url::parse(&format!("{trimmed}/"))
        .map_err(|e| ConfigError::InvalidUrl(raw.to_string(), e.to_string()))
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("backend URL is required (set LAWZY_BACKEND_URL or pass --backend-url)")]
    MissingBaseUrl,
    #[error("invalid backend URL {0:?}: {1}")]
    InvalidUrl(String, String),
    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}
