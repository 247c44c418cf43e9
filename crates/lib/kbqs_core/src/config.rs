//! Console configuration.

use thiserror::Error;
use url::Url;

/// Default backend base URL.
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8080";

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid API base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}

/// Where the admin API lives and how to authenticate against it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConsoleConfig {
    /// Backend origin, e.g. `http://localhost:8080`. The admin path is appended.
    pub api_base_url: String,
    /// Bearer token sent with every request, if any.
    pub api_token: Option<String>,
}

impl ConsoleConfig {
    /// Reads configuration from environment variables with sensible defaults.
    ///
    /// | Variable            | Default                 |
    /// |---------------------|-------------------------|
    /// | `KBQS_API_BASE_URL` | `http://localhost:8080` |
    /// | `KBQS_API_TOKEN`    | unset                   |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::new(
            std::env::var("KBQS_API_BASE_URL").unwrap_or_else(|_| DEFAULT_API_BASE_URL.into()),
            std::env::var("KBQS_API_TOKEN")
                .ok()
                .filter(|t| !t.is_empty()),
        )
    }

    /// Build a config, checking that the base URL is an absolute http(s) URL.
    pub fn new(api_base_url: String, api_token: Option<String>) -> Result<Self, ConfigError> {
        let parsed = Url::parse(&api_base_url).map_err(|e| ConfigError::InvalidBaseUrl {
            url: api_base_url.clone(),
            reason: e.to_string(),
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidBaseUrl {
                url: api_base_url,
                reason: format!("unsupported scheme '{}'", parsed.scheme()),
            });
        }
        Ok(Self {
            api_base_url,
            api_token,
        })
    }
}
