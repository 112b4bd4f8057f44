// web_app/config.rs - Process configuration
//
// Everything the server needs is read once at startup from the
// environment (a `.env` file is honoured through dotenv) and handed to
// the components that need it. Nothing reads the environment later.

use std::env;
use std::time::Duration;

use reqwest::Url;
use thiserror::Error;

pub const DEFAULT_UPSTREAM_URL: &str = "https://sevenfiftyproducts-b8e9.restdb.io/rest";
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";
pub const DEFAULT_UPSTREAM_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("{name} is not a valid URL: {reason}")]
    InvalidUrl { name: &'static str, reason: String },
    #[error("{name} must be a positive integer, got {value:?}")]
    InvalidNumber { name: &'static str, value: String },
}

/// Upstream API key. Never printed.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("ApiKey(<redacted>)")
    }
}

/// Settings for the upstream REST database client
#[derive(Clone, Debug)]
pub struct UpstreamConfig {
    pub base_url: Url,
    pub api_key: ApiKey,
    pub timeout: Duration,
}

/// Full server configuration
#[derive(Clone, Debug)]
pub struct AppConfig {
    pub bind_addr: String,
    pub upstream: UpstreamConfig,
}

impl AppConfig {
    /// Load `.env` (if any) and read the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build from an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup("API_KEY")
            .filter(|key| !key.trim().is_empty())
            .ok_or(ConfigError::Missing("API_KEY"))?;

        let upstream_url = lookup("UPSTREAM_URL").unwrap_or_else(|| DEFAULT_UPSTREAM_URL.to_string());
        let base_url = Url::parse(&upstream_url).map_err(|e| ConfigError::InvalidUrl {
            name: "UPSTREAM_URL",
            reason: e.to_string(),
        })?;

        let timeout_secs = match lookup("UPSTREAM_TIMEOUT_SECS") {
            None => DEFAULT_UPSTREAM_TIMEOUT_SECS,
            Some(value) => match value.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => secs,
                _ => {
                    return Err(ConfigError::InvalidNumber {
                        name: "UPSTREAM_TIMEOUT_SECS",
                        value,
                    })
                }
            },
        };

        Ok(Self {
            bind_addr: lookup("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string()),
            upstream: UpstreamConfig {
                base_url,
                api_key: ApiKey::new(api_key),
                timeout: Duration::from_secs(timeout_secs),
            },
        })
    }
}
