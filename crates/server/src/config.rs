//! Environment configuration shared by both binaries

use cbproxy_coinbase::DEFAULT_BASE_URL;
use cbproxy_core::{CredentialOverrides, DEFAULT_UPSTREAM_TIMEOUT};
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8787;

/// Env files read at startup, first match wins per variable
pub const DOTENV_FILES: [&str; 2] = [".env.local", ".env"];

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid value for {name}: {value:?}")]
    InvalidNumber { name: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct ProxyConfig {
    pub host: String,
    pub port: u16,
    /// Per-request info logging
    pub debug: bool,
    /// Fallback credentials for requests that carry none
    pub credentials: CredentialOverrides,
    pub api_url: String,
    pub upstream_timeout: Duration,
}

impl ProxyConfig {
    /// Read the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from any variable source. Empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let port = match var("PORT") {
            Some(raw) => parse_number("PORT", &raw)?,
            None => DEFAULT_PORT,
        };
        let upstream_timeout = match var("UPSTREAM_TIMEOUT_SECS") {
            Some(raw) => Duration::from_secs(parse_number("UPSTREAM_TIMEOUT_SECS", &raw)?),
            None => DEFAULT_UPSTREAM_TIMEOUT,
        };

        Ok(ProxyConfig {
            host: var("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port,
            debug: debug_enabled(lookup("DEBUG_COINBASE").as_deref()),
            credentials: CredentialOverrides::new(
                var("COINBASE_KEY_NAME"),
                var("COINBASE_KEY_ID"),
                var("COINBASE_PRIVATE_KEY"),
            ),
            api_url: var("COINBASE_API_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            upstream_timeout,
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn has_default_credentials(&self) -> bool {
        self.credentials.is_complete()
    }
}

/// Seed the environment from the env files that exist.
///
/// Variables already set in the process are never overwritten. Returns the
/// files that were loaded so callers can log them once tracing is up.
pub fn load_dotenv() -> Vec<&'static str> {
    DOTENV_FILES
        .into_iter()
        .filter(|file| dotenvy::from_filename(file).is_ok())
        .collect()
}

/// `DEBUG_COINBASE`: on when unset, `1` or `true` (any case)
fn debug_enabled(value: Option<&str>) -> bool {
    match value {
        None => true,
        Some(v) => v == "1" || v.eq_ignore_ascii_case("true"),
    }
}

fn parse_number<T: std::str::FromStr>(name: &'static str, raw: &str) -> Result<T, ConfigError> {
    raw.trim().parse().map_err(|_| ConfigError::InvalidNumber {
        name,
        value: raw.to_string(),
    })
}
