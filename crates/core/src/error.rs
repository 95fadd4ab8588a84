//! Error types for the translation core

use std::time::Duration;
use thiserror::Error;

/// Failure while building an exchange client from credentials
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClientInitError {
    #[error("Coinbase client not initialized - check environment variables")]
    MissingCredentials,

    #[error("Failed to initialize Coinbase client: {0}")]
    InvalidKey(String),
}

/// Failure reported by (or while talking to) the upstream exchange
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UpstreamError {
    /// Exchange answered with a non-success HTTP status
    #[error("Coinbase API error {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Signing error: {0}")]
    Signing(String),
}

/// Every failure the translator can hand back to a front end
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProxyError {
    #[error("{0}")]
    Validation(String),

    #[error(transparent)]
    ClientInit(#[from] ClientInitError),

    #[error(transparent)]
    Upstream(#[from] UpstreamError),

    #[error("Endpoint {method} {path} not yet implemented")]
    NotImplemented { method: String, path: String },

    #[error("Unknown method: {0}")]
    UnknownMethod(String),

    #[error("Upstream request timed out after {}s", .0.as_secs())]
    Timeout(Duration),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl ProxyError {
    pub fn validation(message: impl Into<String>) -> Self {
        ProxyError::Validation(message.into())
    }

    pub fn missing_field(field: &str) -> Self {
        ProxyError::Validation(format!("{} is required", field))
    }

    /// Short label used in log lines to tell failure classes apart
    pub fn kind(&self) -> &'static str {
        match self {
            ProxyError::Validation(_) => "validation",
            ProxyError::ClientInit(_) => "client_init",
            ProxyError::Upstream(_) => "upstream",
            ProxyError::NotImplemented { .. } => "not_implemented",
            ProxyError::UnknownMethod(_) => "unknown_method",
            ProxyError::Timeout(_) => "timeout",
            ProxyError::Serialization(_) => "serialization",
        }
    }

    /// HTTP status the proxy endpoint answers with for this error
    pub fn http_status(&self) -> u16 {
        match self {
            ProxyError::Validation(_) => 400,
            ProxyError::Timeout(_) => 504,
            other => status_from_message(&other.to_string()).unwrap_or(500),
        }
    }
}

/// Extract an embedded upstream status from messages like
/// `"Coinbase API error 404: ..."`.
///
/// Only the first `error ` occurrence followed by exactly three digits that
/// form a valid HTTP status (100..=599) counts.
pub fn status_from_message(message: &str) -> Option<u16> {
    message.match_indices("error ").find_map(|(idx, needle)| {
        let rest = &message[idx + needle.len()..];
        let digits: String = rest.chars().take_while(|c| c.is_ascii_digit()).collect();
        if digits.len() != 3 {
            return None;
        }
        digits
            .parse::<u16>()
            .ok()
            .filter(|code| (100..=599).contains(code))
    })
}

pub type ProxyResult<T> = std::result::Result<T, ProxyError>;
