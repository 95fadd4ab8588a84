use serde::Serialize;

pub const SERVICE_NAME: &str = "Coinbase Advanced Trade API Backend";

/// GET /health
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub timestamp: String,
}

/// GET /
#[derive(Debug, Serialize)]
pub struct ServiceInfo {
    pub message: &'static str,
    pub version: &'static str,
    pub endpoints: Vec<&'static str>,
}

/// Error body: `{"detail": ...}`
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub detail: ErrorDetail,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ErrorDetail {
    /// Request was rejected before reaching the exchange
    Message(String),
    /// Operation failed; same shape as a normalized error result
    Operation { error: String },
}
