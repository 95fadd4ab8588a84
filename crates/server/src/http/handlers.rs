use axum::{Json, body::Bytes, extract::State};
use cbproxy_core::{ClientFactory, ProxyRequest};
use chrono::{SecondsFormat, Utc};
use serde_json::Value;
use std::sync::Arc;

use super::AppState;
use super::dto::{HealthResponse, SERVICE_NAME, ServiceInfo};
use super::error::ApiError;

/// POST /proxy
pub async fn proxy<F: ClientFactory + 'static>(
    State(state): State<Arc<AppState<F>>>,
    body: Bytes,
) -> Result<Json<Value>, ApiError> {
    let request = parse_proxy_request(&body)?;

    let prepared = state
        .translator
        .prepare(request)
        .map_err(|e| ApiError::bad_request(e.to_string()))?;

    state
        .translator
        .dispatch(prepared)
        .await
        .map(Json)
        .map_err(|e| ApiError::operation(&e))
}

/// GET /health
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true),
    })
}

/// GET /
pub async fn root() -> Json<ServiceInfo> {
    Json(ServiceInfo {
        message: SERVICE_NAME,
        version: env!("CARGO_PKG_VERSION"),
        endpoints: vec!["/proxy", "/health"],
    })
}

pub async fn not_found() -> ApiError {
    ApiError::not_found()
}

/// Parse the body ourselves so malformed JSON gets the proxy's own message
/// instead of the extractor rejection.
fn parse_proxy_request(body: &[u8]) -> Result<ProxyRequest, ApiError> {
    let value: Value = serde_json::from_slice(body).map_err(|_| ApiError::invalid_json())?;
    serde_json::from_value(value)
        .map_err(|e| ApiError::bad_request(format!("Invalid request body: {}", e)))
}
