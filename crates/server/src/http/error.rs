use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use cbproxy_core::ProxyError;

use super::dto::{ErrorDetail, ErrorResponse};

/// API error type
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub detail: ErrorDetail,
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError {
            status: StatusCode::BAD_REQUEST,
            detail: ErrorDetail::Message(message.into()),
        }
    }

    pub fn not_found() -> Self {
        ApiError {
            status: StatusCode::NOT_FOUND,
            detail: ErrorDetail::Message("Not Found".to_string()),
        }
    }

    pub fn invalid_json() -> Self {
        Self::bad_request("Invalid JSON in request body")
    }

    /// A translated operation failed; the status follows the error mapping
    pub fn operation(err: &ProxyError) -> Self {
        ApiError {
            status: StatusCode::from_u16(err.http_status())
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            detail: ErrorDetail::Operation {
                error: err.to_string(),
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(ErrorResponse {
            detail: self.detail,
        });
        (self.status, body).into_response()
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.detail {
            ErrorDetail::Message(message) | ErrorDetail::Operation { error: message } => {
                write!(f, "API Error {}: {}", self.status.as_u16(), message)
            }
        }
    }
}

impl std::error::Error for ApiError {}
