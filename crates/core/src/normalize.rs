//! Normalized result shape shared by both front ends

use serde::Serialize;
use serde_json::Value;
use std::fmt;

use crate::error::ProxyError;

/// `{result, id?}` or `{error, id?}`
///
/// `id` is omitted when the caller did not send one. An explicit JSON
/// `null` id (`Some(Value::Null)`) is still written, which is how the stdio
/// loop answers lines it could not parse.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum NormalizedResult {
    Success {
        result: Value,
        #[serde(skip_serializing_if = "Option::is_none")]
        id: Option<Value>,
    },
    Failure {
        error: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        id: Option<Value>,
    },
}

impl NormalizedResult {
    pub fn success(result: Value, id: Option<Value>) -> Self {
        NormalizedResult::Success { result, id }
    }

    pub fn failure(error: impl Into<String>, id: Option<Value>) -> Self {
        NormalizedResult::Failure {
            error: error.into(),
            id,
        }
    }

    /// Wrap a typed operation outcome.
    ///
    /// A result that cannot be rendered as JSON degrades to a failure, so
    /// this never panics.
    pub fn from_outcome<T, E>(outcome: Result<T, E>, id: Option<Value>) -> Self
    where
        T: Serialize,
        E: fmt::Display,
    {
        match outcome.map(|value| to_json(&value)) {
            Ok(Ok(result)) => NormalizedResult::success(result, id),
            Ok(Err(e)) => NormalizedResult::failure(e.to_string(), id),
            Err(e) => NormalizedResult::failure(e.to_string(), id),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, NormalizedResult::Success { .. })
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            NormalizedResult::Failure { error, .. } => Some(error),
            NormalizedResult::Success { .. } => None,
        }
    }

    pub fn id(&self) -> Option<&Value> {
        match self {
            NormalizedResult::Success { id, .. } | NormalizedResult::Failure { id, .. } => {
                id.as_ref()
            }
        }
    }
}

/// Serialize a typed result into a JSON value
pub fn to_json<T: Serialize>(value: &T) -> Result<Value, ProxyError> {
    serde_json::to_value(value).map_err(|e| ProxyError::Serialization(e.to_string()))
}
