//! Wire types for the relay endpoint and the external engine call.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Message for a downstream call that completed with a non-success status.
pub const ENGINE_FAILURE: &str = "Failed to get response from RAG engine.";

/// Message for a downstream call that never produced a response.
pub const ENGINE_UNEXPECTED_FAILURE: &str =
    "Failed to get response from RAG engine. An unexpected error occurred.";

/// Message for a chat request body that could not be read as `{message}`.
pub const INVALID_REQUEST: &str = "Invalid chat request.";

/// Body accepted by `POST {prefix}/chat`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RelayRequest {
    pub message: String,
}

/// Body sent to the external query engine.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ExternalQueryRequest {
    pub query: String,
}

impl From<RelayRequest> for ExternalQueryRequest {
    fn from(request: RelayRequest) -> Self {
        Self {
            query: request.message,
        }
    }
}

/// Uniform failure payload returned by the relay with HTTP 200.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RelayErrorBody {
    pub error: String,
    pub details: Value,
}

impl RelayErrorBody {
    /// The engine answered with a non-success status; `body` is what it sent.
    pub fn downstream(body: Value) -> Self {
        Self {
            error: ENGINE_FAILURE.to_string(),
            details: body,
        }
    }

    /// The engine could not be reached or its response could not be read.
    pub fn unexpected(message: impl Into<String>) -> Self {
        Self {
            error: ENGINE_UNEXPECTED_FAILURE.to_string(),
            details: Value::String(message.into()),
        }
    }

    /// The chat request itself was malformed; nothing was forwarded.
    pub fn invalid_request(reason: impl Into<String>) -> Self {
        Self {
            error: INVALID_REQUEST.to_string(),
            details: Value::String(reason.into()),
        }
    }

    pub fn into_value(self) -> Value {
        serde_json::json!({
            "error": self.error,
            "details": self.details,
        })
    }
}
