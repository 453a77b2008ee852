//! External query engine client.
//!
//! The engine is an opaque collaborator reached over HTTP. The relay only
//! knows that it accepts `{query}` and answers with some JSON document.

use crate::types::ExternalQueryRequest;
use reqwest::StatusCode;
use serde_json::Value;
use thiserror::Error;

/// Failure of a single downstream call.
#[derive(Error, Debug)]
pub enum EngineError {
    /// No response was obtained (connection refused, DNS, reset, unreadable body).
    #[error("{0}")]
    Transport(String),

    /// The engine answered with a non-success status.
    #[error("engine responded with status {status}")]
    Status { status: StatusCode, body: Value },
}

/// Trait for query engines the relay can forward to.
#[async_trait::async_trait]
pub trait QueryEngine: Send + Sync {
    /// Endpoint description used in log lines.
    fn endpoint(&self) -> &str;

    /// Forward one query and return the engine's response body.
    async fn process_query(&self, request: &ExternalQueryRequest) -> Result<Value, EngineError>;
}

/// Query engine reached with an HTTP POST to a fixed URL.
pub struct HttpQueryEngine {
    /// Full URL of the engine endpoint
    url: String,

    /// HTTP client
    client: reqwest::Client,
}

impl HttpQueryEngine {
    /// Create a client for the engine at `url`, using reqwest's default timeouts.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            client: reqwest::Client::new(),
        }
    }

    /// Create a client for the engine at `url` with a preconfigured HTTP client.
    pub fn with_client(url: impl Into<String>, client: reqwest::Client) -> Self {
        Self {
            url: url.into(),
            client,
        }
    }
}

#[async_trait::async_trait]
impl QueryEngine for HttpQueryEngine {
    fn endpoint(&self) -> &str {
        &self.url
    }

    async fn process_query(&self, request: &ExternalQueryRequest) -> Result<Value, EngineError> {
        let response = self
            .client
            .post(&self.url)
            .json(request)
            .send()
            .await
            .map_err(|e| EngineError::Transport(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| EngineError::Transport(e.to_string()))?;
        let body = parse_body(&text);

        if !status.is_success() {
            return Err(EngineError::Status { status, body });
        }

        Ok(body)
    }
}

/// Parse a response body as JSON, keeping non-JSON bodies as a JSON string.
pub fn parse_body(text: &str) -> Value {
    serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_body_json() {
        assert_eq!(parse_body(r#"{"detail":"boom"}"#), json!({ "detail": "boom" }));
    }

    #[test]
    fn test_parse_body_plain_text() {
        assert_eq!(
            parse_body("Internal Server Error"),
            Value::String("Internal Server Error".to_string())
        );
    }

    #[test]
    fn test_engine_endpoint() {
        let engine = HttpQueryEngine::new("http://localhost:8000/process_query");
        assert_eq!(engine.endpoint(), "http://localhost:8000/process_query");
    }

    #[tokio::test]
    async fn test_unreachable_engine_is_transport_error() {
        // Bind then release a port so nothing is listening on it
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = reqwest::Client::builder().no_proxy().build().unwrap();
        let engine = HttpQueryEngine::with_client(format!("http://{}/process_query", addr), client);
        let result = engine
            .process_query(&ExternalQueryRequest {
                query: "hello".to_string(),
            })
            .await;

        match result {
            Err(EngineError::Transport(message)) => assert!(!message.is_empty()),
            other => panic!("Expected transport error, got {:?}", other),
        }
    }
}
