//! Relay client used by the chat UI.

use crate::error::ChatError;
use crate::reply::RelayReply;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Body posted to the relay chat endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RelayRequest {
    pub message: String,
}

/// Trait for transports that deliver a question to the relay.
#[async_trait::async_trait]
pub trait RelayClient: Send + Sync {
    /// Send one request and interpret the response.
    async fn send(&self, request: &RelayRequest) -> Result<RelayReply, ChatError>;
}

/// Relay client speaking JSON over HTTP.
pub struct HttpRelayClient {
    /// Full URL of the chat endpoint, e.g. `http://localhost:3001/api/chat`
    url: String,

    /// HTTP client
    client: reqwest::Client,
}

impl HttpRelayClient {
    pub fn new(url: impl Into<String>) -> Self {
        Self::with_client(url, reqwest::Client::new())
    }

    /// Create a client with a preconfigured HTTP client.
    pub fn with_client(url: impl Into<String>, client: reqwest::Client) -> Self {
        Self {
            url: url.into(),
            client,
        }
    }
}

#[async_trait::async_trait]
impl RelayClient for HttpRelayClient {
    async fn send(&self, request: &RelayRequest) -> Result<RelayReply, ChatError> {
        tracing::debug!(url = %self.url, "Posting question to relay");

        let response = self
            .client
            .post(&self.url)
            .json(request)
            .send()
            .await
            .map_err(|e| ChatError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(ChatError::Status {
                status: status.as_u16(),
                message: status_message(status.as_u16(), &text),
            });
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| ChatError::Decode(e.to_string()))?;

        RelayReply::from_value(&body)
    }
}

/// Banner text for a non-success response: the body's `message` if it has
/// one, otherwise `Error: <status>`.
fn status_message(status: u16, body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|value| {
            value
                .get("message")
                .and_then(Value::as_str)
                .filter(|message| !message.is_empty())
                .map(str::to_string)
        })
        .unwrap_or_else(|| format!("Error: {}", status))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use axum::routing::post;
    use axum::{Json, Router};
    use serde_json::json;

    async fn spawn_relay(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}/api/chat", addr)
    }

    fn client_for(url: String) -> HttpRelayClient {
        let client = reqwest::Client::builder().no_proxy().build().unwrap();
        HttpRelayClient::with_client(url, client)
    }

    fn question(message: &str) -> RelayRequest {
        RelayRequest {
            message: message.to_string(),
        }
    }

    #[test]
    fn test_status_message() {
        assert_eq!(
            status_message(400, r#"{"message":"message should not be empty"}"#),
            "message should not be empty"
        );
        assert_eq!(status_message(502, "Bad Gateway"), "Error: 502");
        assert_eq!(status_message(500, r#"{"message":""}"#), "Error: 500");
    }

    #[tokio::test]
    async fn test_send_success() {
        let url = spawn_relay(Router::new().route(
            "/api/chat",
            post(|Json(body): Json<Value>| async move {
                Json(json!({ "answer": format!("echo {}", body["message"].as_str().unwrap_or("")), "sources": [] }))
            }),
        ))
        .await;

        let reply = client_for(url).send(&question("hi")).await.unwrap();
        assert_eq!(reply.answer, "echo hi");
        assert!(reply.sources.is_empty());
    }

    #[tokio::test]
    async fn test_send_error_status_with_message() {
        let url = spawn_relay(Router::new().route(
            "/api/chat",
            post(|| async {
                (
                    StatusCode::BAD_REQUEST,
                    Json(json!({ "message": "message must be a string" })),
                )
            }),
        ))
        .await;

        let err = client_for(url).send(&question("hi")).await.unwrap_err();
        assert_eq!(
            err,
            ChatError::Status {
                status: 400,
                message: "message must be a string".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_send_error_status_without_message() {
        let url = spawn_relay(Router::new().route(
            "/api/chat",
            post(|| async { StatusCode::SERVICE_UNAVAILABLE }),
        ))
        .await;

        let err = client_for(url).send(&question("hi")).await.unwrap_err();
        assert_eq!(err.to_string(), "Error: 503");
    }

    #[tokio::test]
    async fn test_send_non_json_body() {
        let url = spawn_relay(Router::new().route("/api/chat", post(|| async { "not json" }))).await;

        let err = client_for(url).send(&question("hi")).await.unwrap_err();
        assert!(matches!(err, ChatError::Decode(_)));
    }

    #[tokio::test]
    async fn test_send_unreachable() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = client_for(format!("http://{}/api/chat", addr))
            .send(&question("hi"))
            .await
            .unwrap_err();
        assert!(matches!(err, ChatError::Transport(_)));
    }
}
