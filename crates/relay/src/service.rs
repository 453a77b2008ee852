//! Chat relay service.
//!
//! Forwards one chat message to the query engine and turns every outcome
//! into a JSON value. Failures never escape as errors: they are reported in
//! the body so the caller always sees the same shape.

use crate::engine::{EngineError, QueryEngine};
use crate::types::{ExternalQueryRequest, RelayErrorBody, RelayRequest};
use serde_json::Value;
use std::sync::Arc;

/// Stateless relay between the chat endpoint and the query engine.
#[derive(Clone)]
pub struct ChatService {
    engine: Arc<dyn QueryEngine>,
}

impl ChatService {
    pub fn new(engine: Arc<dyn QueryEngine>) -> Self {
        Self { engine }
    }

    /// Forward `{message}` as `{query: message}` and return the engine's body
    /// unchanged, or a `{error, details}` payload on failure.
    pub async fn process_message(&self, request: RelayRequest) -> Value {
        tracing::info!(message = %request.message, "Received message");

        let request = ExternalQueryRequest::from(request);

        tracing::info!(
            engine_url = self.engine.endpoint(),
            "Forwarding message to RAG engine"
        );

        match self.engine.process_query(&request).await {
            Ok(body) => {
                tracing::info!(response = %body, "Received response from RAG engine");
                body
            }
            Err(EngineError::Status { status, body }) => {
                tracing::error!(
                    status = status.as_u16(),
                    body = %body,
                    "RAG engine responded with an error status"
                );
                RelayErrorBody::downstream(body).into_value()
            }
            Err(EngineError::Transport(message)) => {
                tracing::error!(error = %message, "Error calling RAG engine");
                RelayErrorBody::unexpected(message).into_value()
            }
        }
    }
}
