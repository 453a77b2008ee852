//! Stand-in for the external query engine.
//!
//! Serves `POST /process_query` with a fixed answer and two fake citations,
//! enough to exercise the relay and the chat UI end to end without a real
//! retrieval backend.

use axum::{routing::post, Json, Router};
use ragchat_core::AppConfig;
use serde_json::{json, Value};

use crate::server::shutdown_signal;
use crate::types::ExternalQueryRequest;

/// Path the mock engine answers on.
pub const PROCESS_QUERY_PATH: &str = "/process_query";

/// Canned engine response for `query`.
pub fn mock_response(query: &str) -> Value {
    json!({
        "answer": format!(
            "This is a mock RAG response to your query: '{}'. Actual processing will be implemented later.",
            query
        ),
        "sources": [
            { "name": "Mock Source 1.pdf", "page": 1 },
            { "name": "Mock Source 2.txt", "snippet": "A relevant snippet from the document..." }
        ]
    })
}

/// Router serving the mock engine endpoint.
pub fn mock_engine_router() -> Router {
    Router::new().route(PROCESS_QUERY_PATH, post(handle_process_query))
}

async fn handle_process_query(Json(request): Json<ExternalQueryRequest>) -> Json<Value> {
    tracing::debug!(query = %request.query, "Mock engine answering");
    Json(mock_response(&request.query))
}

/// Starts the mock engine on `[engine].bind` until Ctrl-C.
pub async fn run_mock_engine(config: &AppConfig) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(&config.engine.bind).await?;
    tracing::info!(
        "Mock engine listening on http://{}{}",
        listener.local_addr()?,
        PROCESS_QUERY_PATH
    );

    axum::serve(listener, mock_engine_router())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}
