//! Relay HTTP server.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `POST` | `{prefix}/chat` | Forward `{message}` to the query engine |
//! | `GET`  | `{prefix}/health` | Health check (returns version) |
//!
//! `{prefix}` defaults to `/api`.
//!
//! # Error contract
//!
//! The chat endpoint answers HTTP 200 on every handled path. Downstream
//! failures are reported in the body:
//!
//! ```json
//! { "error": "Failed to get response from RAG engine.", "details": { "detail": "boom" } }
//! ```
//!
//! A body that is not `{message: string}` JSON gets the same shape with
//! `"error": "Invalid chat request."` and the parse failure as `details`.
//!
//! # CORS
//!
//! All origins are permitted, with methods GET/HEAD/PUT/PATCH/POST/DELETE and
//! headers Content-Type/Accept/Authorization, so a browser UI served from
//! another port can call the relay.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::{header, Method},
    routing::{get, post},
    Json, Router,
};
use ragchat_core::AppConfig;
use serde_json::Value;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::engine::HttpQueryEngine;
use crate::service::ChatService;
use crate::types::{RelayErrorBody, RelayRequest};

/// Shared state passed to route handlers via Axum's `State` extractor.
#[derive(Clone)]
struct AppState {
    service: ChatService,
}

/// Build the relay router with all API routes under `api_prefix`.
pub fn build_router(service: ChatService, api_prefix: &str) -> Router {
    let prefix = api_prefix.trim_end_matches('/');

    Router::new()
        .route(&format!("{}/chat", prefix), post(handle_chat))
        .route(&format!("{}/health", prefix), get(handle_health))
        .layer(cors_layer())
        .layer(TraceLayer::new_for_http())
        .with_state(AppState { service })
}

fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::HEAD,
            Method::PUT,
            Method::PATCH,
            Method::POST,
            Method::DELETE,
        ])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT, header::AUTHORIZATION])
}

/// Starts the relay server.
///
/// Binds to `[relay].bind`, forwards to `[relay].engineUrl` and runs until
/// the process receives Ctrl-C.
pub async fn run_server(config: &AppConfig) -> anyhow::Result<()> {
    let engine = HttpQueryEngine::new(config.relay.engine_url.clone());
    let service = ChatService::new(Arc::new(engine));
    let app = build_router(service, &config.relay.api_prefix);

    let listener = tokio::net::TcpListener::bind(&config.relay.bind).await?;
    tracing::info!("CORS has been enabled for all origins");
    tracing::info!(prefix = %config.relay.api_prefix, "API routes mounted");
    tracing::info!(
        engine_url = %config.relay.engine_url,
        "Relay listening on http://{}",
        listener.local_addr()?
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Relay stopped");
    Ok(())
}

async fn handle_chat(
    State(state): State<AppState>,
    payload: Result<Json<RelayRequest>, JsonRejection>,
) -> Json<Value> {
    match payload {
        Ok(Json(request)) => Json(state.service.process_message(request).await),
        Err(rejection) => {
            let reason = rejection.body_text();
            tracing::warn!(error = %reason, "Rejected chat request");
            Json(RelayErrorBody::invalid_request(reason).into_value())
        }
    }
}

async fn handle_health() -> Json<Value> {
    Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

pub(crate) async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for shutdown signal: {}", e);
        // Without a signal handler, keep serving until the process is killed
        std::future::pending::<()>().await;
    }
}
