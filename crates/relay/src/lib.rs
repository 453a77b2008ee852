//! Relay service for the RAG chat UI.
//!
//! A stateless HTTP proxy: the chat UI posts `{message}` to the relay, the
//! relay posts `{query}` to the external query engine and hands back whatever
//! the engine answered, or a uniform `{error, details}` payload.
//!
//! # Example
//! ```no_run
//! use ragchat_relay::{build_router, ChatService, HttpQueryEngine};
//! use std::sync::Arc;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let engine = HttpQueryEngine::new("http://localhost:8000/process_query");
//! let app = build_router(ChatService::new(Arc::new(engine)), "/api");
//! let listener = tokio::net::TcpListener::bind("127.0.0.1:3001").await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```

pub mod engine;
pub mod mock_engine;
pub mod server;
pub mod service;
pub mod types;

// Re-export main types
pub use engine::{EngineError, HttpQueryEngine, QueryEngine};
pub use mock_engine::{mock_engine_router, run_mock_engine};
pub use server::{build_router, run_server};
pub use service::ChatService;
pub use types::{ExternalQueryRequest, RelayErrorBody, RelayRequest};
