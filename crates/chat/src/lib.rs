//! Chat UI for the RAG relay.
//!
//! The UI is a single form: a question, a submit control, the latest answer
//! with its cited sources, and an error banner. State lives in one
//! [`UiState`] value updated through [`Action`]s; [`ChatSession`] runs the
//! submit request and [`ChatView`] describes what to show.
//!
//! # Example
//! ```no_run
//! use ragchat_chat::{render_text, ChatSession, ChatView, HttpRelayClient};
//! use std::sync::Arc;
//!
//! # async fn example() {
//! let client = HttpRelayClient::new("http://localhost:3001/api/chat");
//! let mut session = ChatSession::new(Arc::new(client));
//! session.edit_question("What is force majeure?");
//! session.submit().await;
//! print!("{}", render_text(&ChatView::from_state(session.state())));
//! # }
//! ```

pub mod client;
pub mod error;
pub mod examples;
pub mod language;
pub mod render;
pub mod reply;
pub mod session;
pub mod source;
pub mod state;

// Re-export main types
pub use client::{HttpRelayClient, RelayClient, RelayRequest};
pub use error::ChatError;
pub use examples::EXAMPLE_QUESTIONS;
pub use language::Language;
pub use render::{render_text, AnswerArea, ChatView, SourceBlock};
pub use reply::RelayReply;
pub use session::ChatSession;
pub use source::Source;
pub use state::{Action, UiState};
