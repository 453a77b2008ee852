//! Command handlers for the RAG chat CLI.
//!
//! This module organizes all CLI commands into separate submodules.

pub mod ask;
pub mod chat;
pub mod mock_engine;
pub mod serve;

// Re-export command types for convenience
pub use ask::AskCommand;
pub use chat::ChatCommand;
pub use mock_engine::MockEngineCommand;
pub use serve::ServeCommand;
