//! Chat UI error taxonomy.

use ragchat_core::AppError;
use thiserror::Error;

/// Message shown when submit is attempted with a blank question.
pub const EMPTY_QUESTION: &str = "Please enter a question.";

/// Answer text shown after a recognised failure.
pub const FAILED_ANSWER: &str = "Failed to get response.";

/// Answer text shown after an unrecognised failure.
pub const UNKNOWN_FAILED_ANSWER: &str = "Failed to get response due to an unknown error.";

/// Why a submit did not produce an answer.
///
/// The `Display` output of each variant is the text of the error banner.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChatError {
    /// Blank question; never reaches the network.
    #[error("Please enter a question.")]
    EmptyQuestion,

    /// The relay answered with a non-success status.
    #[error("{message}")]
    Status { status: u16, message: String },

    /// The relay could not be reached.
    #[error("{0}")]
    Transport(String),

    /// The relay answered with a body that is not JSON.
    #[error("{0}")]
    Decode(String),

    /// The relay answered 200 with an `{error, details}` payload and no answer.
    #[error("{0}")]
    Relay(String),

    /// Anything else, e.g. the request task panicked or was aborted.
    #[error("An unknown error occurred.")]
    Unknown,
}

impl ChatError {
    /// Text placed in the answer area when this error ends a submit.
    pub fn failure_answer(&self) -> &'static str {
        match self {
            ChatError::Unknown => UNKNOWN_FAILED_ANSWER,
            _ => FAILED_ANSWER,
        }
    }
}

impl From<ChatError> for AppError {
    fn from(err: ChatError) -> Self {
        AppError::Chat(err.to_string())
    }
}
