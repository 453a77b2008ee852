//! Chat UI state and its transitions.
//!
//! `UiState` is a plain value. Every change goes through
//! [`UiState::apply`], which consumes the old state and returns the new one,
//! so transitions can be tested without any rendering or networking.

use crate::error::ChatError;
use crate::language::Language;
use crate::reply::RelayReply;
use crate::source::Source;
use serde::Serialize;

/// Everything the chat form displays.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UiState {
    /// Pending question text
    pub question: String,

    /// Latest answer text; empty when there is none
    pub answer: String,

    /// Citations for the latest answer, in the order received
    pub sources: Vec<Source>,

    /// A request to the relay is in flight
    pub is_loading: bool,

    /// Error banner text; empty when there is none
    pub error: String,

    /// Locale preference (inert)
    pub selected_language: Language,

    /// Example question currently picked in the selector; empty when none
    pub selected_example_question: String,
}

/// A single state transition.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Free-text edit of the pending question.
    EditQuestion(String),

    /// An example was picked; a non-empty pick replaces the question.
    SelectExample(String),

    /// Locale preference changed.
    SelectLanguage(Language),

    /// Submit was attempted with an invalid question.
    ValidationFailed(ChatError),

    /// A request to the relay is about to be sent.
    SubmitStarted,

    /// The relay produced an answer.
    SubmitSucceeded(RelayReply),

    /// The request ended without an answer.
    SubmitFailed(ChatError),

    /// The request is over, whatever its outcome.
    SubmitFinished,

    /// Start over with an empty conversation.
    NewChat,
}

impl UiState {
    pub fn with_language(language: Language) -> Self {
        Self {
            selected_language: language,
            ..Self::default()
        }
    }

    /// Apply one transition and return the resulting state.
    pub fn apply(self, action: Action) -> Self {
        match action {
            Action::EditQuestion(question) => Self { question, ..self },

            Action::SelectExample(example) => {
                let question = if example.is_empty() {
                    self.question
                } else {
                    example.clone()
                };
                Self {
                    question,
                    selected_example_question: example,
                    ..self
                }
            }

            Action::SelectLanguage(selected_language) => Self {
                selected_language,
                ..self
            },

            Action::ValidationFailed(err) => Self {
                answer: String::new(),
                sources: Vec::new(),
                is_loading: false,
                error: err.to_string(),
                ..self
            },

            Action::SubmitStarted => Self {
                answer: String::new(),
                sources: Vec::new(),
                is_loading: true,
                error: String::new(),
                ..self
            },

            Action::SubmitSucceeded(reply) => Self {
                question: String::new(),
                answer: reply.answer,
                sources: reply.sources,
                error: String::new(),
                ..self
            },

            Action::SubmitFailed(err) => Self {
                answer: err.failure_answer().to_string(),
                sources: Vec::new(),
                error: err.to_string(),
                ..self
            },

            Action::SubmitFinished => Self {
                is_loading: false,
                ..self
            },

            // Loading is left alone: an in-flight request still owns it
            Action::NewChat => Self {
                question: String::new(),
                answer: String::new(),
                sources: Vec::new(),
                error: String::new(),
                selected_example_question: String::new(),
                ..self
            },
        }
    }

    /// Check the pending question before anything is sent.
    pub fn validate_question(&self) -> Result<(), ChatError> {
        if self.question.trim().is_empty() {
            return Err(ChatError::EmptyQuestion);
        }
        Ok(())
    }
}
