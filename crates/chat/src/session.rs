//! Submit controller for the chat UI.
//!
//! `ChatSession` owns the current [`UiState`] and the relay client, turns
//! user actions into [`Action`]s and runs the submit request.

use crate::client::{RelayClient, RelayRequest};
use crate::error::ChatError;
use crate::examples::example_question;
use crate::language::Language;
use crate::state::{Action, UiState};
use std::sync::Arc;
use tokio::task::AbortHandle;

/// One chat form and the relay it talks to.
pub struct ChatSession {
    state: UiState,
    client: Arc<dyn RelayClient>,
}

impl ChatSession {
    pub fn new(client: Arc<dyn RelayClient>) -> Self {
        Self {
            state: UiState::default(),
            client,
        }
    }

    pub fn with_language(mut self, language: Language) -> Self {
        self.state = UiState::with_language(language);
        self
    }

    pub fn state(&self) -> &UiState {
        &self.state
    }

    /// Apply a transition to the owned state.
    pub fn dispatch(&mut self, action: Action) {
        let state = std::mem::take(&mut self.state);
        self.state = state.apply(action);
    }

    pub fn edit_question(&mut self, question: impl Into<String>) {
        self.dispatch(Action::EditQuestion(question.into()));
    }

    /// Pick an example question by zero-based index.
    ///
    /// Returns `false` (and changes nothing) for an index outside the list.
    pub fn select_example(&mut self, index: usize) -> bool {
        match example_question(index) {
            Some(example) => {
                self.dispatch(Action::SelectExample(example.to_string()));
                true
            }
            None => false,
        }
    }

    pub fn select_language(&mut self, language: Language) {
        self.dispatch(Action::SelectLanguage(language));
    }

    pub fn new_chat(&mut self) {
        self.dispatch(Action::NewChat);
    }

    /// Submit the pending question.
    ///
    /// A blank question sets the validation error and sends nothing.
    /// Otherwise exactly one request is sent with the question as typed.
    /// The loading flag is cleared on every way out of this method,
    /// including when the returned future is dropped mid-request. Dropping
    /// the future also aborts the in-flight request.
    pub async fn submit(&mut self) {
        if let Err(err) = self.state.validate_question() {
            tracing::debug!("Submit rejected: {}", err);
            self.dispatch(Action::ValidationFailed(err));
            return;
        }

        let request = RelayRequest {
            message: self.state.question.clone(),
        };
        let client = Arc::clone(&self.client);
        let mut loading = LoadingGuard::start(&mut self.state);

        tracing::debug!("Submitting question to relay");

        // The request runs as its own task so a panic inside the client is
        // caught here instead of unwinding through the UI.
        let task = tokio::spawn(async move { client.send(&request).await });
        loading.track(task.abort_handle());

        let result = match task.await {
            Ok(result) => result,
            Err(e) => {
                tracing::error!("Relay request task failed: {}", e);
                Err(ChatError::Unknown)
            }
        };

        match result {
            Ok(reply) => loading.apply(Action::SubmitSucceeded(reply)),
            Err(err) => {
                tracing::warn!("Failed to fetch AI response: {}", err);
                loading.apply(Action::SubmitFailed(err));
            }
        }
    }
}

/// Holds the state for the duration of a request and marks it finished on
/// drop, aborting the request task if it is still running.
struct LoadingGuard<'a> {
    state: &'a mut UiState,
    task: Option<AbortHandle>,
}

impl<'a> LoadingGuard<'a> {
    fn start(state: &'a mut UiState) -> Self {
        let mut guard = Self { state, task: None };
        guard.apply(Action::SubmitStarted);
        guard
    }

    fn track(&mut self, task: AbortHandle) {
        self.task = Some(task);
    }

    fn apply(&mut self, action: Action) {
        let state = std::mem::take(self.state);
        *self.state = state.apply(action);
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
        self.apply(Action::SubmitFinished);
        tracing::debug!("Submit finished");
    }
}
