//! What the chat form shows for a given state.
//!
//! [`ChatView`] is the observable contract (which blocks appear, with which
//! text); [`render_text`] lays it out for a terminal.

use crate::state::UiState;
use serde::Serialize;
use std::fmt::Write;

pub const LOADING_PLACEHOLDER: &str = "Loading response...";
pub const WAITING_PLACEHOLDER: &str = "Waiting for your question...";

/// Content of the answer area.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "text", rename_all = "lowercase")]
pub enum AnswerArea {
    /// A request is in flight and there is no answer yet.
    Loading,
    /// Answer text, verbatim.
    Answer(String),
    /// Nothing asked yet.
    Waiting,
}

/// One citation block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceBlock {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub snippet: Option<String>,
}

/// Renderable snapshot of the chat form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatView {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_banner: Option<String>,
    pub answer: AnswerArea,
    pub sources: Vec<SourceBlock>,
    pub submit_label: &'static str,
    pub controls_disabled: bool,
}

impl ChatView {
    pub fn from_state(state: &UiState) -> Self {
        let answer = if !state.answer.is_empty() {
            AnswerArea::Answer(state.answer.clone())
        } else if state.is_loading {
            AnswerArea::Loading
        } else {
            AnswerArea::Waiting
        };

        // Empty strings and page 0 are treated as absent
        let sources = state
            .sources
            .iter()
            .map(|source| SourceBlock {
                name: source.name.clone(),
                link: source.url.clone().filter(|url| !url.is_empty()),
                page: source
                    .page
                    .filter(|page| *page != 0.0 && !page.is_nan())
                    .map(|page| page.to_string()),
                snippet: source.snippet.clone().filter(|s| !s.is_empty()),
            })
            .collect();

        Self {
            error_banner: (!state.error.is_empty()).then(|| state.error.clone()),
            answer,
            sources,
            submit_label: if state.is_loading {
                "Submitting..."
            } else {
                "Submit Question"
            },
            controls_disabled: state.is_loading,
        }
    }
}

/// Lay out a view as plain text.
pub fn render_text(view: &ChatView) -> String {
    let mut out = String::new();

    if let Some(error) = &view.error_banner {
        let _ = writeln!(out, "Error: {}", error);
        out.push('\n');
    }

    out.push_str("AI Response:\n");
    match &view.answer {
        AnswerArea::Loading => out.push_str(LOADING_PLACEHOLDER),
        AnswerArea::Answer(text) => out.push_str(text),
        AnswerArea::Waiting => out.push_str(WAITING_PLACEHOLDER),
    }
    out.push('\n');

    if !view.sources.is_empty() {
        out.push_str("\nCited Sources:\n");
        for block in &view.sources {
            let _ = writeln!(out, "- {}", block.name);
            if let Some(link) = &block.link {
                let _ = writeln!(out, "  {}", link);
            }
            if let Some(page) = &block.page {
                let _ = writeln!(out, "  Page: {}", page);
            }
            if let Some(snippet) = &block.snippet {
                let _ = writeln!(out, "  Snippet: \"{}\"", snippet);
            }
        }
    }

    out
}
