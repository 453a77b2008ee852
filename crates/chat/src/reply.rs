//! Interpretation of relay response bodies.

use crate::error::ChatError;
use crate::source::Source;
use serde::Serialize;
use serde_json::Value;

/// Answer text used when the body carries neither `answer` nor `response`.
pub const NO_ANSWER: &str = "No answer received.";

/// Answer and citations extracted from a relay response.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RelayReply {
    pub answer: String,
    pub sources: Vec<Source>,
}

impl RelayReply {
    /// Extract the reply from a 2xx relay body.
    ///
    /// The answer is read from `answer`, then `response`, then falls back to
    /// [`NO_ANSWER`]. Non-empty strings are used as is and non-zero numbers
    /// are shown as text; anything else counts as missing. `sources` defaults to
    /// empty and entries that are not objects are skipped.
    ///
    /// A body that has no answer but does carry a string `error` (the relay's
    /// failure payload) becomes [`ChatError::Relay`].
    pub fn from_value(body: &Value) -> Result<Self, ChatError> {
        let answer = answer_text(body, "answer").or_else(|| answer_text(body, "response"));

        if answer.is_none() {
            if let Some(error) = non_empty_str(body, "error") {
                return Err(ChatError::Relay(error.to_string()));
            }
        }

        let sources = body
            .get("sources")
            .and_then(Value::as_array)
            .map(|items| items.iter().filter_map(Source::from_value).collect())
            .unwrap_or_default();

        Ok(Self {
            answer: answer.unwrap_or_else(|| NO_ANSWER.to_string()),
            sources,
        })
    }
}

fn answer_text(body: &Value, key: &str) -> Option<String> {
    match body.get(key)? {
        Value::String(text) if !text.is_empty() => Some(text.clone()),
        Value::Number(n) if n.as_f64() != Some(0.0) => Some(n.to_string()),
        _ => None,
    }
}

fn non_empty_str<'a>(body: &'a Value, key: &str) -> Option<&'a str> {
    body.get(key)
        .and_then(Value::as_str)
        .filter(|text| !text.is_empty())
}
