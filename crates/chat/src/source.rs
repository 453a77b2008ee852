//! Citations attached to an answer.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A single source reference returned with an answer.
///
/// Only `name` is always present; the engine decides which of the other
/// fields to fill in.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Source {
    /// Document name (e.g., "contract.pdf")
    #[serde(default)]
    pub name: String,

    /// Link to the document
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// Page number; the engine sends a plain JSON number
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<f64>,

    /// Supporting excerpt
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snippet: Option<String>,
}

impl Source {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Read a source from an arbitrary JSON value.
    ///
    /// Fields of the wrong type are treated as absent. Returns `None` when
    /// `value` is not an object.
    pub fn from_value(value: &Value) -> Option<Self> {
        let object = value.as_object()?;
        let text = |key: &str| object.get(key).and_then(Value::as_str).map(str::to_string);

        Some(Self {
            name: text("name").unwrap_or_default(),
            url: text("url"),
            page: object.get("page").and_then(Value::as_f64),
            snippet: text("snippet"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_value_full() {
        let source = Source::from_value(&json!({
            "name": "GDPR.pdf",
            "url": "https://example.org/gdpr.pdf",
            "page": 12,
            "snippet": "Article 6"
        }))
        .unwrap();

        assert_eq!(source.name, "GDPR.pdf");
        assert_eq!(source.url.as_deref(), Some("https://example.org/gdpr.pdf"));
        assert_eq!(source.page, Some(12.0));
        assert_eq!(source.snippet.as_deref(), Some("Article 6"));
    }

    #[test]
    fn test_from_value_lenient() {
        let source = Source::from_value(&json!({ "name": "A", "page": "twelve", "url": null }))
            .unwrap();
        assert_eq!(source, Source::named("A"));

        assert!(Source::from_value(&json!("just a string")).is_none());
    }
}
