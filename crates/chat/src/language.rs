//! Language preference.
//!
//! The selection is stored in the UI state but does not change requests or
//! rendering yet.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Languages offered by the language selector.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Language {
    #[default]
    #[serde(rename = "en")]
    English,
    #[serde(rename = "de")]
    German,
}

impl Language {
    /// Every selectable language, in selector order.
    pub const ALL: [Language; 2] = [Language::English, Language::German];

    /// Comma-separated codes of [`Language::ALL`], e.g. "en, de".
    pub fn supported_codes() -> String {
        Self::ALL
            .iter()
            .map(Language::code)
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Locale code, e.g. "en".
    pub fn code(&self) -> &'static str {
        match self {
            Self::English => "en",
            Self::German => "de",
        }
    }

    /// Label shown in the selector.
    pub fn label(&self) -> &'static str {
        match self {
            Self::English => "English",
            Self::German => "German",
        }
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "en" | "english" => Ok(Self::English),
            "de" | "german" | "deutsch" => Ok(Self::German),
            other => Err(format!(
                "Unknown language: {}. Supported: {}",
                other,
                Self::supported_codes()
            )),
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
