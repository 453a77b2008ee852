//! Configuration management for the RAG chat workspace.
//!
//! This module handles loading and merging configuration from multiple sources:
//! - Built-in defaults (local development ports)
//! - Config file (`ragchat.yaml`, or the path in `RAGCHAT_CONFIG`)
//! - Environment variables
//! - Command-line flags
//!
//! Later sources win.

use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use crate::error::{AppError, AppResult};

/// Config file looked up in the current directory when none is named.
pub const DEFAULT_CONFIG_FILE: &str = "ragchat.yaml";

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Relay service settings
    pub relay: RelayConfig,

    /// Chat UI settings
    pub chat: ChatConfig,

    /// Mock query engine settings
    pub engine: EngineConfig,

    /// Optional config file path
    pub config_file: Option<PathBuf>,

    /// Log level override
    pub log_level: Option<String>,

    /// Verbose mode (enables debug logging)
    pub verbose: bool,

    /// Disable colored output
    pub no_color: bool,
}

/// Relay service configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RelayConfig {
    /// Address the relay listens on
    pub bind: String,

    /// Path prefix for all API routes
    #[serde(rename = "apiPrefix")]
    pub api_prefix: String,

    /// URL of the external query engine endpoint
    #[serde(rename = "engineUrl")]
    pub engine_url: String,
}

/// Chat UI configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatConfig {
    /// Full URL of the relay chat endpoint
    #[serde(rename = "relayUrl")]
    pub relay_url: String,

    /// Initial language selection ("en" or "de")
    pub language: String,
}

/// Mock engine configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EngineConfig {
    /// Address the mock engine listens on
    pub bind: String,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0:3001".to_string(),
            api_prefix: "/api".to_string(),
            engine_url: "http://localhost:8000/process_query".to_string(),
        }
    }
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            relay_url: "http://localhost:3001/api/chat".to_string(),
            language: "en".to_string(),
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0:8000".to_string(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            relay: RelayConfig::default(),
            chat: ChatConfig::default(),
            engine: EngineConfig::default(),
            config_file: None,
            log_level: None,
            verbose: false,
            no_color: false,
        }
    }
}

/// Config file structure; every key is optional.
#[derive(Debug, Clone, Default, Deserialize)]
struct ConfigFile {
    relay: Option<RelayFileSection>,
    chat: Option<ChatFileSection>,
    engine: Option<EngineFileSection>,
    logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Deserialize)]
struct RelayFileSection {
    bind: Option<String>,
    #[serde(rename = "apiPrefix")]
    api_prefix: Option<String>,
    #[serde(rename = "engineUrl")]
    engine_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
struct ChatFileSection {
    #[serde(rename = "relayUrl")]
    relay_url: Option<String>,
    language: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
struct EngineFileSection {
    bind: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
struct LoggingConfig {
    level: Option<String>,
    color: Option<bool>,
}

impl AppConfig {
    /// Load configuration from defaults, the config file and the environment.
    ///
    /// Environment variables:
    /// - `RAGCHAT_CONFIG`: Path to config file
    /// - `RAGCHAT_RELAY_BIND`: Relay listen address
    /// - `RAGCHAT_ENGINE_URL`: External query engine URL
    /// - `RAGCHAT_RELAY_URL`: Relay chat endpoint used by the chat UI
    /// - `RUST_LOG`: Log level
    /// - `NO_COLOR`: Disable colored output
    ///
    /// # Example
    /// ```no_run
    /// use ragchat_core::config::AppConfig;
    ///
    /// let config = AppConfig::load().expect("Failed to load config");
    /// println!("Engine: {}", config.relay.engine_url);
    /// ```
    pub fn load() -> AppResult<Self> {
        Self::load_with(|key| std::env::var(key).ok())
    }

    /// Load configuration using `env` to look up environment variables.
    pub fn load_with<F>(env: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(config_file) = env("RAGCHAT_CONFIG") {
            config.config_file = Some(PathBuf::from(config_file));
        }

        // An explicitly named file must exist; the default one is optional
        match config.config_file.clone() {
            Some(path) => {
                if !path.exists() {
                    return Err(AppError::Config(format!(
                        "Config file does not exist: {:?}",
                        path
                    )));
                }
                config = config.merge_yaml(&path)?;
            }
            None => {
                let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    config = config.merge_yaml(&default_path)?;
                }
            }
        }

        if let Some(bind) = env("RAGCHAT_RELAY_BIND") {
            config.relay.bind = bind;
        }

        if let Some(engine_url) = env("RAGCHAT_ENGINE_URL") {
            config.relay.engine_url = engine_url;
        }

        if let Some(relay_url) = env("RAGCHAT_RELAY_URL") {
            config.chat.relay_url = relay_url;
        }

        if let Some(level) = env("RUST_LOG") {
            config.log_level = Some(level);
        }

        if env("NO_COLOR").is_some() {
            config.no_color = true;
        }

        Ok(config)
    }

    /// Merge a YAML configuration file into this config.
    pub fn merge_yaml(&self, path: &Path) -> AppResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            AppError::Config(format!("Failed to read config file {:?}: {}", path, e))
        })?;

        // An empty file deserializes to unit, not to an empty mapping
        let config_file: ConfigFile = if contents.trim().is_empty() {
            ConfigFile::default()
        } else {
            serde_yaml::from_str(&contents).map_err(|e| {
                AppError::Config(format!("Failed to parse config file {:?}: {}", path, e))
            })?
        };

        let mut result = self.clone();
        result.config_file = Some(path.to_path_buf());

        if let Some(relay) = config_file.relay {
            if let Some(bind) = relay.bind {
                result.relay.bind = bind;
            }
            if let Some(prefix) = relay.api_prefix {
                result.relay.api_prefix = prefix;
            }
            if let Some(url) = relay.engine_url {
                result.relay.engine_url = url;
            }
        }

        if let Some(chat) = config_file.chat {
            if let Some(url) = chat.relay_url {
                result.chat.relay_url = url;
            }
            if let Some(language) = chat.language {
                result.chat.language = language;
            }
        }

        if let Some(engine) = config_file.engine {
            if let Some(bind) = engine.bind {
                result.engine.bind = bind;
            }
        }

        if let Some(logging) = config_file.logging {
            if let Some(level) = logging.level {
                result.log_level = Some(level);
            }
            if let Some(color) = logging.color {
                result.no_color = !color;
            }
        }

        Ok(result)
    }

    /// Apply CLI overrides to the configuration.
    ///
    /// CLI flags take precedence over the config file and environment.
    pub fn with_overrides(
        mut self,
        engine_url: Option<String>,
        relay_url: Option<String>,
        log_level: Option<String>,
        verbose: bool,
        no_color: bool,
    ) -> Self {
        if let Some(engine_url) = engine_url {
            self.relay.engine_url = engine_url;
        }

        if let Some(relay_url) = relay_url {
            self.chat.relay_url = relay_url;
        }

        if let Some(log_level) = log_level {
            self.log_level = Some(log_level);
        }

        if verbose {
            self.verbose = true;
            // Verbose mode implies debug logging
            if self.log_level.is_none() {
                self.log_level = Some("debug".to_string());
            }
        }

        if no_color {
            self.no_color = true;
        }

        self
    }

    /// Validate addresses and URLs before anything is bound or dialed.
    pub fn validate(&self) -> AppResult<()> {
        validate_bind("relay.bind", &self.relay.bind)?;
        validate_bind("engine.bind", &self.engine.bind)?;
        validate_url("relay.engineUrl", &self.relay.engine_url)?;
        validate_url("chat.relayUrl", &self.chat.relay_url)?;

        if !self.relay.api_prefix.starts_with('/') {
            return Err(AppError::Config(format!(
                "relay.apiPrefix must start with '/': {}",
                self.relay.api_prefix
            )));
        }

        Ok(())
    }
}

/// Accept `host:port` where host is an IP literal or a hostname.
fn validate_bind(key: &str, value: &str) -> AppResult<()> {
    if value.parse::<SocketAddr>().is_ok() {
        return Ok(());
    }

    let invalid = |reason: &str| {
        AppError::Config(format!("Invalid {} address {:?}: {}", key, value, reason))
    };

    let (host, port) = value.rsplit_once(':').ok_or_else(|| invalid("expected host:port"))?;
    port.parse::<u16>().map_err(|_| invalid("bad port"))?;

    if host.is_empty() || host.contains(|c: char| c.is_whitespace() || c == ':') {
        return Err(invalid("bad host"));
    }
    Ok(())
}

fn validate_url(key: &str, value: &str) -> AppResult<()> {
    if value.starts_with("http://") || value.starts_with("https://") {
        Ok(())
    } else {
        Err(AppError::Config(format!(
            "{} must be an http(s) URL: {:?}",
            key, value
        )))
    }
}
