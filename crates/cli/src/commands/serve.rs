//! Serve command handler.
//!
//! Runs the relay service in the foreground.

use clap::Args;
use ragchat_core::{config::AppConfig, AppError, AppResult};

/// Run the relay service
#[derive(Args, Debug)]
pub struct ServeCommand {
    /// Listen address (overrides relay.bind)
    #[arg(short, long, env = "RAGCHAT_RELAY_BIND")]
    pub bind: Option<String>,

    /// Path prefix for API routes (overrides relay.apiPrefix)
    #[arg(long)]
    pub api_prefix: Option<String>,
}

impl ServeCommand {
    pub async fn execute(&self, mut config: AppConfig) -> AppResult<()> {
        tracing::info!("Executing serve command");

        if let Some(ref bind) = self.bind {
            config.relay.bind = bind.clone();
        }
        if let Some(ref prefix) = self.api_prefix {
            config.relay.api_prefix = prefix.clone();
        }
        config.validate()?;

        tracing::info!("Global prefix set to {}", config.relay.api_prefix);

        ragchat_relay::run_server(&config)
            .await
            .map_err(|e| AppError::Relay(e.to_string()))
    }
}
