//! Mock engine command handler.

use clap::Args;
use ragchat_core::{config::AppConfig, AppError, AppResult};

/// Run a mock query engine that returns canned answers
#[derive(Args, Debug)]
pub struct MockEngineCommand {
    /// Listen address (overrides engine.bind)
    #[arg(short, long)]
    pub bind: Option<String>,
}

impl MockEngineCommand {
    pub async fn execute(&self, mut config: AppConfig) -> AppResult<()> {
        tracing::info!("Executing mock-engine command");

        if let Some(ref bind) = self.bind {
            config.engine.bind = bind.clone();
        }
        config.validate()?;

        ragchat_relay::run_mock_engine(&config)
            .await
            .map_err(|e| AppError::Engine(e.to_string()))
    }
}
