//! RAG Chat CLI
//!
//! Main entry point for the ragchat command-line tool.
//! Runs the relay service, a mock query engine, and a terminal chat UI.

mod commands;

use clap::{Parser, Subcommand};
use commands::{AskCommand, ChatCommand, MockEngineCommand, ServeCommand};
use ragchat_core::{config::AppConfig, logging, AppResult};
use std::path::PathBuf;

/// RAG Chat - ask questions through a relay to a retrieval engine
#[derive(Parser, Debug)]
#[command(name = "ragchat")]
#[command(about = "Chat front end and relay for a RAG question-answering engine", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to config file (default: ./ragchat.yaml when present)
    #[arg(short, long, global = true, env = "RAGCHAT_CONFIG")]
    config: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true, env = "RUST_LOG")]
    log_level: Option<String>,

    /// Enable verbose output (sets log level to debug)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Disable colored output
    #[arg(long, global = true, env = "NO_COLOR")]
    no_color: bool,

    /// URL of the external query engine endpoint
    #[arg(long, global = true, env = "RAGCHAT_ENGINE_URL")]
    engine_url: Option<String>,

    /// URL of the relay chat endpoint
    #[arg(long, global = true, env = "RAGCHAT_RELAY_URL")]
    relay_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the relay service
    Serve(ServeCommand),

    /// Run a mock query engine that returns canned answers
    MockEngine(MockEngineCommand),

    /// Interactive chat in the terminal
    Chat(ChatCommand),

    /// Ask a single question and print the answer
    Ask(AskCommand),
}

#[tokio::main]
async fn main() -> AppResult<()> {
    let cli = Cli::parse();

    // --config takes the place of RAGCHAT_CONFIG; everything else comes from the environment
    let config_path = cli.config.clone();
    let config = AppConfig::load_with(|key| match (key, &config_path) {
        ("RAGCHAT_CONFIG", Some(path)) => Some(path.display().to_string()),
        _ => std::env::var(key).ok(),
    })?;

    let config = config.with_overrides(
        cli.engine_url,
        cli.relay_url,
        cli.log_level,
        cli.verbose,
        cli.no_color,
    );

    logging::init_logging(config.log_level.as_deref(), config.no_color)?;

    tracing::info!("RAG chat starting");
    tracing::debug!("Config: {:?}", config);

    let command_name = match &cli.command {
        Commands::Serve(_) => "serve",
        Commands::MockEngine(_) => "mock-engine",
        Commands::Chat(_) => "chat",
        Commands::Ask(_) => "ask",
    };
    let _span = tracing::info_span!("command", name = command_name).entered();

    let result = match cli.command {
        Commands::Serve(cmd) => cmd.execute(config).await,
        Commands::MockEngine(cmd) => cmd.execute(config).await,
        Commands::Chat(cmd) => cmd.execute(&config).await,
        Commands::Ask(cmd) => cmd.execute(&config).await,
    };

    match &result {
        Ok(_) => tracing::info!("Command completed successfully"),
        Err(e) => tracing::error!("Command failed: {}", e),
    }

    result
}
