//! Ask command handler.
//!
//! Submits a single question through the relay and prints the result.

use clap::Args;
use ragchat_chat::{render_text, ChatView};
use ragchat_core::{config::AppConfig, AppError, AppResult};

use super::chat::build_session;

/// Ask a single question and print the answer
#[derive(Args, Debug)]
pub struct AskCommand {
    /// The question to ask
    pub question: Option<String>,

    /// Use example question N (1-based) instead of typing one
    #[arg(short, long, conflicts_with = "question")]
    pub example: Option<usize>,

    /// Language selection (en, de)
    #[arg(short, long)]
    pub language: Option<String>,

    /// Output the rendered view as JSON
    #[arg(long)]
    pub json: bool,
}

impl AskCommand {
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        tracing::info!("Executing ask command");
        tracing::debug!("Ask command options: {:?}", self);
        config.validate()?;

        let mut session = build_session(config, self.language.as_deref())?;

        if let Some(n) = self.example {
            if n == 0 || !session.select_example(n - 1) {
                return Err(AppError::Config(format!("No example question #{}", n)));
            }
        } else if let Some(ref question) = self.question {
            session.edit_question(question.clone());
        }

        session.submit().await;

        let view = ChatView::from_state(session.state());
        if self.json {
            println!("{}", serde_json::to_string_pretty(&view)?);
        } else {
            print!("{}", render_text(&view));
        }

        match view.error_banner {
            Some(error) => Err(AppError::Chat(error)),
            None => Ok(()),
        }
    }
}
