//! Chat command handler.
//!
//! Interactive terminal version of the chat form. A plain line is taken as
//! the question and submitted; slash commands drive the other controls.

use clap::Args;
use ragchat_chat::{
    render_text, ChatSession, ChatView, HttpRelayClient, Language, EXAMPLE_QUESTIONS,
};
use ragchat_core::{config::AppConfig, AppError, AppResult};
use std::io::Write;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};

/// Interactive chat in the terminal
#[derive(Args, Debug)]
pub struct ChatCommand {
    /// Initial language selection (en, de)
    #[arg(short, long)]
    pub language: Option<String>,
}

/// One line of user input.
#[derive(Debug, PartialEq, Eq)]
enum ReplInput {
    /// Edit the question to this text and submit it
    Ask(String),
    /// Submit the pending question
    Send,
    /// Pick example N (1-based)
    Example(usize),
    Examples,
    Language(String),
    New,
    Help,
    Quit,
    Unknown(String),
}

impl ReplInput {
    fn parse(line: &str) -> Self {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return Self::Send;
        }
        if !trimmed.starts_with('/') {
            return Self::Ask(line.trim_end_matches(['\r', '\n']).to_string());
        }

        let mut parts = trimmed.splitn(2, char::is_whitespace);
        let command = parts.next().unwrap_or_default();
        let arg = parts.next().map(str::trim).unwrap_or_default();

        match command {
            "/send" => Self::Send,
            "/examples" => Self::Examples,
            "/example" => match arg.parse::<usize>() {
                Ok(n) if n >= 1 => Self::Example(n),
                _ => Self::Unknown(trimmed.to_string()),
            },
            "/lang" if !arg.is_empty() => Self::Language(arg.to_string()),
            "/new" => Self::New,
            "/help" => Self::Help,
            "/quit" | "/exit" => Self::Quit,
            _ => Self::Unknown(trimmed.to_string()),
        }
    }
}

impl ChatCommand {
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        tracing::info!("Executing chat command");
        config.validate()?;

        let mut session = build_session(config, self.language.as_deref())?;
        print_help();
        print_view(&session);

        let mut lines = BufReader::new(tokio::io::stdin()).lines();

        loop {
            print!("> ");
            std::io::stdout().flush().ok();

            let Some(line) = lines.next_line().await? else {
                break;
            };

            match ReplInput::parse(&line) {
                ReplInput::Ask(text) => {
                    session.edit_question(text);
                    submit(&mut session).await;
                }
                ReplInput::Send => submit(&mut session).await,
                ReplInput::Example(n) => {
                    if session.select_example(n - 1) {
                        println!("Question: {}", session.state().question);
                        println!("(press Enter or /send to submit)");
                    } else {
                        println!("No example #{}; see /examples", n);
                    }
                }
                ReplInput::Examples => print_examples(),
                ReplInput::Language(code) => match code.parse::<Language>() {
                    Ok(language) => {
                        session.select_language(language);
                        println!("Language: {}", language.label());
                    }
                    Err(e) => println!("{}", e),
                },
                ReplInput::New => {
                    session.new_chat();
                    print_view(&session);
                }
                ReplInput::Help => print_help(),
                ReplInput::Quit => break,
                ReplInput::Unknown(input) => println!("Unknown command: {} (try /help)", input),
            }
        }

        Ok(())
    }
}

/// Build a chat session against the configured relay.
pub(crate) fn build_session(config: &AppConfig, language: Option<&str>) -> AppResult<ChatSession> {
    let language = language
        .unwrap_or(&config.chat.language)
        .parse::<Language>()
        .map_err(AppError::Config)?;

    tracing::debug!(relay_url = %config.chat.relay_url, "Using relay");
    let client = HttpRelayClient::new(config.chat.relay_url.clone());

    Ok(ChatSession::new(Arc::new(client)).with_language(language))
}

async fn submit(session: &mut ChatSession) {
    println!("Submitting...");
    session.submit().await;
    print_view(session);
}

fn print_view(session: &ChatSession) {
    println!();
    print!("{}", render_text(&ChatView::from_state(session.state())));
    println!();
}

fn print_examples() {
    for (i, question) in EXAMPLE_QUESTIONS.iter().enumerate() {
        println!("  {}. {}", i + 1, question);
    }
}

fn print_help() {
    println!("Type a question and press Enter to submit it.");
    println!("  /examples      list example questions");
    println!("  /example N     use example question N");
    println!("  /send          submit the pending question");
    println!("  /lang CODE     select language ({})", Language::supported_codes());
    println!("  /new           start a new chat");
    println!("  /quit          exit");
}
