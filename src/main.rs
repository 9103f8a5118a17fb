//! `journal-insights` - print the analysis state, or run the analysis that is due.
//!
//! ```text
//! journal-insights                        # show the current session state
//! journal-insights analyze [--allow-empty]
//! ```

use std::process::ExitCode;
use std::sync::Arc;

use chrono::{DateTime, FixedOffset, Local};
use tracing::error;

use journal_insights::adapters::ai::OpenAIProvider;
use journal_insights::adapters::storage::{FileAnalysisHistory, FileJournalReader};
use journal_insights::application::{
    GetSessionStateHandler, GetSessionStateQuery, RunAnalysisCommand, RunAnalysisError,
    RunAnalysisHandler, SessionState,
};
use journal_insights::config::{AppConfig, ConfigError};

#[tokio::main]
async fn main() -> ExitCode {
    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };
    config.logging.init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let result = match args.first().map(String::as_str) {
        None | Some("state") => show_state(&config).await,
        Some("analyze") => {
            let allow_empty = args.iter().any(|a| a == "--allow-empty");
            analyze(&config, allow_empty).await
        }
        Some(other) => Err(format!("unknown command: {other}")),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            error!(%message, "Command failed");
            eprintln!("{}", message);
            ExitCode::FAILURE
        }
    }
}

fn now() -> DateTime<FixedOffset> {
    let local = Local::now();
    local.with_timezone(local.offset())
}

async fn show_state(config: &AppConfig) -> Result<(), String> {
    config.storage.validate().map_err(|e| e.to_string())?;

    let history = Arc::new(FileAnalysisHistory::new(&config.storage.history_path));
    let state = GetSessionStateHandler::new(history)
        .handle(GetSessionStateQuery { at: now() })
        .await
        .map_err(|e| e.to_string())?;

    print_state(&state)
}

async fn analyze(config: &AppConfig, allow_empty: bool) -> Result<(), String> {
    config
        .validate()
        .map_err(|e| ConfigError::from(e).to_string())?;
    let openai = config
        .ai
        .openai_config()
        .ok_or_else(|| "AI API key is not configured".to_string())?;
    let provider = OpenAIProvider::new(openai).map_err(|e| e.to_string())?;

    let handler = RunAnalysisHandler::new(
        Arc::new(FileAnalysisHistory::new(&config.storage.history_path)),
        Arc::new(FileJournalReader::new(&config.storage.journal_path)),
        Arc::new(provider),
    );

    let mut cmd = RunAnalysisCommand::at(now());
    if allow_empty {
        cmd = cmd.allowing_empty();
    }

    match handler.handle(cmd).await {
        Ok(result) => print_state(&result.state),
        Err(RunAnalysisError::Provider(e)) if e.is_user_actionable() => Err(format!(
            "{e}. Check your API key and billing settings, then try again."
        )),
        Err(e) => Err(e.to_string()),
    }
}

fn print_state(state: &SessionState) -> Result<(), String> {
    let json = serde_json::to_string_pretty(state).map_err(|e| e.to_string())?;
    println!("{}", json);
    Ok(())
}
