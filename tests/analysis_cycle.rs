//! Integration tests for the analysis cycle over JSON-file storage.
//!
//! These tests drive the public API end to end:
//! 1. Journal entries are read from a JSON file
//! 2. RunAnalysisHandler gates, prompts the (mock) model and appends a record
//! 3. A fresh history instance reads the records back from disk
//! 4. GetSessionStateHandler derives the display state

use chrono::{DateTime, FixedOffset, TimeZone};
use std::sync::Arc;
use tempfile::TempDir;

use journal_insights::adapters::ai::MockAnalysisProvider;
use journal_insights::adapters::storage::{FileAnalysisHistory, FileJournalReader};
use journal_insights::application::{
    GetSessionStateHandler, GetSessionStateQuery, RunAnalysisCommand, RunAnalysisError,
    RunAnalysisHandler,
};
use journal_insights::domain::analysis::AnalysisMode;
use journal_insights::domain::journal::JournalEntry;
use journal_insights::ports::{AnalysisError, AnalysisHistoryRepository};

// =============================================================================
// Test Infrastructure
// =============================================================================

fn at(y: i32, m: u32, d: u32) -> DateTime<FixedOffset> {
    FixedOffset::west_opt(7 * 3600)
        .unwrap()
        .with_ymd_and_hms(y, m, d, 21, 15, 0)
        .unwrap()
}

struct Workspace {
    _dir: TempDir,
    history_path: std::path::PathBuf,
    journal_path: std::path::PathBuf,
}

impl Workspace {
    fn with_entries(entries: &[JournalEntry]) -> Self {
        let dir = TempDir::new().unwrap();
        let history_path = dir.path().join("analysis_history.json");
        let journal_path = dir.path().join("journal_entries.json");
        std::fs::write(&journal_path, serde_json::to_string(entries).unwrap()).unwrap();

        Self {
            _dir: dir,
            history_path,
            journal_path,
        }
    }

    fn handler(&self, provider: &MockAnalysisProvider) -> RunAnalysisHandler {
        RunAnalysisHandler::new(
            Arc::new(FileAnalysisHistory::new(&self.history_path)),
            Arc::new(FileJournalReader::new(&self.journal_path)),
            Arc::new(provider.clone()),
        )
    }

    fn state_handler(&self) -> GetSessionStateHandler {
        GetSessionStateHandler::new(Arc::new(FileAnalysisHistory::new(&self.history_path)))
    }
}

fn spring_entries() -> Vec<JournalEntry> {
    vec![
        JournalEntry::new(at(2024, 3, 12), "Busy week at work", "reflection"),
        JournalEntry::new(at(2024, 3, 25), "Grateful for a slow Monday", "gratitude"),
        JournalEntry::new(at(2024, 3, 31), "Easter with family", ""),
        JournalEntry::new(at(2024, 4, 8), "Watched the eclipse", ""),
        JournalEntry::new(at(2024, 4, 13), "Garden planted", "gratitude"),
    ]
}

// =============================================================================
// Tests
// =============================================================================

#[tokio::test]
async fn weekly_then_monthly_cycle_persists_to_disk() {
    let workspace = Workspace::with_entries(&spring_entries());
    let provider = MockAnalysisProvider::new()
        .with_response("Grateful(2), Rested(1)\n\nA gentle week.\n\nScore 82")
        .with_response("Joyful(5), Busy(3)\n\nMarch held a lot.\n\nThis month scored 91.");
    let handler = workspace.handler(&provider);

    // Wednesday April 3rd: the previous week (Mar 24-30) is due.
    let weekly = handler
        .handle(RunAnalysisCommand::at(at(2024, 4, 3)))
        .await
        .unwrap();
    assert_eq!(weekly.record.entry_type, "weekly");
    assert_eq!(weekly.state.date_range_display_text, "Mar 24 to Mar 30");
    assert_eq!(weekly.state.wellness_score, Some(82));

    // Tuesday April 9th: Mar 31 - Apr 6 spanned months, so March is due.
    let monthly = handler
        .handle(RunAnalysisCommand::at(at(2024, 4, 9)))
        .await
        .unwrap();
    assert_eq!(monthly.record.entry_type, "monthly");
    assert_eq!(monthly.state.mode, AnalysisMode::Monthly);
    assert_eq!(monthly.state.date_range_display_text, "Mar Month");
    assert_eq!(monthly.state.wellness_score, Some(91));

    let calls = provider.get_calls();
    assert_eq!(calls.len(), 2);
    assert!(calls[0].prompt.contains("Grateful for a slow Monday"));
    assert!(!calls[0].prompt.contains("Easter with family"));
    assert!(calls[1].prompt.contains("Busy week at work"));
    assert!(calls[1].prompt.contains("Easter with family"));
    assert!(!calls[1].prompt.contains("Watched the eclipse"));

    // A fresh reader sees both records.
    let records = FileAnalysisHistory::new(&workspace.history_path)
        .list()
        .await
        .unwrap();
    assert_eq!(records.len(), 2);
}

#[tokio::test]
async fn monthly_window_is_analyzed_only_once() {
    let workspace = Workspace::with_entries(&spring_entries());
    let provider = MockAnalysisProvider::new();
    let handler = workspace.handler(&provider);

    handler
        .handle(RunAnalysisCommand::at(at(2024, 4, 8)))
        .await
        .unwrap();

    let err = handler
        .handle(RunAnalysisCommand::at(at(2024, 4, 12)))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        RunAnalysisError::NotAvailable {
            mode: AnalysisMode::Monthly,
            ..
        }
    ));
    assert_eq!(provider.call_count(), 1);

    // The following Monday the week of Apr 7-13 is due.
    let state = workspace
        .state_handler()
        .handle(GetSessionStateQuery { at: at(2024, 4, 15) })
        .await
        .unwrap();
    assert!(state.is_analysis_available);
    assert_eq!(state.date_range_display_text, "Mar Month");
}

#[tokio::test]
async fn failed_request_leaves_history_untouched() {
    let workspace = Workspace::with_entries(&spring_entries());
    let provider = MockAnalysisProvider::new()
        .with_error(AnalysisError::RateLimited)
        .with_response("Calm(1)\n\nRecovered.\n\nScore 77");
    let handler = workspace.handler(&provider);

    let err = handler
        .handle(RunAnalysisCommand::at(at(2024, 4, 3)))
        .await
        .unwrap_err();
    assert!(matches!(err, RunAnalysisError::Provider(AnalysisError::RateLimited)));
    assert!(!workspace.history_path.exists());

    // The user tries again and the window is still open.
    let retry = handler
        .handle(RunAnalysisCommand::at(at(2024, 4, 3)))
        .await
        .unwrap();
    assert_eq!(retry.state.summary_text.as_deref(), Some("Recovered."));
}

#[tokio::test]
async fn state_without_history_shows_due_window() {
    let workspace = Workspace::with_entries(&[]);

    let state = workspace
        .state_handler()
        .handle(GetSessionStateQuery { at: at(2024, 6, 12) })
        .await
        .unwrap();

    assert!(state.is_analysis_available);
    assert_eq!(state.mode, AnalysisMode::Weekly);
    assert_eq!(state.date_range_display_text, "Jun 2 to Jun 8");
    assert!(state.mood_counts.is_empty());
}
