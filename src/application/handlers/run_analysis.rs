//! RunAnalysisHandler - Command handler for producing a new period analysis.

use chrono::{DateTime, FixedOffset};
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::application::session::SessionState;
use crate::domain::analysis::{
    entries_in_window, AnalysisAvailabilityGate, AnalysisMode, AnalysisPrompt, AnalysisRecord,
    AnalysisWindow, CalendarWindowCalculator,
};
use crate::domain::foundation::DomainError;
use crate::ports::{
    AnalysisError, AnalysisHistoryRepository, AnalysisProvider, AnalysisRequest,
    JournalEntryReader,
};

/// Command to run the analysis that is due at `requested_at`.
#[derive(Debug, Clone)]
pub struct RunAnalysisCommand {
    pub requested_at: DateTime<FixedOffset>,
    /// Send the request even when the window holds no journal entries.
    pub allow_empty: bool,
}

impl RunAnalysisCommand {
    pub fn at(requested_at: DateTime<FixedOffset>) -> Self {
        Self {
            requested_at,
            allow_empty: false,
        }
    }

    pub fn allowing_empty(mut self) -> Self {
        self.allow_empty = true;
        self
    }
}

/// Result of a successful analysis.
#[derive(Debug, Clone)]
pub struct RunAnalysisResult {
    pub record: AnalysisRecord,
    pub state: SessionState,
}

/// Errors from running an analysis.
#[derive(Debug, thiserror::Error)]
pub enum RunAnalysisError {
    #[error("{mode} analysis already completed for {}", CalendarWindowCalculator::format(.window))]
    NotAvailable {
        mode: AnalysisMode,
        window: AnalysisWindow,
    },

    #[error("no journal entries for {}", CalendarWindowCalculator::format(.window))]
    NoEntries { window: AnalysisWindow },

    #[error(transparent)]
    Provider(#[from] AnalysisError),

    #[error(transparent)]
    Storage(#[from] DomainError),
}

/// Handler for running analyses.
pub struct RunAnalysisHandler {
    history: Arc<dyn AnalysisHistoryRepository>,
    journal: Arc<dyn JournalEntryReader>,
    provider: Arc<dyn AnalysisProvider>,
}

impl RunAnalysisHandler {
    pub fn new(
        history: Arc<dyn AnalysisHistoryRepository>,
        journal: Arc<dyn JournalEntryReader>,
        provider: Arc<dyn AnalysisProvider>,
    ) -> Self {
        Self {
            history,
            journal,
            provider,
        }
    }

    pub async fn handle(
        &self,
        cmd: RunAnalysisCommand,
    ) -> Result<RunAnalysisResult, RunAnalysisError> {
        // 1. Gate on history
        let mut records = self.history.list().await?;
        let window = AnalysisAvailabilityGate::due_window(cmd.requested_at);

        if !AnalysisAvailabilityGate::is_available(cmd.requested_at, &records) {
            debug!(
                mode = %window.mode(),
                start = %window.start(),
                end = %window.end(),
                "Analysis already completed for due window"
            );
            return Err(RunAnalysisError::NotAvailable {
                mode: window.mode(),
                window,
            });
        }

        // 2. Gather the window's entries
        let entries = self.journal.list_entries().await?;
        let entry_count = entries_in_window(&window, &entries);
        if entry_count == 0 && !cmd.allow_empty {
            return Err(RunAnalysisError::NoEntries { window });
        }

        // 3. Ask the model once
        let prompt = AnalysisPrompt::build(&window, &entries);
        let provider = self.provider.provider_info();
        info!(
            mode = %window.mode(),
            start = %window.start(),
            end = %window.end(),
            entries = entry_count,
            provider = %provider.name,
            model = %provider.model,
            "Requesting analysis"
        );

        let response = self
            .provider
            .request_analysis(AnalysisRequest::from(prompt))
            .await
            .map_err(|e| {
                warn!(error = %e, user_actionable = e.is_user_actionable(), "Analysis request failed");
                e
            })?;

        if response.text.trim().is_empty() {
            return Err(AnalysisError::malformed("empty analysis text").into());
        }

        // 4. Record the result
        let record = AnalysisRecord::completed(cmd.requested_at, window.mode(), response.text);
        self.history.append(&record).await?;
        records.push(record.clone());

        info!(record_id = %record.id, mode = %window.mode(), "Analysis recorded");

        let state = SessionState::reduce(cmd.requested_at, Some(&record), &records);
        Ok(RunAnalysisResult { record, state })
    }
}
