//! GetSessionStateHandler - Query handler for the current analysis state.

use chrono::{DateTime, FixedOffset};
use std::sync::Arc;
use tracing::debug;

use crate::application::session::SessionState;
use crate::domain::foundation::DomainError;
use crate::ports::AnalysisHistoryRepository;

/// Query for the session state at `at`.
#[derive(Debug, Clone)]
pub struct GetSessionStateQuery {
    pub at: DateTime<FixedOffset>,
}

/// Handler for session state queries.
pub struct GetSessionStateHandler {
    history: Arc<dyn AnalysisHistoryRepository>,
}

impl GetSessionStateHandler {
    pub fn new(history: Arc<dyn AnalysisHistoryRepository>) -> Self {
        Self { history }
    }

    pub async fn handle(&self, query: GetSessionStateQuery) -> Result<SessionState, DomainError> {
        let records = self.history.list().await?;
        let state = SessionState::derive(query.at, &records);

        debug!(
            records = records.len(),
            mode = %state.mode,
            available = state.is_analysis_available,
            "Derived session state"
        );
        Ok(state)
    }
}
