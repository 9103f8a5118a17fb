//! Session state - what the presentation shell shows for the analysis screen.
//!
//! The state is an immutable value recomputed from `(current record, history)`.
//! The shell owns change notification; it re-derives after every new record.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::analysis::{
    AnalysisAvailabilityGate, AnalysisMode, AnalysisRecord, AnalysisWindow,
    CalendarWindowCalculator, MoodCount,
};
use crate::domain::foundation::{AnalysisRecordId, CalendarDay};

/// Display-ready analysis state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    /// Record the displayed fields come from, if any.
    pub current_record: Option<AnalysisRecordId>,
    pub date_range_display_text: String,
    pub mood_counts: Vec<MoodCount>,
    pub wellness_score: Option<u8>,
    pub summary_text: Option<String>,
    /// Whether a new analysis may run for the window due now.
    pub is_analysis_available: bool,
    pub mode: AnalysisMode,
    pub window: AnalysisWindow,
}

impl SessionState {
    /// Derives state at `now`, showing the latest completed record in `history`.
    pub fn derive(now: impl CalendarDay, history: &[AnalysisRecord]) -> Self {
        Self::reduce(now, latest_completed(history), history)
    }

    /// Derives state at `now` for an explicit current record.
    ///
    /// An incomplete `current` shows the window due now with empty fields.
    pub fn reduce(
        now: impl CalendarDay,
        current: Option<&AnalysisRecord>,
        history: &[AnalysisRecord],
    ) -> Self {
        let today: NaiveDate = now.calendar_day();
        let is_analysis_available = AnalysisAvailabilityGate::is_available(today, history);

        match current.filter(|record| record.is_complete()) {
            Some(record) => {
                let window = AnalysisAvailabilityGate::due_window(record.created_at);
                let parsed = record.parsed();
                Self {
                    current_record: Some(record.id),
                    date_range_display_text: CalendarWindowCalculator::format(&window),
                    mood_counts: parsed.mood_counts,
                    wellness_score: parsed.wellness_score,
                    summary_text: parsed.summary,
                    is_analysis_available,
                    mode: window.mode(),
                    window,
                }
            }
            None => {
                let window = AnalysisAvailabilityGate::due_window(today);
                Self {
                    current_record: None,
                    date_range_display_text: CalendarWindowCalculator::format(&window),
                    mood_counts: Vec::new(),
                    wellness_score: None,
                    summary_text: None,
                    is_analysis_available,
                    mode: window.mode(),
                    window,
                }
            }
        }
    }

    /// Whether any analysis is being shown.
    pub fn has_analysis(&self) -> bool {
        self.current_record.is_some()
    }
}

/// Latest record (by creation instant) holding a non-blank response.
pub fn latest_completed(history: &[AnalysisRecord]) -> Option<&AnalysisRecord> {
    history
        .iter()
        .filter(|record| record.is_complete())
        .max_by_key(|record| record.created_at)
}
