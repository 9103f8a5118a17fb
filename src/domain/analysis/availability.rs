//! Availability Gate - Never analyze the same window twice.

use crate::domain::foundation::CalendarDay;

use super::mode_resolver::AnalysisModeResolver;
use super::record::AnalysisRecord;
use super::window::{AnalysisWindow, CalendarWindowCalculator};

/// Decides whether a new analysis may run for the window due now.
pub struct AnalysisAvailabilityGate;

impl AnalysisAvailabilityGate {
    /// Returns the window, tagged with its mode, that is due at `reference`.
    pub fn due_window(reference: impl CalendarDay) -> AnalysisWindow {
        let today = reference.calendar_day();
        let mode = AnalysisModeResolver::resolve_mode(today);
        CalendarWindowCalculator::window_for(mode, today)
    }

    /// Whether `record` already covers `window`.
    ///
    /// Incomplete records (absent or blank response) never cover anything.
    pub fn covers(record: &AnalysisRecord, window: &AnalysisWindow) -> bool {
        if !record.is_complete() {
            return false;
        }
        let record_window = Self::due_window(record.created_at);
        record_window.mode() == window.mode() && record_window.same_bounds(window)
    }

    /// True iff no completed record in `history` covers the window due at `reference`.
    pub fn is_available<'a, I>(reference: impl CalendarDay, history: I) -> bool
    where
        I: IntoIterator<Item = &'a AnalysisRecord>,
    {
        let window = Self::due_window(reference);
        !history
            .into_iter()
            .any(|record| Self::covers(record, &window))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::analysis::AnalysisMode;
    use chrono::{DateTime, FixedOffset, NaiveDate, TimeZone};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn at(y: i32, m: u32, d: u32) -> DateTime<FixedOffset> {
        FixedOffset::east_opt(2 * 3600)
            .unwrap()
            .with_ymd_and_hms(y, m, d, 19, 45, 0)
            .unwrap()
    }

    fn completed(y: i32, m: u32, d: u32) -> AnalysisRecord {
        let mode = AnalysisModeResolver::resolve_mode(at(y, m, d));
        AnalysisRecord::completed(at(y, m, d), mode, "Calm(2)\n\nSteady.\n\nScore 80")
    }

    #[test]
    fn available_with_empty_history() {
        let history: Vec<AnalysisRecord> = Vec::new();
        assert!(AnalysisAvailabilityGate::is_available(date(2024, 6, 12), &history));
    }

    #[test]
    fn unavailable_after_analysis_in_same_week() {
        let history = vec![completed(2024, 6, 10)];
        assert!(!AnalysisAvailabilityGate::is_available(date(2024, 6, 13), &history));
    }

    #[test]
    fn available_again_the_following_week() {
        let history = vec![completed(2024, 6, 10)];
        assert!(AnalysisAvailabilityGate::is_available(date(2024, 6, 16), &history));
    }

    #[test]
    fn blank_records_do_not_cover() {
        let mut failed = completed(2024, 6, 10);
        failed.raw_response_text = Some("   ".to_string());
        let mut missing = completed(2024, 6, 11);
        missing.raw_response_text = None;

        let history = vec![failed, missing];
        assert!(AnalysisAvailabilityGate::is_available(date(2024, 6, 13), &history));
    }

    #[test]
    fn records_for_other_windows_do_not_cover() {
        let history = vec![completed(2024, 5, 29), completed(2024, 6, 20)];
        assert!(AnalysisAvailabilityGate::is_available(date(2024, 6, 12), &history));
    }

    #[test]
    fn monthly_analysis_runs_once_per_qualifying_week() {
        // April 7th-13th 2024 are monthly days for March.
        let history = vec![completed(2024, 4, 8)];

        assert_eq!(
            AnalysisAvailabilityGate::due_window(date(2024, 4, 11)).mode(),
            AnalysisMode::Monthly
        );
        assert!(!AnalysisAvailabilityGate::is_available(date(2024, 4, 11), &history));
        // The next week is weekly again and not yet covered.
        assert!(AnalysisAvailabilityGate::is_available(date(2024, 4, 14), &history));
    }

    #[test]
    fn weekly_record_does_not_cover_monthly_window() {
        // A weekly analysis made on Saturday April 6th covers Mar 24th - 30th only.
        let history = vec![completed(2024, 4, 6)];
        assert!(AnalysisAvailabilityGate::is_available(date(2024, 4, 7), &history));
    }

    #[test]
    fn due_window_matches_resolved_mode() {
        let window = AnalysisAvailabilityGate::due_window(date(2024, 4, 9));
        assert_eq!(window.mode(), AnalysisMode::Monthly);
        assert_eq!(window.start(), date(2024, 3, 1));
        assert_eq!(window.end(), date(2024, 3, 31));
    }
}
