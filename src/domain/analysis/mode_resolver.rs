//! Decides whether a weekly or a monthly analysis is due.

use chrono::Datelike;

use crate::domain::foundation::{last_of_month, same_month, CalendarDay};

use super::window::{AnalysisMode, CalendarWindowCalculator};

/// A Sunday closer than this to its month's last day starts the final week.
const FINAL_WEEK_DAYS: i64 = 7;

/// Resolves the active analysis mode for a reference day.
pub struct AnalysisModeResolver;

impl AnalysisModeResolver {
    /// Returns `Monthly` only when the previous week straddled a month
    /// boundary, the reference day has moved past the Sunday's month, and
    /// that Sunday sat in the final week of its month. `Weekly` otherwise.
    pub fn resolve_mode(reference: impl CalendarDay) -> AnalysisMode {
        let today = reference.calendar_day();
        let previous_week = CalendarWindowCalculator::weekly_window(today);

        if !previous_week.spans_months() {
            return AnalysisMode::Weekly;
        }

        let sunday = previous_week.start();
        if same_month(today, sunday) {
            return AnalysisMode::Weekly;
        }

        match last_of_month(sunday) {
            Some(month_end) if i64::from(month_end.day() - sunday.day()) < FINAL_WEEK_DAYS => {
                AnalysisMode::Monthly
            }
            _ => AnalysisMode::Weekly,
        }
    }
}
