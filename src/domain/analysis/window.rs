//! Analysis windows - the calendar periods an analysis summarizes.
//!
//! A window is always a fully elapsed period: the week before the reference
//! day's own week, or the calendar month containing that week's Sunday.

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::{
    days_since_sunday, first_of_month, last_of_month, same_month, CalendarDay,
};

/// The two supported analysis granularities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisMode {
    Weekly,
    Monthly,
}

impl AnalysisMode {
    /// Returns the lowercase label used in requests and stored records.
    pub fn as_str(&self) -> &'static str {
        match self {
            AnalysisMode::Weekly => "weekly",
            AnalysisMode::Monthly => "monthly",
        }
    }
}

impl fmt::Display for AnalysisMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Closed range of calendar days `[start, end]` tagged with its mode.
///
/// Deserialization goes through [`AnalysisWindow::new`], so `start <= end`
/// holds for every value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "WindowBounds")]
pub struct AnalysisWindow {
    start: NaiveDate,
    end: NaiveDate,
    mode: AnalysisMode,
}

/// Unchecked wire form of a window.
#[derive(Deserialize)]
struct WindowBounds {
    start: NaiveDate,
    end: NaiveDate,
    mode: AnalysisMode,
}

impl TryFrom<WindowBounds> for AnalysisWindow {
    type Error = String;

    fn try_from(bounds: WindowBounds) -> Result<Self, Self::Error> {
        AnalysisWindow::new(bounds.start, bounds.end, bounds.mode).ok_or_else(|| {
            format!(
                "window start {} is after end {}",
                bounds.start, bounds.end
            )
        })
    }
}

impl AnalysisWindow {
    /// Creates a window, rejecting ranges whose start is after the end.
    pub fn new(start: NaiveDate, end: NaiveDate, mode: AnalysisMode) -> Option<Self> {
        (start <= end).then_some(Self { start, end, mode })
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    pub fn mode(&self) -> AnalysisMode {
        self.mode
    }

    /// Whether `day` lies inside the window, bounds included.
    pub fn contains(&self, day: impl CalendarDay) -> bool {
        let day = day.calendar_day();
        self.start <= day && day <= self.end
    }

    /// Whether both windows cover exactly the same days.
    pub fn same_bounds(&self, other: &AnalysisWindow) -> bool {
        self.start == other.start && self.end == other.end
    }

    /// Whether the first and last day fall in different months.
    pub fn spans_months(&self) -> bool {
        !same_month(self.start, self.end)
    }

    fn single_day(day: NaiveDate, mode: AnalysisMode) -> Self {
        Self {
            start: day,
            end: day,
            mode,
        }
    }
}

/// Pure window arithmetic and display formatting.
pub struct CalendarWindowCalculator;

impl CalendarWindowCalculator {
    /// Returns the Sunday-to-Saturday week immediately preceding the week
    /// that contains `reference`.
    ///
    /// Falls back to the single reference day if the calendar arithmetic
    /// leaves chrono's supported range.
    pub fn weekly_window(reference: impl CalendarDay) -> AnalysisWindow {
        let today = reference.calendar_day();
        Self::previous_week(today)
            .unwrap_or_else(|| AnalysisWindow::single_day(today, AnalysisMode::Weekly))
    }

    /// Returns the whole calendar month containing the previous week's Sunday.
    ///
    /// When a week straddles two months, the completed month is the one its
    /// Sunday belongs to.
    ///
    /// On arithmetic failure (only possible next to `NaiveDate::MAX`) this
    /// returns the weekly window unchanged, still tagged `Weekly`, so
    /// `window_for(Monthly, d).mode()` is not always `Monthly`.
    pub fn monthly_window(reference: impl CalendarDay) -> AnalysisWindow {
        let weekly = Self::weekly_window(reference);
        Self::month_containing(weekly.start()).unwrap_or(weekly)
    }

    /// Returns the window of the given mode for `reference`.
    pub fn window_for(mode: AnalysisMode, reference: impl CalendarDay) -> AnalysisWindow {
        match mode {
            AnalysisMode::Weekly => Self::weekly_window(reference),
            AnalysisMode::Monthly => Self::monthly_window(reference),
        }
    }

    /// Formats a window as `"Jun 1 to Jun 7"`.
    pub fn format_weekly(window: &AnalysisWindow) -> String {
        format!(
            "{} to {}",
            window.start().format("%b %-d"),
            window.end().format("%b %-d")
        )
    }

    /// Formats a window as `"Jun Month"`, or `"Jun - Jul"` across months.
    pub fn format_monthly(window: &AnalysisWindow) -> String {
        if window.spans_months() {
            format!(
                "{} - {}",
                window.start().format("%b"),
                window.end().format("%b")
            )
        } else {
            format!("{} Month", window.start().format("%b"))
        }
    }

    /// Formats a window according to its own mode.
    pub fn format(window: &AnalysisWindow) -> String {
        match window.mode() {
            AnalysisMode::Weekly => Self::format_weekly(window),
            AnalysisMode::Monthly => Self::format_monthly(window),
        }
    }

    fn previous_week(today: NaiveDate) -> Option<AnalysisWindow> {
        let start = today.checked_sub_days(Days::new(days_since_sunday(today) + 7))?;
        let end = start.checked_add_days(Days::new(6))?;
        AnalysisWindow::new(start, end, AnalysisMode::Weekly)
    }

    fn month_containing(day: NaiveDate) -> Option<AnalysisWindow> {
        AnalysisWindow::new(
            first_of_month(day)?,
            last_of_month(day)?,
            AnalysisMode::Monthly,
        )
    }
}
