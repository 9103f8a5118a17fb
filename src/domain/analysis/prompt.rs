//! Prompt construction for period analyses.
//!
//! The instructions pin down the paragraph layout that `ResponseParser`
//! reads back, so the two must change together.

use super::window::{AnalysisMode, AnalysisWindow, CalendarWindowCalculator};
use crate::domain::journal::JournalEntry;

/// Lowest wellness score the model is told to use.
pub const WELLNESS_SCORE_MIN: u8 = 60;
/// Highest wellness score the model is told to use.
pub const WELLNESS_SCORE_MAX: u8 = 100;

/// Instructions and input for one analysis request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisPrompt {
    /// System-level instructions describing the response format.
    pub instructions: String,
    /// The journal material for the window.
    pub input: String,
    pub mode: AnalysisMode,
}

impl AnalysisPrompt {
    /// Builds the prompt for `window` from the entries that fall inside it.
    ///
    /// Entries outside the window and blank entries are left out; the rest
    /// are listed oldest first.
    pub fn build<'a, I>(window: &AnalysisWindow, entries: I) -> Self
    where
        I: IntoIterator<Item = &'a JournalEntry>,
    {
        let selected = select_entries(window, entries);

        let period = match window.mode() {
            AnalysisMode::Weekly => "week",
            AnalysisMode::Monthly => "month",
        };

        let instructions = format!(
            r#"You are a gentle journaling companion. Read the user's journal entries for the past {period} ({range}) and reply in exactly three paragraphs separated by a blank line:

1. A mood tally on one line, as comma-separated items in the form Mood(count), for example: Joyful(3), Anxious(2), Hopeful(5)
2. A short summary of the {period} with one or two pieces of encouragement or guidance.
3. A closing remark that ends with a wellness score between {min} and {max}.

Do not use headings, lists, or any other numbers in the closing remark."#,
            period = period,
            range = CalendarWindowCalculator::format(window),
            min = WELLNESS_SCORE_MIN,
            max = WELLNESS_SCORE_MAX,
        );

        let input = if selected.is_empty() {
            format!("No journal entries were written this {}.", period)
        } else {
            selected
                .iter()
                .map(|entry| format_entry(entry))
                .collect::<Vec<_>>()
                .join("\n\n")
        };

        Self {
            instructions,
            input,
            mode: window.mode(),
        }
    }
}

/// Counts entries that would be included in the prompt for `window`.
pub fn entries_in_window<'a, I>(window: &AnalysisWindow, entries: I) -> usize
where
    I: IntoIterator<Item = &'a JournalEntry>,
{
    select_entries(window, entries).len()
}

fn select_entries<'a, I>(window: &AnalysisWindow, entries: I) -> Vec<&'a JournalEntry>
where
    I: IntoIterator<Item = &'a JournalEntry>,
{
    let mut selected: Vec<&JournalEntry> = entries
        .into_iter()
        .filter(|entry| !entry.is_blank() && window.contains(entry.created_at))
        .collect();
    selected.sort_by_key(|entry| entry.created_at);
    selected
}

fn format_entry(entry: &JournalEntry) -> String {
    let date = entry.created_at.format("%a %b %-d");
    if entry.entry_type.trim().is_empty() {
        format!("[{}]\n{}", date, entry.content.trim())
    } else {
        format!("[{} - {}]\n{}", date, entry.entry_type.trim(), entry.content.trim())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, FixedOffset, NaiveDate, TimeZone};

    fn at(y: i32, m: u32, d: u32, h: u32) -> DateTime<FixedOffset> {
        FixedOffset::west_opt(4 * 3600)
            .unwrap()
            .with_ymd_and_hms(y, m, d, h, 0, 0)
            .unwrap()
    }

    fn week_of_june_2nd() -> AnalysisWindow {
        AnalysisWindow::new(
            NaiveDate::from_ymd_opt(2024, 6, 2).unwrap(),
            NaiveDate::from_ymd_opt(2024, 6, 8).unwrap(),
            AnalysisMode::Weekly,
        )
        .unwrap()
    }

    #[test]
    fn prompt_lists_entries_in_window_oldest_first() {
        let entries = vec![
            JournalEntry::new(at(2024, 6, 8, 21), "Quiet Saturday", "reflection"),
            JournalEntry::new(at(2024, 6, 2, 7), "Started the week rested", ""),
            JournalEntry::new(at(2024, 6, 9, 8), "Next week already", ""),
            JournalEntry::new(at(2024, 6, 1, 23), "Last week", ""),
        ];

        let prompt = AnalysisPrompt::build(&week_of_june_2nd(), &entries);

        assert_eq!(
            prompt.input,
            "[Sun Jun 2]\nStarted the week rested\n\n[Sat Jun 8 - reflection]\nQuiet Saturday"
        );
        assert_eq!(prompt.mode, AnalysisMode::Weekly);
    }

    #[test]
    fn prompt_skips_blank_entries() {
        let entries = vec![JournalEntry::new(at(2024, 6, 4, 12), "   ", "")];
        let prompt = AnalysisPrompt::build(&week_of_june_2nd(), &entries);

        assert_eq!(prompt.input, "No journal entries were written this week.");
        assert_eq!(entries_in_window(&week_of_june_2nd(), &entries), 0);
    }

    #[test]
    fn instructions_describe_parser_layout() {
        let prompt = AnalysisPrompt::build(&week_of_june_2nd(), &Vec::<JournalEntry>::new());

        assert!(prompt.instructions.contains("Jun 2 to Jun 8"));
        assert!(prompt.instructions.contains("Mood(count)"));
        assert!(prompt.instructions.contains("between 60 and 100"));
    }

    #[test]
    fn monthly_prompt_mentions_month() {
        let window = AnalysisWindow::new(
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 3, 31).unwrap(),
            AnalysisMode::Monthly,
        )
        .unwrap();

        let prompt = AnalysisPrompt::build(&window, &Vec::<JournalEntry>::new());
        assert!(prompt.instructions.contains("past month (Mar Month)"));
        assert_eq!(prompt.input, "No journal entries were written this month.");
    }
}
