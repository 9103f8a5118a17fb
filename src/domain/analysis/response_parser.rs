//! Response Parser - Lenient extraction of typed fields from model text.
//!
//! The model is asked for paragraphs separated by a blank line:
//!
//! 1. a mood tally such as `Joyful(3), Anxious(2)`
//! 2. a summary with guidance
//! 3. closing remarks ending in a two-digit wellness score
//!
//! Nothing here fails. A field that cannot be found is simply absent.

use serde::{Deserialize, Serialize};

const PARAGRAPH_SEPARATOR: &str = "\n\n";

/// One mood label and how many times it was tallied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoodCount {
    /// Left-to-right position among the parsed moods.
    pub order: usize,
    pub mood: String,
    pub count: i64,
}

/// Fields parsed from one raw response. Recomputed on demand, never stored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedAnalysis {
    pub mood_counts: Vec<MoodCount>,
    pub wellness_score: Option<u8>,
    pub summary: Option<String>,
}

/// Stateless parser for free-text analysis responses.
pub struct ResponseParser;

impl ResponseParser {
    /// Parses all three fields at once.
    pub fn parse(response: &str) -> ParsedAnalysis {
        ParsedAnalysis {
            mood_counts: Self::parse_mood_counts(response),
            wellness_score: Self::parse_wellness_score(response),
            summary: Self::parse_summary(response),
        }
    }

    /// Parses `Mood(count)` items from the first paragraph.
    ///
    /// Items are comma-separated. The last `(` and last `)` delimit the
    /// count, so parentheses inside a mood label are tolerated. Items without
    /// a numeric count are skipped; an empty label is kept as-is.
    pub fn parse_mood_counts(response: &str) -> Vec<MoodCount> {
        let Some(first) = paragraphs(response).into_iter().next() else {
            return Vec::new();
        };

        first
            .split(',')
            .filter_map(parse_mood_item)
            .enumerate()
            .map(|(order, (mood, count))| MoodCount { order, mood, count })
            .collect()
    }

    /// Scrapes the wellness score from the final paragraph.
    ///
    /// Collects every decimal digit in that paragraph and reads the last two
    /// as a number in 00-99. Fewer than two digits means no score.
    pub fn parse_wellness_score(response: &str) -> Option<u8> {
        let last = paragraphs(response).pop()?;
        let digits: Vec<u8> = last
            .chars()
            .filter_map(|c| c.to_digit(10))
            .map(|d| d as u8)
            .collect();

        match digits.as_slice() {
            [.., tens, ones] => Some(tens * 10 + ones),
            _ => None,
        }
    }

    /// Returns the trimmed second paragraph, if there is a non-blank one.
    pub fn parse_summary(response: &str) -> Option<String> {
        let paragraphs = paragraphs(response);
        if paragraphs.len() < 2 {
            return None;
        }

        let summary = paragraphs[1].trim();
        (!summary.is_empty()).then(|| summary.to_string())
    }
}

/// Splits trimmed text on blank-line separators. Empty input has no paragraphs.
///
/// Lines holding only whitespace count as blank. Line endings are normalized
/// to `\n` first.
fn paragraphs(response: &str) -> Vec<String> {
    let normalized = response
        .lines()
        .map(|line| if line.trim().is_empty() { "" } else { line })
        .collect::<Vec<_>>()
        .join("\n");
    let trimmed = normalized.trim();
    if trimmed.is_empty() {
        return Vec::new();
    }
    trimmed
        .split(PARAGRAPH_SEPARATOR)
        .map(str::to_string)
        .collect()
}

fn parse_mood_item(item: &str) -> Option<(String, i64)> {
    let open = item.rfind('(')?;
    let close = item.rfind(')')?;
    if open >= close {
        return None;
    }

    let mood = item[..open].trim();
    let count = item[open + 1..close].trim().parse::<i64>().ok()?;

    Some((mood.to_string(), count))
}
