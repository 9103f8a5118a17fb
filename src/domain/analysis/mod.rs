//! Analysis Module - Pure domain services for period analyses.
//!
//! # Components
//!
//! - `CalendarWindowCalculator` - Weekly/monthly window boundaries and display text
//! - `AnalysisModeResolver` - Which mode is due for a reference day
//! - `ResponseParser` - Mood tally, wellness score and summary from model text
//! - `AnalysisAvailabilityGate` - Deduplication against previous analyses
//! - `AnalysisPrompt` - Request text for a window's journal entries
//!
//! # Design Philosophy
//!
//! All functions are pure and total. They take dates, records and text as
//! input and return computed results; no I/O, no logging, no errors.

mod availability;
mod mode_resolver;
mod prompt;
mod record;
mod response_parser;
mod window;

pub use availability::AnalysisAvailabilityGate;
pub use mode_resolver::AnalysisModeResolver;
pub use prompt::{entries_in_window, AnalysisPrompt, WELLNESS_SCORE_MAX, WELLNESS_SCORE_MIN};
pub use record::AnalysisRecord;
pub use response_parser::{MoodCount, ParsedAnalysis, ResponseParser};
pub use window::{AnalysisMode, AnalysisWindow, CalendarWindowCalculator};
