//! Journal Insights - Period analysis engine for journal entries
//!
//! Decides whether a weekly or monthly analysis is due, computes the exact
//! calendar window, deduplicates against earlier analyses, and parses the
//! language model's free-text reply into a mood tally, wellness score and
//! summary.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
