//! Foundation module - Shared domain primitives.
//!
//! Contains identifiers, calendar helpers, and error types that form the
//! vocabulary of the journal analysis domain.

mod calendar;
mod errors;
mod ids;

pub use calendar::{days_since_sunday, first_of_month, last_of_month, same_month, CalendarDay};
pub use errors::{DomainError, ErrorCode};
pub use ids::{AnalysisRecordId, JournalEntryId};
