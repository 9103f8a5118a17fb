//! Storage adapters for analysis history and journal entries.
//!
//! - `FileAnalysisHistory` / `FileJournalReader` - JSON files on disk
//! - `InMemoryAnalysisHistory` / `InMemoryJournal` - in-memory, for tests

mod in_memory;
mod json_file;

pub use in_memory::{InMemoryAnalysisHistory, InMemoryJournal};
pub use json_file::{FileAnalysisHistory, FileJournalReader};
