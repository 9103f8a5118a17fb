//! Journal entries - the raw material an analysis summarizes.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use crate::domain::foundation::JournalEntryId;

/// A single journal entry written by the user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JournalEntry {
    pub id: JournalEntryId,
    pub created_at: DateTime<FixedOffset>,
    pub content: String,
    /// Free-form category chosen by the user (e.g. "gratitude", "prayer").
    #[serde(default)]
    pub entry_type: String,
}

impl JournalEntry {
    /// Creates a new entry with a fresh id.
    pub fn new(
        created_at: DateTime<FixedOffset>,
        content: impl Into<String>,
        entry_type: impl Into<String>,
    ) -> Self {
        Self {
            id: JournalEntryId::new(),
            created_at,
            content: content.into(),
            entry_type: entry_type.into(),
        }
    }

    /// Whether the entry has any non-whitespace content.
    pub fn is_blank(&self) -> bool {
        self.content.trim().is_empty()
    }
}
