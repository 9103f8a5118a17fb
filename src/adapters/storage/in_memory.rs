//! In-Memory Storage Adapters
//!
//! Analysis history and journal entries held in memory.
//! Useful for testing and for embedding in a shell that owns persistence.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::analysis::AnalysisRecord;
use crate::domain::foundation::DomainError;
use crate::domain::journal::JournalEntry;
use crate::ports::{AnalysisHistoryRepository, JournalEntryReader};

/// In-memory analysis history.
#[derive(Debug, Clone, Default)]
pub struct InMemoryAnalysisHistory {
    records: Arc<RwLock<Vec<AnalysisRecord>>>,
}

impl InMemoryAnalysisHistory {
    /// Create an empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a history pre-filled with `records`.
    pub fn with_records(records: Vec<AnalysisRecord>) -> Self {
        Self {
            records: Arc::new(RwLock::new(records)),
        }
    }

    /// Get the number of stored records
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    /// Whether no records are stored
    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

#[async_trait]
impl AnalysisHistoryRepository for InMemoryAnalysisHistory {
    async fn list(&self) -> Result<Vec<AnalysisRecord>, DomainError> {
        Ok(self.records.read().await.clone())
    }

    async fn append(&self, record: &AnalysisRecord) -> Result<(), DomainError> {
        self.records.write().await.push(record.clone());
        Ok(())
    }
}

/// In-memory journal.
#[derive(Debug, Clone, Default)]
pub struct InMemoryJournal {
    entries: Arc<RwLock<Vec<JournalEntry>>>,
}

impl InMemoryJournal {
    /// Create an empty journal.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a journal pre-filled with `entries`.
    pub fn with_entries(entries: Vec<JournalEntry>) -> Self {
        Self {
            entries: Arc::new(RwLock::new(entries)),
        }
    }

    /// Add an entry.
    pub async fn add(&self, entry: JournalEntry) {
        self.entries.write().await.push(entry);
    }
}

#[async_trait]
impl JournalEntryReader for InMemoryJournal {
    async fn list_entries(&self) -> Result<Vec<JournalEntry>, DomainError> {
        Ok(self.entries.read().await.clone())
    }
}
