//! JSON-file Storage Adapters
//!
//! Stores analysis records and journal entries as JSON arrays on disk.
//! A missing file reads as an empty list. Writes go to a sibling temp file
//! that is then renamed over the original.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::sync::Mutex;
use tracing::debug;

use crate::domain::analysis::AnalysisRecord;
use crate::domain::foundation::DomainError;
use crate::domain::journal::JournalEntry;
use crate::ports::{AnalysisHistoryRepository, JournalEntryReader};

/// File-backed analysis history.
#[derive(Debug)]
pub struct FileAnalysisHistory {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FileAnalysisHistory {
    /// Create a history stored at `path`.
    ///
    /// # Example
    /// ```ignore
    /// let history = FileAnalysisHistory::new("./data/analysis_history.json");
    /// ```
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            write_lock: Mutex::new(()),
        }
    }
}

#[async_trait]
impl AnalysisHistoryRepository for FileAnalysisHistory {
    async fn list(&self) -> Result<Vec<AnalysisRecord>, DomainError> {
        read_json_list(&self.path).await
    }

    async fn append(&self, record: &AnalysisRecord) -> Result<(), DomainError> {
        let _guard = self.write_lock.lock().await;

        let mut records: Vec<AnalysisRecord> = read_json_list(&self.path).await?;
        records.push(record.clone());
        write_json_list(&self.path, &records).await?;

        debug!(
            record_id = %record.id,
            total = records.len(),
            path = %self.path.display(),
            "Appended analysis record"
        );
        Ok(())
    }
}

/// File-backed, read-only journal.
#[derive(Debug, Clone)]
pub struct FileJournalReader {
    path: PathBuf,
}

impl FileJournalReader {
    /// Create a reader for the journal stored at `path`.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

#[async_trait]
impl JournalEntryReader for FileJournalReader {
    async fn list_entries(&self) -> Result<Vec<JournalEntry>, DomainError> {
        read_json_list(&self.path).await
    }
}

async fn read_json_list<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, DomainError> {
    let json = match fs::read_to_string(path).await {
        Ok(json) => json,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!(path = %path.display(), "Storage file missing, treating as empty");
            return Ok(Vec::new());
        }
        Err(e) => {
            return Err(DomainError::storage(format!("Failed to read file: {}", e))
                .with_detail("path", path.display().to_string()))
        }
    };

    if json.trim().is_empty() {
        return Ok(Vec::new());
    }

    serde_json::from_str(&json).map_err(|e| {
        DomainError::serialization(format!("Failed to parse file: {}", e))
            .with_detail("path", path.display().to_string())
    })
}

async fn write_json_list<T: Serialize>(path: &Path, items: &[T]) -> Result<(), DomainError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to create directory: {}", e)))?;
    }

    let json = serde_json::to_string_pretty(items)
        .map_err(|e| DomainError::serialization(format!("Failed to serialize: {}", e)))?;

    let tmp_path = path.with_extension("json.tmp");
    fs::write(&tmp_path, json)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to write file: {}", e)))?;
    fs::rename(&tmp_path, path)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to replace file: {}", e)))?;

    Ok(())
}
