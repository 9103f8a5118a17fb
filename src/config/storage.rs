//! Storage configuration

use serde::Deserialize;
use std::path::PathBuf;

use super::error::ValidationError;

/// Locations of the JSON files backing history and journal
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Analysis history file
    #[serde(default = "default_history_path")]
    pub history_path: PathBuf,

    /// Journal entries file (read-only)
    #[serde(default = "default_journal_path")]
    pub journal_path: PathBuf,
}

impl StorageConfig {
    /// Validate storage configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.history_path.as_os_str().is_empty() {
            return Err(ValidationError::EmptyPath("STORAGE__HISTORY_PATH"));
        }
        if self.journal_path.as_os_str().is_empty() {
            return Err(ValidationError::EmptyPath("STORAGE__JOURNAL_PATH"));
        }
        Ok(())
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            history_path: default_history_path(),
            journal_path: default_journal_path(),
        }
    }
}

fn default_history_path() -> PathBuf {
    PathBuf::from("analysis_history.json")
}

fn default_journal_path() -> PathBuf {
    PathBuf::from("journal_entries.json")
}
