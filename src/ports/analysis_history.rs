//! Analysis history port - storage of completed analysis records.
//!
//! The domain only reads records; the application layer appends a new one
//! after each successful provider call.

use async_trait::async_trait;

use crate::domain::analysis::AnalysisRecord;
use crate::domain::foundation::DomainError;

/// Repository port for analysis records.
#[async_trait]
pub trait AnalysisHistoryRepository: Send + Sync {
    /// Returns every stored record, in no particular order.
    async fn list(&self) -> Result<Vec<AnalysisRecord>, DomainError>;

    /// Stores a new record.
    async fn append(&self, record: &AnalysisRecord) -> Result<(), DomainError>;
}
