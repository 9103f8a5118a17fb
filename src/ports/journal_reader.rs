//! Journal reader port - read access to the user's journal entries.

use async_trait::async_trait;

use crate::domain::foundation::DomainError;
use crate::domain::journal::JournalEntry;

/// Reader port for journal entries.
#[async_trait]
pub trait JournalEntryReader: Send + Sync {
    /// Returns every journal entry, in no particular order.
    async fn list_entries(&self) -> Result<Vec<JournalEntry>, DomainError>;
}
