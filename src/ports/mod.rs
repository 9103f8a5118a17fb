//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `AnalysisProvider` - Language-model request collaborator
//! - `AnalysisHistoryRepository` - Storage of past analysis records
//! - `JournalEntryReader` - Source of journal entries

mod analysis_history;
mod analysis_provider;
mod journal_reader;

pub use analysis_history::AnalysisHistoryRepository;
pub use analysis_provider::{
    AnalysisError, AnalysisProvider, AnalysisRequest, AnalysisResponse, ProviderInfo,
};
pub use journal_reader::JournalEntryReader;
