//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `ai` - Language-model providers (OpenAI-compatible, mock)
//! - `storage` - Analysis history and journal storage (JSON files, in-memory)

pub mod ai;
pub mod storage;

pub use ai::{MockAnalysisProvider, ModelFamily, OpenAIConfig, OpenAIProvider, ReasoningEffort};
pub use storage::{FileAnalysisHistory, FileJournalReader, InMemoryAnalysisHistory, InMemoryJournal};
