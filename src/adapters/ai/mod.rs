//! Analysis Provider Adapters.
//!
//! Implementations of the AnalysisProvider port.
//!
//! ## Available Adapters
//!
//! - `OpenAIProvider` - OpenAI-compatible chat and reasoning endpoints
//! - `MockAnalysisProvider` - Configurable mock for testing

mod mock_provider;
mod openai_provider;
mod response_text;

pub use mock_provider::MockAnalysisProvider;
pub use openai_provider::{ModelFamily, OpenAIConfig, OpenAIProvider, ReasoningEffort};
pub use response_text::{extract_text, parse_body, TextExtractor, EXTRACTORS};
