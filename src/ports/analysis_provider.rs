//! Analysis Provider Port - Interface for the language-model API.
//!
//! The provider receives one prompt per user-initiated analysis and returns
//! the model's free text. It performs a single best-effort request: no
//! retries, no streaming, no request deduplication.
//!
//! # Example
//!
//! ```ignore
//! use async_trait::async_trait;
//!
//! struct FixedProvider;
//!
//! #[async_trait]
//! impl AnalysisProvider for FixedProvider {
//!     async fn request_analysis(&self, request: AnalysisRequest) -> Result<AnalysisResponse, AnalysisError> {
//!         Ok(AnalysisResponse::new("Calm(3)\n\nA steady week.\n\nScore 82"))
//!     }
//!
//!     fn provider_info(&self) -> ProviderInfo {
//!         ProviderInfo::new("fixed", "fixed-model")
//!     }
//! }
//! ```

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::analysis::{AnalysisMode, AnalysisPrompt};

/// Port for language-model analysis requests.
#[async_trait]
pub trait AnalysisProvider: Send + Sync {
    /// Sends one analysis request and returns the model's text.
    async fn request_analysis(
        &self,
        request: AnalysisRequest,
    ) -> Result<AnalysisResponse, AnalysisError>;

    /// Get provider information (name, model).
    fn provider_info(&self) -> ProviderInfo;
}

/// Request for one period analysis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisRequest {
    /// Format instructions for the model.
    pub instructions: String,
    /// Journal material for the window.
    pub prompt: String,
    /// Which kind of analysis this is.
    pub analysis_kind: AnalysisMode,
}

impl AnalysisRequest {
    /// Creates a request from raw parts.
    pub fn new(
        instructions: impl Into<String>,
        prompt: impl Into<String>,
        analysis_kind: AnalysisMode,
    ) -> Self {
        Self {
            instructions: instructions.into(),
            prompt: prompt.into(),
            analysis_kind,
        }
    }
}

impl From<AnalysisPrompt> for AnalysisRequest {
    fn from(prompt: AnalysisPrompt) -> Self {
        Self {
            instructions: prompt.instructions,
            prompt: prompt.input,
            analysis_kind: prompt.mode,
        }
    }
}

/// Successful model reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResponse {
    pub text: String,
}

impl AnalysisResponse {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// Provider information.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderInfo {
    /// Provider name (e.g., "openai").
    pub name: String,
    /// Model identifier (e.g., "gpt-4o-mini", "o3-mini").
    pub model: String,
}

impl ProviderInfo {
    /// Creates new provider info.
    pub fn new(name: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            model: model.into(),
        }
    }
}

/// Analysis provider errors, surfaced unmodified to the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AnalysisError {
    /// The account has run out of credit.
    #[error("quota exceeded")]
    QuotaExceeded,

    /// Too many requests in a short period.
    #[error("rate limited")]
    RateLimited,

    /// API key missing, wrong or revoked.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// Network failure, timeout or unexpected HTTP status.
    #[error("transport error: {0}")]
    Transport(String),

    /// The reply could not be read as analysis text.
    #[error("malformed response: {0}")]
    MalformedResponse(String),
}

impl AnalysisError {
    /// Creates a transport error.
    pub fn transport(detail: impl Into<String>) -> Self {
        Self::Transport(detail.into())
    }

    /// Creates a malformed response error.
    pub fn malformed(detail: impl Into<String>) -> Self {
        Self::MalformedResponse(detail.into())
    }

    /// Returns true if the user can fix this themselves (billing or API key).
    pub fn is_user_actionable(&self) -> bool {
        matches!(
            self,
            AnalysisError::QuotaExceeded | AnalysisError::InvalidCredentials
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_from_prompt_keeps_all_parts() {
        let prompt = AnalysisPrompt {
            instructions: "format".to_string(),
            input: "entries".to_string(),
            mode: AnalysisMode::Monthly,
        };

        let request = AnalysisRequest::from(prompt);
        assert_eq!(request, AnalysisRequest::new("format", "entries", AnalysisMode::Monthly));
    }

    #[test]
    fn analysis_error_displays_correctly() {
        assert_eq!(AnalysisError::QuotaExceeded.to_string(), "quota exceeded");
        assert_eq!(
            AnalysisError::transport("connection reset").to_string(),
            "transport error: connection reset"
        );
        assert_eq!(
            AnalysisError::malformed("no text").to_string(),
            "malformed response: no text"
        );
    }

    #[test]
    fn analysis_error_user_actionable_classification() {
        assert!(AnalysisError::QuotaExceeded.is_user_actionable());
        assert!(AnalysisError::InvalidCredentials.is_user_actionable());

        assert!(!AnalysisError::RateLimited.is_user_actionable());
        assert!(!AnalysisError::transport("timeout").is_user_actionable());
        assert!(!AnalysisError::malformed("empty").is_user_actionable());
    }

    #[test]
    fn provider_info_builder_works() {
        let info = ProviderInfo::new("openai", "gpt-4o-mini");
        assert_eq!(info.name, "openai");
        assert_eq!(info.model, "gpt-4o-mini");
    }
}
