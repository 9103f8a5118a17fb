//! OpenAI Provider - Implementation of AnalysisProvider for OpenAI-compatible APIs.
//!
//! Two model families are supported, each with its own request shape:
//!
//! - `Chat` models via `POST {base_url}/chat/completions`
//! - `Reasoning` models via `POST {base_url}/responses`
//!
//! # Configuration
//!
//! ```ignore
//! let config = OpenAIConfig::new(api_key)
//!     .with_model("o3-mini")
//!     .with_model_family(ModelFamily::Reasoning);
//!
//! let provider = OpenAIProvider::new(config)?;
//! ```
//!
//! Responses are read through the extractor chain in `response_text`, so
//! string content, block arrays and streamed deltas are all accepted.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

use super::response_text::{extract_text, parse_body};
use crate::ports::{AnalysisError, AnalysisProvider, AnalysisRequest, AnalysisResponse, ProviderInfo};

/// Longest slice of an error body carried into a transport error.
const ERROR_BODY_PREVIEW: usize = 200;

/// Which request shape the configured model expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelFamily {
    #[default]
    Chat,
    Reasoning,
}

/// Effort hint for reasoning models.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReasoningEffort {
    Low,
    #[default]
    Medium,
    High,
}

/// Configuration for the OpenAI provider.
#[derive(Debug, Clone)]
pub struct OpenAIConfig {
    /// API key for authentication.
    api_key: Secret<String>,
    /// Model to use (e.g., "gpt-4o-mini", "o3-mini").
    pub model: String,
    /// Request shape for the model.
    pub model_family: ModelFamily,
    /// Base URL for the API (default: https://api.openai.com/v1).
    pub base_url: String,
    /// Request timeout.
    pub timeout: Duration,
    /// Sampling temperature (chat models only).
    pub temperature: f32,
    /// Maximum tokens to generate.
    pub max_tokens: u32,
    /// Reasoning effort (reasoning models only).
    pub reasoning_effort: ReasoningEffort,
}

impl OpenAIConfig {
    /// Creates a new configuration with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Secret::new(api_key.into()),
            model: "gpt-4o-mini".to_string(),
            model_family: ModelFamily::Chat,
            base_url: "https://api.openai.com/v1".to_string(),
            timeout: Duration::from_secs(60),
            temperature: 0.7,
            max_tokens: 1024,
            reasoning_effort: ReasoningEffort::Medium,
        }
    }

    /// Sets the model to use.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Sets the model family.
    pub fn with_model_family(mut self, family: ModelFamily) -> Self {
        self.model_family = family;
        self
    }

    /// Sets the base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the sampling temperature.
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// Sets the maximum tokens to generate.
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    /// Sets the reasoning effort.
    pub fn with_reasoning_effort(mut self, effort: ReasoningEffort) -> Self {
        self.reasoning_effort = effort;
        self
    }

    /// Exposes the API key (for making requests).
    fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }
}

/// OpenAI API provider implementation.
pub struct OpenAIProvider {
    config: OpenAIConfig,
    client: Client,
}

impl OpenAIProvider {
    /// Creates a new OpenAI provider with the given configuration.
    pub fn new(config: OpenAIConfig) -> Result<Self, AnalysisError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| AnalysisError::transport(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    /// Builds the endpoint URL for a request body.
    fn endpoint_url(&self, body: &ModelRequest) -> String {
        format!(
            "{}/{}",
            self.config.base_url.trim_end_matches('/'),
            body.endpoint()
        )
    }

    /// Converts our request to the configured model family's shape.
    fn to_model_request(&self, request: &AnalysisRequest) -> ModelRequest {
        match self.config.model_family {
            ModelFamily::Chat => ModelRequest::Chat(ChatRequest {
                model: self.config.model.clone(),
                messages: vec![
                    ChatMessage {
                        role: "system".to_string(),
                        content: request.instructions.clone(),
                    },
                    ChatMessage {
                        role: "user".to_string(),
                        content: request.prompt.clone(),
                    },
                ],
                temperature: self.config.temperature,
                max_tokens: self.config.max_tokens,
            }),
            ModelFamily::Reasoning => ModelRequest::Reasoning(ReasoningRequest {
                model: self.config.model.clone(),
                instructions: request.instructions.clone(),
                input: request.prompt.clone(),
                reasoning: ReasoningOptions {
                    effort: self.config.reasoning_effort,
                },
                max_output_tokens: self.config.max_tokens,
            }),
        }
    }

    /// Maps a transport-level reqwest failure.
    fn map_send_error(&self, err: reqwest::Error) -> AnalysisError {
        if err.is_timeout() {
            AnalysisError::transport(format!(
                "request timed out after {}s",
                self.config.timeout.as_secs()
            ))
        } else if err.is_connect() {
            AnalysisError::transport(format!("Connection failed: {}", err))
        } else {
            AnalysisError::transport(err.to_string())
        }
    }

    /// Maps a non-success HTTP status and its body to an error.
    fn map_status(status: StatusCode, body: &str) -> AnalysisError {
        match status.as_u16() {
            401 | 403 => AnalysisError::InvalidCredentials,
            402 => AnalysisError::QuotaExceeded,
            429 if body.contains("insufficient_quota") => AnalysisError::QuotaExceeded,
            429 => AnalysisError::RateLimited,
            _ => AnalysisError::transport(format!(
                "Unexpected status {}: {}",
                status,
                Self::error_message(body)
            )),
        }
    }

    /// Extracts `error.message` from an error body, or a preview of the raw body.
    fn error_message(body: &str) -> String {
        serde_json::from_str::<serde_json::Value>(body)
            .ok()
            .and_then(|parsed| {
                parsed
                    .pointer("/error/message")
                    .and_then(|m| m.as_str())
                    .map(str::to_string)
            })
            .unwrap_or_else(|| body.chars().take(ERROR_BODY_PREVIEW).collect())
    }

    /// Reads analysis text out of a successful response body.
    fn parse_success_body(body: &str) -> Result<AnalysisResponse, AnalysisError> {
        let value =
            parse_body(body).ok_or_else(|| AnalysisError::malformed("Response body is not JSON"))?;

        extract_text(&value)
            .map(AnalysisResponse::new)
            .ok_or_else(|| AnalysisError::malformed("No text content in response"))
    }
}

#[async_trait]
impl AnalysisProvider for OpenAIProvider {
    async fn request_analysis(
        &self,
        request: AnalysisRequest,
    ) -> Result<AnalysisResponse, AnalysisError> {
        let body = self.to_model_request(&request);
        let url = self.endpoint_url(&body);

        debug!(
            model = %self.config.model,
            family = ?self.config.model_family,
            kind = %request.analysis_kind,
            "Sending analysis request"
        );

        let response = self
            .client
            .post(&url)
            .bearer_auth(self.config.api_key())
            .json(&body)
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| AnalysisError::transport(format!("Failed to read response: {}", e)))?;

        if !status.is_success() {
            let err = Self::map_status(status, &text);
            warn!(status = %status, error = %err, "Analysis request failed");
            return Err(err);
        }

        let parsed = Self::parse_success_body(&text)?;
        debug!(chars = parsed.text.len(), "Received analysis response");
        Ok(parsed)
    }

    fn provider_info(&self) -> ProviderInfo {
        ProviderInfo::new("openai", &self.config.model)
    }
}

// ----- OpenAI API Types -----

/// Request body, one variant per model family.
#[derive(Debug, Serialize)]
#[serde(untagged)]
enum ModelRequest {
    Chat(ChatRequest),
    Reasoning(ReasoningRequest),
}

impl ModelRequest {
    fn endpoint(&self) -> &'static str {
        match self {
            ModelRequest::Chat(_) => "chat/completions",
            ModelRequest::Reasoning(_) => "responses",
        }
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Serialize)]
struct ReasoningRequest {
    model: String,
    instructions: String,
    input: String,
    reasoning: ReasoningOptions,
    max_output_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ReasoningOptions {
    effort: ReasoningEffort,
}
