//! AI provider configuration

use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;
use crate::adapters::ai::{ModelFamily, OpenAIConfig, ReasoningEffort};

/// AI provider configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AiConfig {
    /// API key for the OpenAI-compatible endpoint
    pub api_key: Option<Secret<String>>,

    /// Model identifier
    #[serde(default = "default_model")]
    pub model: String,

    /// Request shape the model expects
    #[serde(default)]
    pub model_family: ModelFamily,

    /// API base URL
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Sampling temperature (chat models)
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Maximum tokens to generate
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Reasoning effort (reasoning models)
    #[serde(default)]
    pub reasoning_effort: ReasoningEffort,
}

impl AiConfig {
    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Check if an API key is configured
    pub fn has_api_key(&self) -> bool {
        self.api_key
            .as_ref()
            .is_some_and(|k| !k.expose_secret().trim().is_empty())
    }

    /// Validate AI configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.has_api_key() {
            return Err(ValidationError::MissingRequired("AI__API_KEY"));
        }

        if self.model.trim().is_empty() {
            return Err(ValidationError::MissingRequired("AI__MODEL"));
        }

        if !(self.base_url.starts_with("https://") || self.base_url.starts_with("http://")) {
            return Err(ValidationError::InvalidBaseUrl(self.base_url.clone()));
        }

        if self.timeout_secs == 0 || self.timeout_secs > 300 {
            return Err(ValidationError::InvalidTimeout);
        }

        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(ValidationError::InvalidTemperature);
        }

        if self.max_tokens == 0 {
            return Err(ValidationError::InvalidMaxTokens);
        }

        Ok(())
    }

    /// Build the provider configuration.
    ///
    /// Returns `None` when no API key is configured.
    pub fn openai_config(&self) -> Option<OpenAIConfig> {
        let api_key = self.api_key.as_ref()?.expose_secret().clone();

        Some(
            OpenAIConfig::new(api_key)
                .with_model(self.model.clone())
                .with_model_family(self.model_family)
                .with_base_url(self.base_url.clone())
                .with_timeout(self.timeout())
                .with_temperature(self.temperature)
                .with_max_tokens(self.max_tokens)
                .with_reasoning_effort(self.reasoning_effort),
        )
    }
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: default_model(),
            model_family: ModelFamily::default(),
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            reasoning_effort: ReasoningEffort::default(),
        }
    }
}

fn default_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_timeout() -> u64 {
    60
}

fn default_temperature() -> f32 {
    0.7
}

fn default_max_tokens() -> u32 {
    1024
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_key() -> AiConfig {
        AiConfig {
            api_key: Some(Secret::new("sk-test".to_string())),
            ..Default::default()
        }
    }

    #[test]
    fn test_ai_config_defaults() {
        let config = AiConfig::default();
        assert_eq!(config.model, "gpt-4o-mini");
        assert_eq!(config.model_family, ModelFamily::Chat);
        assert_eq!(config.base_url, "https://api.openai.com/v1");
        assert_eq!(config.timeout_secs, 60);
        assert_eq!(config.max_tokens, 1024);
        assert_eq!(config.reasoning_effort, ReasoningEffort::Medium);
    }

    #[test]
    fn test_timeout_duration() {
        let config = AiConfig {
            timeout_secs: 30,
            ..Default::default()
        };
        assert_eq!(config.timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_validation_requires_key() {
        assert_eq!(
            AiConfig::default().validate(),
            Err(ValidationError::MissingRequired("AI__API_KEY"))
        );

        let blank = AiConfig {
            api_key: Some(Secret::new("  ".to_string())),
            ..Default::default()
        };
        assert!(!blank.has_api_key());
        assert!(blank.validate().is_err());
    }

    #[test]
    fn test_validation_valid_config() {
        assert!(with_key().validate().is_ok());
    }

    #[test]
    fn test_validation_timeout_bounds() {
        let zero = AiConfig {
            timeout_secs: 0,
            ..with_key()
        };
        let huge = AiConfig {
            timeout_secs: 301,
            ..with_key()
        };
        assert_eq!(zero.validate(), Err(ValidationError::InvalidTimeout));
        assert_eq!(huge.validate(), Err(ValidationError::InvalidTimeout));
    }

    #[test]
    fn test_validation_temperature_and_url() {
        let hot = AiConfig {
            temperature: 2.5,
            ..with_key()
        };
        assert_eq!(hot.validate(), Err(ValidationError::InvalidTemperature));

        let bad_url = AiConfig {
            base_url: "api.openai.com".to_string(),
            ..with_key()
        };
        assert!(matches!(
            bad_url.validate(),
            Err(ValidationError::InvalidBaseUrl(_))
        ));
    }

    #[test]
    fn test_openai_config_carries_settings() {
        let config = AiConfig {
            model: "o3-mini".to_string(),
            model_family: ModelFamily::Reasoning,
            reasoning_effort: ReasoningEffort::High,
            timeout_secs: 90,
            ..with_key()
        };

        let openai = config.openai_config().unwrap();
        assert_eq!(openai.model, "o3-mini");
        assert_eq!(openai.model_family, ModelFamily::Reasoning);
        assert_eq!(openai.reasoning_effort, ReasoningEffort::High);
        assert_eq!(openai.timeout, Duration::from_secs(90));

        assert!(AiConfig::default().openai_config().is_none());
    }
}
