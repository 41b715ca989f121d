// Configuration for the completion client.
// The API key is validated at construction time, not on first call.

use crate::error::LlmError;
use serde::{Deserialize, Serialize};

pub const DEFAULT_MODEL: &str = "mistralai/mistral-7b-instruct:free";
pub const DEFAULT_TEMPERATURE: f32 = 0.7;
pub const DEFAULT_MAX_TOKENS: u32 = 1000;

/// Configuration for an OpenRouter-compatible completion endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionConfig {
    pub api_key: String,
    pub model: String,
    /// Base URL override (defaults to the public OpenRouter API)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl CompletionConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
            base_url: None,
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }

    /// Load configuration from environment variables.
    ///
    /// `OPENROUTER_API_KEY` is required; a missing key is an error here rather
    /// than on the first request. `MODEL_ID` falls back to the default model.
    pub fn from_env() -> Result<Self, LlmError> {
        let api_key = std::env::var("OPENROUTER_API_KEY")
            .ok()
            .filter(|k| !k.trim().is_empty())
            .ok_or(LlmError::MissingApiKey)?;

        let mut config = Self::new(api_key);
        if let Ok(model) = std::env::var("MODEL_ID") {
            if !model.trim().is_empty() {
                config.model = model;
            }
        }
        Ok(config)
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = CompletionConfig::new("test-key");
        assert_eq!(config.model, DEFAULT_MODEL);
        assert_eq!(config.temperature, DEFAULT_TEMPERATURE);
        assert_eq!(config.max_tokens, DEFAULT_MAX_TOKENS);
        assert!(config.base_url.is_none());
    }

    #[test]
    fn test_builder_overrides() {
        let config = CompletionConfig::new("test-key")
            .with_model("openai/gpt-4o-mini")
            .with_base_url("http://localhost:8080/api/v1")
            .with_temperature(0.2)
            .with_max_tokens(256);

        assert_eq!(config.model, "openai/gpt-4o-mini");
        assert_eq!(config.base_url.as_deref(), Some("http://localhost:8080/api/v1"));
        assert_eq!(config.temperature, 0.2);
        assert_eq!(config.max_tokens, 256);
    }
}
