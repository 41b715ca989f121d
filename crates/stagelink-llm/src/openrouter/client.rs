// OpenRouter client (HTTP direct, no SDK)

use crate::config::CompletionConfig;
use crate::error::{LlmError, Result};
use crate::traits::{ChatMessage, CompletionClient, CompletionOptions};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;

const OPENROUTER_API_BASE: &str = "https://openrouter.ai/api/v1";

/// Total attempts per completion call, including the first one.
const MAX_ATTEMPTS: u32 = 4;

/// Per-attempt network timeout.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Chat-completion client for the OpenRouter API
///
/// Transient failures (5xx, transport errors) are retried with exponential
/// backoff. Client errors (4xx) and empty completions fail immediately.
pub struct OpenRouterClient {
    http_client: reqwest::Client,
    base_url: String,
    config: CompletionConfig,
}

impl OpenRouterClient {
    /// Create a new client from configuration
    pub fn new(config: CompletionConfig) -> Result<Self> {
        if config.api_key.trim().is_empty() {
            return Err(LlmError::MissingApiKey);
        }

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", config.api_key))
                .map_err(|_| LlmError::InvalidConfig("Invalid API key format".to_string()))?,
        );
        headers.insert("HTTP-Referer", HeaderValue::from_static("http://localhost:3000"));
        headers.insert("X-Title", HeaderValue::from_static("StageLink Chat Summarizer"));

        let http_client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| LlmError::InvalidConfig(format!("Failed to create HTTP client: {e}")))?;

        let base_url = config
            .base_url
            .clone()
            .unwrap_or_else(|| OPENROUTER_API_BASE.to_string());

        Ok(Self {
            http_client,
            base_url,
            config,
        })
    }

    fn build_payload(&self, messages: &[ChatMessage], options: &CompletionOptions) -> Value {
        serde_json::json!({
            "model": self.config.model,
            "messages": messages,
            "temperature": options.temperature.unwrap_or(self.config.temperature),
            "max_tokens": options.max_tokens.unwrap_or(self.config.max_tokens),
        })
    }

    /// Single request/response cycle; classifies failures as retryable or fatal
    async fn try_complete(&self, payload: &Value) -> std::result::Result<String, AttemptError> {
        let response = self
            .http_client
            .post(format!("{}/chat/completions", self.base_url))
            .json(payload)
            .send()
            .await
            .map_err(|e| AttemptError::Retryable(format!("Transport error: {e}")))?;

        let status = response.status();

        if status.is_server_error() {
            let body = response.text().await.unwrap_or_default();
            return Err(AttemptError::Retryable(format!(
                "Server error {}: {}",
                status.as_u16(),
                body
            )));
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AttemptError::Fatal(LlmError::Rejected {
                status: status.as_u16(),
                body,
            }));
        }

        let body = response
            .text()
            .await
            .map_err(|e| AttemptError::Retryable(format!("Failed to read response body: {e}")))?;

        let parsed: ChatCompletionResponse = serde_json::from_str(&body).map_err(|e| {
            AttemptError::Fatal(LlmError::InvalidResponse {
                reason: e.to_string(),
                body: body.clone(),
            })
        })?;

        let content = parsed
            .choices
            .first()
            .and_then(|c| c.message.content.as_deref())
            .unwrap_or_default();

        // An HTTP 200 with nothing usable in it is fatal, not retried.
        if content.trim().is_empty() {
            return Err(AttemptError::Fatal(LlmError::EmptyCompletion { body }));
        }

        Ok(content.to_string())
    }
}

#[async_trait]
impl CompletionClient for OpenRouterClient {
    async fn complete(
        &self,
        messages: Vec<ChatMessage>,
        options: CompletionOptions,
    ) -> Result<String> {
        let payload = self.build_payload(&messages, &options);
        let mut last_error = String::new();

        for attempt in 0..MAX_ATTEMPTS {
            if attempt > 0 {
                // 1s, 2s, 4s before attempts 2, 3, 4
                let wait = Duration::from_secs(1 << (attempt - 1));
                tracing::debug!(
                    attempt = attempt + 1,
                    wait_secs = wait.as_secs(),
                    "Retrying completion request"
                );
                tokio::time::sleep(wait).await;
            }

            match self.try_complete(&payload).await {
                Ok(content) => {
                    tracing::debug!(attempt = attempt + 1, "Completion succeeded");
                    return Ok(content);
                }
                Err(AttemptError::Fatal(err)) => return Err(err),
                Err(AttemptError::Retryable(reason)) => {
                    tracing::warn!(attempt = attempt + 1, error = %reason, "Completion attempt failed");
                    last_error = reason;
                }
            }
        }

        Err(LlmError::RetriesExhausted {
            attempts: MAX_ATTEMPTS,
            last_error,
        })
    }
}

enum AttemptError {
    /// Worth another attempt after backoff (5xx, transport)
    Retryable(String),
    /// Propagated immediately (4xx, empty or unparseable completion)
    Fatal(LlmError),
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}
