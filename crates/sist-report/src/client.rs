use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::ReportError;

/// Configuration for the chat-completion endpoint.
#[derive(Debug, Clone)]
pub struct CompletionConfig {
    pub model: String,
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for CompletionConfig {
    fn default() -> Self {
        Self {
            model: "gpt-4o".to_string(),
            base_url: "https://api.openai.com/v1".to_string(),
            timeout: Duration::from_secs(60),
        }
    }
}

/// Trait seam over the completion endpoint. Mockable for testing.
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    /// Send one prompt and return the first choice's message text.
    ///
    /// The credential is an explicit per-call parameter; implementations
    /// must reject a missing credential before any network I/O.
    async fn complete(&self, api_key: &str, prompt: &str) -> Result<String, ReportError>;
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<Message<'a>>,
}

#[derive(Debug, Serialize)]
struct Message<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: String,
}

/// Chat-completion client over the OpenAI-compatible REST API.
pub struct OpenAiClient {
    http: reqwest::Client,
    config: CompletionConfig,
}

impl OpenAiClient {
    pub fn new(config: CompletionConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }
}

#[async_trait]
impl CompletionBackend for OpenAiClient {
    async fn complete(&self, api_key: &str, prompt: &str) -> Result<String, ReportError> {
        if api_key.trim().is_empty() {
            return Err(ReportError::MissingCredential);
        }

        debug!(model = %self.config.model, "Requesting chat completion");
        let body = ChatRequest {
            model: &self.config.model,
            messages: vec![Message {
                role: "user",
                content: prompt,
            }],
        };

        let content = tokio::time::timeout(self.config.timeout, async {
            let response = self
                .http
                .post(format!("{}/chat/completions", self.config.base_url))
                .header("Authorization", format!("Bearer {api_key}"))
                .header("Content-Type", "application/json")
                .json(&body)
                .send()
                .await
                .map_err(|e| {
                    warn!(error = %e, "Completion request failed");
                    ReportError::Network(e.to_string())
                })?;

            let status = response.status();
            if !status.is_success() {
                let error_text = response.text().await.unwrap_or_default();
                warn!(status = %status, error = %error_text, "Completion API error");
                return Err(ReportError::Api(format!("{status}: {error_text}")));
            }

            let parsed: ChatResponse = response
                .json()
                .await
                .map_err(|e| ReportError::Api(format!("Malformed completion payload: {e}")))?;

            parsed
                .choices
                .into_iter()
                .next()
                .map(|c| c.message.content)
                .ok_or_else(|| ReportError::Api("Completion returned no choices".to_string()))
        })
        .await
        .map_err(|_| ReportError::Timeout(self.config.timeout.as_secs()))??;

        if content.trim().is_empty() {
            return Err(ReportError::Api(
                "Completion returned an empty message".to_string(),
            ));
        }

        Ok(content)
    }
}
