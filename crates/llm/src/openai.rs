//! OpenAI Client
//!
//! Direct chat-completions call used by the direct completion screen.
//! Always sends `stream: false`; the character-by-character display is
//! produced by the reveal driver, not by network streaming.

use serde::Deserialize;
use serde_json::{json, Value};
use tracing::debug;

use crate::error::{LlmError, LlmResult};
use crate::http_client::build_http_client;

/// Default OpenAI chat completions endpoint
pub const OPENAI_API_URL: &str = "https://api.openai.com/v1/chat/completions";

/// Default model for direct completions
pub const DEFAULT_MODEL: &str = "gpt-5-mini";

/// Client for direct OpenAI chat completions.
pub struct OpenAiClient {
    base_url: String,
    model: String,
    client: reqwest::Client,
}

impl OpenAiClient {
    pub fn new(model: impl Into<String>) -> Self {
        Self::with_base_url(OPENAI_API_URL, model)
    }

    /// Create a client against a non-default completions endpoint.
    pub fn with_base_url(base_url: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            model: model.into(),
            client: build_http_client(),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Send a single-turn completion and return the assistant's message
    /// content alongside the raw response body (kept for the debug log's
    /// structure dump). An empty or missing content is reported as
    /// `Empty` so the display can show the canned empty-response message.
    pub async fn complete(&self, prompt: &str, api_key: &str) -> LlmResult<Completion> {
        let body = json!({
            "model": self.model,
            "messages": [
                { "role": "user", "content": prompt }
            ],
            "stream": false,
        });

        debug!(model = %self.model, "posting chat completion");

        let response = self
            .client
            .post(&self.base_url)
            .header("Authorization", format!("Bearer {}", api_key))
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(LlmError::from_reqwest)?;

        let status = response.status().as_u16();
        let text = response.text().await.map_err(LlmError::from_reqwest)?;

        if !(200..300).contains(&status) {
            return Err(LlmError::Http { status, body: text });
        }

        let raw: Value =
            serde_json::from_str(&text).map_err(|e| LlmError::Parse(e.to_string()))?;
        let parsed: ChatResponse =
            serde_json::from_value(raw.clone()).map_err(|e| LlmError::Parse(e.to_string()))?;

        if let Some(error) = parsed.error {
            return Err(LlmError::Upstream(error.describe()));
        }

        let content = parsed
            .choices
            .first()
            .and_then(|c| c.message.as_ref())
            .and_then(|m| m.content.as_deref())
            .unwrap_or("");

        if content.trim().is_empty() {
            return Err(LlmError::Empty);
        }

        Ok(Completion {
            content: content.to_string(),
            raw,
        })
    }
}

/// A completed chat response: the extracted content plus the raw body.
#[derive(Debug, Clone)]
pub struct Completion {
    pub content: String,
    pub raw: Value,
}

/// OpenAI API response format
#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
    #[serde(default)]
    error: Option<ApiError>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: Option<ChoiceMessage>,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

/// Error object OpenAI embeds in a 200 body
#[derive(Debug, Deserialize)]
struct ApiError {
    message: Option<String>,
    #[serde(rename = "type")]
    kind: Option<String>,
}

impl ApiError {
    fn describe(&self) -> String {
        self.message
            .as_deref()
            .or(self.kind.as_deref())
            .unwrap_or("알 수 없는 에러")
            .to_string()
    }
}
