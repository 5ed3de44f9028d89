//! Client for providers that speak the OpenAI `/chat/completions` format.
//!
//! Defaults to Gemini's OpenAI-compatible endpoint. Use
//! [`OpenAIClient::with_base_url`] for OpenAI itself, OpenRouter or a proxy.
//!
//! ```rust,ignore
//! use openai_client::OpenAIClient;
//!
//! let client = OpenAIClient::new(api_key);
//! let json = client
//!     .complete_json("gemini-2.5-flash-lite", "Reply with JSON only", "...")
//!     .await?;
//! ```

pub mod error;
pub mod types;

pub use error::{OpenAIError, Result};
pub use types::*;

use std::time::Instant;

use reqwest::Client;
use tracing::{debug, warn};

/// Gemini's OpenAI-compatible endpoint.
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/openai";

#[derive(Clone)]
pub struct OpenAIClient {
    http_client: Client,
    api_key: String,
    base_url: String,
}

impl OpenAIClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            http_client: Client::new(),
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }

    /// Send one request and return the first choice.
    pub async fn chat_completion(&self, request: ChatRequest) -> Result<ChatResponse> {
        let started = Instant::now();

        let response = self
            .http_client
            .post(self.completions_url())
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, model = %request.model, "Chat completion request failed");
                OpenAIError::Network(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(status = %status, body = %body, "Chat completion rejected");
            return Err(OpenAIError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let body: CompletionBody = response
            .json()
            .await
            .map_err(|e| OpenAIError::Parse(e.to_string()))?;
        let usage = body.usage.clone();
        let content = body.into_first_content().ok_or(OpenAIError::EmptyResponse)?;

        debug!(
            model = %request.model,
            elapsed_ms = started.elapsed().as_millis() as u64,
            total_tokens = usage.as_ref().map(|u| u.total_tokens),
            "Chat completion"
        );

        Ok(ChatResponse { content, usage })
    }

    /// Deterministic JSON-mode call with a system and a user message.
    ///
    /// Code fences are removed from the reply; decoding is left to the caller.
    pub async fn complete_json(
        &self,
        model: &str,
        system_prompt: impl Into<String>,
        user_prompt: impl Into<String>,
    ) -> Result<String> {
        let request = ChatRequest::new(model)
            .message(Message::system(system_prompt))
            .message(Message::user(user_prompt))
            .temperature(0.0)
            .json_mode();

        let response = self.chat_completion(request).await?;
        Ok(strip_code_blocks(&response.content).to_string())
    }
}
