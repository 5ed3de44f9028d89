//! Extraction service backed by an OpenAI-compatible chat endpoint.

use anyhow::{Context, Result};
use async_trait::async_trait;
use openai_client::OpenAIClient;
use serde::Deserialize;
use std::sync::Arc;
use tracing::debug;

use super::BaseExtractionService;
use crate::domains::trips::models::ExtractionResult;
use crate::domains::trips::prompts::{format_refine_name_prompt, SYSTEM_PROMPT};

/// Model used when none is configured.
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash-lite";

pub struct LlmExtractionService {
    client: Arc<OpenAIClient>,
    model: String,
}

impl LlmExtractionService {
    pub fn new(client: Arc<OpenAIClient>, model: impl Into<String>) -> Self {
        Self {
            client,
            model: model.into(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct RefinedName {
    #[serde(default)]
    refined_name: Option<String>,
}

#[async_trait]
impl BaseExtractionService for LlmExtractionService {
    async fn extract_trip(&self, prompt: &str) -> Result<ExtractionResult> {
        let reply = self
            .client
            .complete_json(&self.model, SYSTEM_PROMPT, prompt)
            .await
            .context("Trip extraction call failed")?;

        debug!(model = %self.model, reply_len = reply.len(), "Extraction reply received");

        ExtractionResult::from_json(&reply).context("Extraction reply is not a trip object")
    }

    async fn refine_name(&self, extracted_name: &str, sender_name: &str) -> Result<Option<String>> {
        let prompt = format_refine_name_prompt(extracted_name, sender_name);
        let reply = self
            .client
            .complete_json(&self.model, SYSTEM_PROMPT, prompt)
            .await
            .context("Name refinement call failed")?;

        let parsed: RefinedName =
            serde_json::from_str(&reply).context("Refinement reply is not valid JSON")?;

        Ok(parsed
            .refined_name
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty() && n != "null"))
    }
}
