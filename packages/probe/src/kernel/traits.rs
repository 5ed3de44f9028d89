// Trait definitions for dependency injection
//
// These are INFRASTRUCTURE traits only - no business logic.
// The pipeline in domains/trips decides what to do with their results.
//
// Naming convention: Base* for trait names (e.g., BaseExtractionService)

use anyhow::Result;
use async_trait::async_trait;
use thiserror::Error;

use crate::domains::trips::models::{ExtractionResult, TripSubmission};

// =============================================================================
// Extraction Service Trait (Infrastructure - LLM)
// =============================================================================

#[async_trait]
pub trait BaseExtractionService: Send + Sync {
    /// Run the trip extraction prompt and decode the structured answer.
    /// Errors cover both failed calls and unparseable output.
    async fn extract_trip(&self, prompt: &str) -> Result<ExtractionResult>;

    /// Ask for the best two-word driver name given the extracted name and the
    /// sender's display name. `Ok(None)` when the service has no answer.
    async fn refine_name(&self, extracted_name: &str, sender_name: &str) -> Result<Option<String>>;
}

// =============================================================================
// Trip Backend Trait (Infrastructure - booking API)
// =============================================================================

/// Created-record metadata returned by the backend.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubmitReceipt {
    pub trip_id: Option<String>,
    pub message: Option<String>,
    pub created_count: u32,
    pub error_count: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    /// The backend refused this payload (bad request class). Another phone
    /// candidate may still succeed.
    #[error("rejected by backend: {0}")]
    Rejected(String),

    /// Server, network or response failure unrelated to the candidate.
    #[error("submission failed: {0}")]
    Fatal(String),
}

#[async_trait]
pub trait BaseTripBackend: Send + Sync {
    /// Create one trip with the submission's phone.
    async fn submit(&self, submission: &TripSubmission<'_>) -> std::result::Result<SubmitReceipt, SubmitError>;
}
