// TestDependencies - mock implementations for testing
//
// Provides mock services that can be injected into ProbeKernel for tests.

use anyhow::Result;
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use super::{BaseExtractionService, BaseTripBackend, ProbeKernel, SubmitError, SubmitReceipt};
use crate::domains::trips::models::{ExtractionResult, TripRules, TripSubmission};

// =============================================================================
// Mock Extraction Service
// =============================================================================

/// Arguments captured from a refine_name call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefineCallArgs {
    pub extracted_name: String,
    pub sender_name: String,
}

pub struct MockExtractionService {
    extractions: Arc<Mutex<Vec<Result<ExtractionResult, String>>>>,
    refinements: Arc<Mutex<Vec<Result<Option<String>, String>>>>,
    extract_calls: Arc<Mutex<Vec<String>>>,
    refine_calls: Arc<Mutex<Vec<RefineCallArgs>>>,
}

impl MockExtractionService {
    pub fn new() -> Self {
        Self {
            extractions: Arc::new(Mutex::new(Vec::new())),
            refinements: Arc::new(Mutex::new(Vec::new())),
            extract_calls: Arc::new(Mutex::new(Vec::new())),
            refine_calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Queue an extraction result
    pub fn with_extraction(self, result: ExtractionResult) -> Self {
        self.extractions.lock().unwrap().push(Ok(result));
        self
    }

    /// Queue a failed extraction call
    pub fn with_extraction_error(self, message: &str) -> Self {
        self.extractions
            .lock()
            .unwrap()
            .push(Err(message.to_string()));
        self
    }

    /// Queue a refinement answer
    pub fn with_refined_name(self, name: Option<&str>) -> Self {
        self.refinements
            .lock()
            .unwrap()
            .push(Ok(name.map(str::to_string)));
        self
    }

    /// Queue a failed refinement call
    pub fn with_refine_error(self, message: &str) -> Self {
        self.refinements
            .lock()
            .unwrap()
            .push(Err(message.to_string()));
        self
    }

    /// Get all prompts passed to extract_trip
    pub fn extract_calls(&self) -> Vec<String> {
        self.extract_calls.lock().unwrap().clone()
    }

    /// Get all refine_name calls with their arguments
    pub fn refine_calls(&self) -> Vec<RefineCallArgs> {
        self.refine_calls.lock().unwrap().clone()
    }
}

impl Default for MockExtractionService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseExtractionService for MockExtractionService {
    async fn extract_trip(&self, prompt: &str) -> Result<ExtractionResult> {
        self.extract_calls.lock().unwrap().push(prompt.to_string());

        let mut extractions = self.extractions.lock().unwrap();
        if extractions.is_empty() {
            anyhow::bail!("no mock extraction queued");
        }
        extractions.remove(0).map_err(|e| anyhow::anyhow!(e))
    }

    async fn refine_name(&self, extracted_name: &str, sender_name: &str) -> Result<Option<String>> {
        self.refine_calls.lock().unwrap().push(RefineCallArgs {
            extracted_name: extracted_name.to_string(),
            sender_name: sender_name.to_string(),
        });

        let mut refinements = self.refinements.lock().unwrap();
        if refinements.is_empty() {
            return Ok(None);
        }
        refinements.remove(0).map_err(|e| anyhow::anyhow!(e))
    }
}

// =============================================================================
// Mock Trip Backend
// =============================================================================

pub struct MockTripBackend {
    responses: Arc<Mutex<Vec<Result<SubmitReceipt, SubmitError>>>>,
    submissions: Arc<Mutex<Vec<serde_json::Value>>>,
}

impl MockTripBackend {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(Vec::new())),
            submissions: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Queue a successful response
    pub fn with_created(self, trip_id: &str) -> Self {
        self.responses.lock().unwrap().push(Ok(SubmitReceipt {
            trip_id: Some(trip_id.to_string()),
            message: Some("created".to_string()),
            created_count: 1,
            error_count: 0,
        }));
        self
    }

    /// Queue a bad-request response
    pub fn with_rejection(self, reason: &str) -> Self {
        self.responses
            .lock()
            .unwrap()
            .push(Err(SubmitError::Rejected(reason.to_string())));
        self
    }

    /// Queue a server or network failure
    pub fn with_failure(self, reason: &str) -> Self {
        self.responses
            .lock()
            .unwrap()
            .push(Err(SubmitError::Fatal(reason.to_string())));
        self
    }

    /// Every submitted payload, as JSON, in order
    pub fn submissions(&self) -> Vec<serde_json::Value> {
        self.submissions.lock().unwrap().clone()
    }

    /// Phones tried, in order
    pub fn submitted_phones(&self) -> Vec<String> {
        self.submissions
            .lock()
            .unwrap()
            .iter()
            .filter_map(|s| s["phone"].as_str().map(str::to_string))
            .collect()
    }
}

impl Default for MockTripBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseTripBackend for MockTripBackend {
    async fn submit(&self, submission: &TripSubmission<'_>) -> std::result::Result<SubmitReceipt, SubmitError> {
        let payload = serde_json::to_value(submission)
            .map_err(|e| SubmitError::Fatal(e.to_string()))?;
        self.submissions.lock().unwrap().push(payload);

        let mut responses = self.responses.lock().unwrap();
        if responses.is_empty() {
            return Ok(SubmitReceipt::default());
        }
        responses.remove(0)
    }
}

// =============================================================================
// TestDependencies
// =============================================================================

/// Mocks plus a kernel wired to them.
pub struct TestDependencies {
    pub extractor: Arc<MockExtractionService>,
    pub backend: Arc<MockTripBackend>,
}

impl TestDependencies {
    pub fn new(extractor: MockExtractionService, backend: MockTripBackend) -> Self {
        Self {
            extractor: Arc::new(extractor),
            backend: Arc::new(backend),
        }
    }

    pub fn kernel(&self) -> ProbeKernel {
        self.kernel_with_rules(TripRules::default())
    }

    pub fn kernel_with_rules(&self, rules: TripRules) -> ProbeKernel {
        ProbeKernel::new(self.extractor.clone(), self.backend.clone(), rules)
    }
}
