pub mod activities;
pub mod models;
pub mod prompts;

// Re-export models
pub use models::{
    AcceptedTrip, Classification, ExtractionResult, NormalizedTrip, RawMessage, Rejection,
    TripRules, TripSubmission,
};

// Re-export activities
pub use activities::{submit_trip, validate_trip, SubmissionOutcome};
