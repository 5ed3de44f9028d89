//! Submission retry driver.
//!
//! Each phone candidate is one attempt. A bad-request rejection moves on to
//! the next candidate; anything else stops the loop. Nothing is queued for a
//! later retry.

use tracing::{error, info, warn};

use crate::domains::trips::models::{AcceptedTrip, RawMessage, TripSubmission};
use crate::kernel::{BaseTripBackend, SubmitError, SubmitReceipt};

/// How the attempt loop ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionOutcome {
    Created {
        phone: String,
        receipt: SubmitReceipt,
        attempts: usize,
    },
    /// Every candidate was rejected by the backend.
    Exhausted { attempts: usize },
    /// A non-retryable failure stopped the loop.
    Aborted { attempts: usize, error: String },
}

impl SubmissionOutcome {
    pub fn attempts(&self) -> usize {
        match self {
            Self::Created { attempts, .. }
            | Self::Exhausted { attempts }
            | Self::Aborted { attempts, .. } => *attempts,
        }
    }

    pub fn is_created(&self) -> bool {
        matches!(self, Self::Created { .. })
    }
}

pub async fn submit_trip(
    accepted: &AcceptedTrip,
    message: &RawMessage,
    backend: &dyn BaseTripBackend,
) -> SubmissionOutcome {
    let mut attempts = 0;

    for phone in &accepted.phones {
        attempts += 1;
        let submission = TripSubmission::new(&accepted.trip, phone, message);

        match backend.submit(&submission).await {
            Ok(receipt) => {
                info!(
                    phone = %phone,
                    attempts,
                    trip_id = ?receipt.trip_id,
                    operator_id = %message.routed_operator_id,
                    "Trip created"
                );
                return SubmissionOutcome::Created {
                    phone: phone.clone(),
                    receipt,
                    attempts,
                };
            }
            Err(SubmitError::Rejected(reason)) => {
                warn!(phone = %phone, reason = %reason, "Backend rejected phone, trying next");
            }
            Err(SubmitError::Fatal(reason)) => {
                error!(phone = %phone, error = %reason, "Submission failed");
                return SubmissionOutcome::Aborted {
                    attempts,
                    error: reason,
                };
            }
        }
    }

    error!(
        attempts,
        from = %accepted.trip.from_city,
        to = %accepted.trip.to_city,
        "All phone candidates rejected"
    );
    SubmissionOutcome::Exhausted { attempts }
}
