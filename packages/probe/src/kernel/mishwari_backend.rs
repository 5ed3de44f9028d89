//! Trip backend adapter over the Mishwari shadow-trip API.

use async_trait::async_trait;
use mishwari_client::{MishwariClient, MishwariError};
use std::sync::Arc;

use super::{BaseTripBackend, SubmitError, SubmitReceipt};
use crate::domains::trips::models::TripSubmission;

/// Wrapper around MishwariClient that implements BaseTripBackend
pub struct MishwariAdapter(pub Arc<MishwariClient>);

impl MishwariAdapter {
    pub fn new(client: Arc<MishwariClient>) -> Self {
        Self(client)
    }
}

#[async_trait]
impl BaseTripBackend for MishwariAdapter {
    async fn submit(&self, submission: &TripSubmission<'_>) -> Result<SubmitReceipt, SubmitError> {
        let response = self
            .0
            .submit_shadow_trip(submission)
            .await
            .map_err(into_submit_error)?;

        Ok(SubmitReceipt {
            trip_id: response.first_trip_id(),
            message: response.message,
            created_count: response.created_count,
            error_count: response.error_count,
        })
    }
}

fn into_submit_error(err: MishwariError) -> SubmitError {
    if err.is_bad_request() {
        SubmitError::Rejected(err.to_string())
    } else {
        SubmitError::Fatal(err.to_string())
    }
}
