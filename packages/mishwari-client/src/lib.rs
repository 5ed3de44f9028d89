//! Mishwari fleet-manager REST client.
//!
//! Posts shadow trips discovered by the probe. The backend answers 400 with an
//! error list when it refuses a payload (for example an unknown driver phone),
//! which callers treat differently from every other failure.
//!
//! # Example
//!
//! ```rust,ignore
//! use mishwari_client::MishwariClient;
//!
//! let client = MishwariClient::new(api_url).with_api_key(key);
//! let created = client.submit_shadow_trip(&payload).await?;
//! ```

pub mod error;
pub mod types;

pub use error::{MishwariError, Result};
pub use types::{ApiErrorBody, ApiErrorEntry, CreatedTrip, ShadowTripResponse};

use reqwest::StatusCode;
use serde::Serialize;

pub const DEFAULT_API_URL: &str = "http://localhost:8000/api/fleet-manager/shadow-trips/";

const API_KEY_HEADER: &str = "X-Probe-Key";

#[derive(Clone)]
pub struct MishwariClient {
    client: reqwest::Client,
    api_url: String,
    api_key: Option<String>,
}

impl MishwariClient {
    pub fn new(api_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_url: api_url.into(),
            api_key: None,
        }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// Create one shadow trip. The payload is sent as-is.
    pub async fn submit_shadow_trip<T: Serialize + ?Sized>(
        &self,
        payload: &T,
    ) -> Result<ShadowTripResponse> {
        let mut request = self.client.post(&self.api_url).json(payload);
        if let Some(key) = &self.api_key {
            request = request.header(API_KEY_HEADER, key);
        }

        let resp = request.send().await?;

        let status = resp.status();
        let body = resp.text().await.unwrap_or_default();

        if !status.is_success() {
            return Err(classify_failure(status, &body));
        }

        tracing::debug!(status = %status, "Shadow trip accepted");
        serde_json::from_str(&body).map_err(|e| MishwariError::Parse(e.to_string()))
    }
}

/// Map a non-2xx response to an error, keeping the backend's error list for 400s.
fn classify_failure(status: StatusCode, body: &str) -> MishwariError {
    if status == StatusCode::BAD_REQUEST {
        let errors = serde_json::from_str::<ApiErrorBody>(body)
            .map(|b| b.errors)
            .unwrap_or_default();
        return MishwariError::BadRequest { errors };
    }

    MishwariError::Api {
        status: status.as_u16(),
        message: body.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bad_request_keeps_error_list() {
        let err = classify_failure(
            StatusCode::BAD_REQUEST,
            r#"{"errors":[{"error":"driver phone not registered","field":"phone"}]}"#,
        );

        assert!(err.is_bad_request());
        assert_eq!(err.to_string(), "bad request: driver phone not registered");
    }

    #[test]
    fn bad_request_with_unparseable_body_is_still_bad_request() {
        let err = classify_failure(StatusCode::BAD_REQUEST, "<html>oops</html>");
        assert!(err.is_bad_request());
        assert_eq!(err.to_string(), "bad request: no details");
    }

    #[test]
    fn server_error_is_not_bad_request() {
        let err = classify_failure(StatusCode::INTERNAL_SERVER_ERROR, "boom");
        assert!(!err.is_bad_request());
        assert!(matches!(err, MishwariError::Api { status: 500, .. }));
    }

    #[test]
    fn response_trip_id_accepts_numbers_and_strings() {
        let resp: ShadowTripResponse = serde_json::from_str(
            r#"{"message":"ok","created_count":1,"error_count":0,"trips":[{"id":42}]}"#,
        )
        .unwrap();
        assert_eq!(resp.first_trip_id().as_deref(), Some("42"));

        let resp: ShadowTripResponse =
            serde_json::from_str(r#"{"trips":[{"id":"abc"}]}"#).unwrap();
        assert_eq!(resp.first_trip_id().as_deref(), Some("abc"));
        assert_eq!(resp.created_count, 0);
    }
}
