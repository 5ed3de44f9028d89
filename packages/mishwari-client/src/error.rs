use thiserror::Error;

use crate::types::ApiErrorEntry;

pub type Result<T> = std::result::Result<T, MishwariError>;

#[derive(Debug, Error)]
pub enum MishwariError {
    /// The backend rejected the payload (HTTP 400). Carries its error list.
    #[error("bad request: {}", first_error(.errors).unwrap_or("no details"))]
    BadRequest { errors: Vec<ApiErrorEntry> },

    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("malformed response: {0}")]
    Parse(String),
}

impl MishwariError {
    /// Whether the backend refused this particular payload rather than failing outright.
    pub fn is_bad_request(&self) -> bool {
        matches!(self, Self::BadRequest { .. })
    }
}

fn first_error(errors: &[ApiErrorEntry]) -> Option<&str> {
    errors.iter().find_map(|e| e.error.as_deref())
}
