use thiserror::Error;

pub type Result<T> = std::result::Result<T, OpenAIError>;

#[derive(Debug, Error)]
pub enum OpenAIError {
    /// Connection failed or timed out
    #[error("Network error: {0}")]
    Network(String),

    /// Non-2xx status from the provider
    #[error("API error ({status}): {body}")]
    Api { status: u16, body: String },

    /// 2xx with no choice or no text
    #[error("Empty response from provider")]
    EmptyResponse,

    /// Body was not a completion object
    #[error("Parse error: {0}")]
    Parse(String),
}
