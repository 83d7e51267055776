use aifn_core::error::AiError;
use reqwest::StatusCode;

/// Failure modes of the HTTP side.
#[derive(Debug, thiserror::Error)]
pub enum HttpError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("couldn’t decode response body: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("provider returned non-success status {status}: {body}")]
    Api { status: StatusCode, body: String },

    #[error("invalid header `{0}`")]
    InvalidHeader(String),

    #[error("unexpected response shape: {0}")]
    Format(String),
}

impl From<HttpError> for AiError {
    fn from(value: HttpError) -> Self {
        AiError::Backend(Box::new(value))
    }
}
