//! Unified error type exposed by **`aifn-core`**.
//!
//! Provider crates convert their internal errors into one of these variants
//! before bubbling them up, so callers only ever match on [`AiError`].
//! Cancellation is *not* an error; see [`crate::outcome::CallOutcome`].

use thiserror::Error;

/// Convenient alias used throughout the workspace.
pub type Result<T> = std::result::Result<T, AiError>;

#[derive(Debug, Error)]
pub enum AiError {
    /// The model never produced valid JSON within the retry budget.
    #[error("cannot parse model reply as JSON after {attempts} attempt(s): {source}")]
    CannotParse {
        attempts: u32,
        #[source]
        source: serde_json::Error,
    },

    /// Failure while serialising or deserialising JSON payloads.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Transport-level failure forwarded from a provider crate.
    #[error("backend returned an error: {0}")]
    Backend(Box<dyn std::error::Error + Send + Sync + 'static>),

    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("invalid: {0}")]
    Invalid(String),
}

impl AiError {
    /// `true` if the error is the terminal "cannot parse" failure.
    pub fn is_cannot_parse(&self) -> bool {
        matches!(self, AiError::CannotParse { .. })
    }
}
