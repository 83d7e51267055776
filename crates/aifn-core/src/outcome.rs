//! Tagged result of a single AI call.
//!
//! A call can succeed, fail, or be cancelled by its owner. Cancellation is a
//! normal, expected end state and therefore not folded into
//! [`AiError`](crate::error::AiError).
use crate::error::{AiError, Result};

#[derive(Debug)]
pub enum CallOutcome<T> {
    Success(T),
    Failure(AiError),
    Cancelled,
}

impl<T> CallOutcome<T> {
    pub fn is_success(&self) -> bool {
        matches!(self, CallOutcome::Success(_))
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, CallOutcome::Cancelled)
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> CallOutcome<U> {
        match self {
            CallOutcome::Success(value) => CallOutcome::Success(f(value)),
            CallOutcome::Failure(err) => CallOutcome::Failure(err),
            CallOutcome::Cancelled => CallOutcome::Cancelled,
        }
    }

    /// Flatten into a `Result`, with `None` standing for cancellation.
    ///
    /// ```rust
    /// use aifn_core::outcome::CallOutcome;
    ///
    /// let done: CallOutcome<u8> = CallOutcome::Success(1);
    /// assert_eq!(done.into_result().unwrap(), Some(1));
    /// assert_eq!(CallOutcome::<u8>::Cancelled.into_result().unwrap(), None);
    /// ```
    pub fn into_result(self) -> Result<Option<T>> {
        match self {
            CallOutcome::Success(value) => Ok(Some(value)),
            CallOutcome::Failure(err) => Err(err),
            CallOutcome::Cancelled => Ok(None),
        }
    }
}

impl<T> From<Result<T>> for CallOutcome<T> {
    fn from(value: Result<T>) -> Self {
        match value {
            Ok(value) => CallOutcome::Success(value),
            Err(err) => CallOutcome::Failure(err),
        }
    }
}
