//! Bounded re-ask loop for replies that are not valid JSON.
//!
//! Each attempt re-issues the *same* request; only the attempt counter
//! changes. Any error coming from `fetch` itself (transport, envelope shape)
//! ends the loop immediately. Only parse failures are retried.
use std::future::Future;

use serde_json::Value;

use crate::{
    error::{AiError, Result},
    extract::parse_completion,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    max_attempts: u32,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: Self::DEFAULT_MAX_ATTEMPTS,
        }
    }
}

impl RetryPolicy {
    /// Total attempts, the first one included.
    pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

    /// A policy with `max_attempts` total attempts (at least one).
    pub fn new(max_attempts: u32) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
        }
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Drive `fetch` until its text parses as JSON or the budget is spent.
    ///
    /// `fetch` receives the 1-based attempt number.
    ///
    /// ```rust
    /// use aifn_core::retry::RetryPolicy;
    ///
    /// # #[tokio::main(flavor = "current_thread")]
    /// # async fn main() {
    /// let value = RetryPolicy::default()
    ///     .run(|_attempt| async { Ok("```json\n[1]\n```".to_owned()) })
    ///     .await
    ///     .unwrap();
    /// assert_eq!(value, serde_json::json!([1]));
    /// # }
    /// ```
    pub async fn run<F, Fut>(&self, mut fetch: F) -> Result<Value>
    where
        F: FnMut(u32) -> Fut,
        Fut: Future<Output = Result<String>>,
    {
        let mut attempt = 1;
        loop {
            let text = fetch(attempt).await?;
            match parse_completion(&text) {
                Ok(value) => return Ok(value),
                Err(source) if attempt >= self.max_attempts => {
                    return Err(AiError::CannotParse {
                        attempts: attempt,
                        source,
                    });
                }
                Err(_err) => {
                    #[cfg(feature = "tracing")]
                    tracing::warn!(attempt, error = %_err, "model reply is not valid JSON, retrying");
                    attempt += 1;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{
        Arc,
        atomic::{AtomicU32, Ordering},
    };

    use serde_json::json;

    use super::*;

    type Fetch = std::future::Ready<Result<String>>;

    fn counting(replies: Vec<&'static str>) -> (Arc<AtomicU32>, impl FnMut(u32) -> Fetch) {
        let calls = Arc::new(AtomicU32::new(0));
        let seen = Arc::clone(&calls);
        let fetch = move |attempt: u32| {
            let n = seen.fetch_add(1, Ordering::SeqCst) + 1;
            assert_eq!(attempt, n, "attempt counter must match call count");
            let reply = replies[(attempt - 1) as usize].to_owned();
            std::future::ready(Ok(reply))
        };
        (calls, fetch)
    }

    #[tokio::test]
    async fn first_valid_reply_wins() {
        let (calls, fetch) = counting(vec![r#"{"ok":true}"#]);
        let value = RetryPolicy::default().run(fetch).await.unwrap();
        assert_eq!(value, json!({"ok": true}));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn recovers_on_third_attempt() {
        let (calls, fetch) = counting(vec!["nope", "still nope", "```json\n{\"n\":1}\n```"]);
        let value = RetryPolicy::default().run(fetch).await.unwrap();
        assert_eq!(value, json!({"n": 1}));
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn gives_up_after_three_attempts() {
        let (calls, fetch) = counting(vec!["a", "b", "c", "{\"never\":1}"]);
        let err = RetryPolicy::default().run(fetch).await.unwrap_err();
        assert!(err.is_cannot_parse());
        assert!(matches!(err, AiError::CannotParse { attempts: 3, .. }));
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn fetch_errors_are_not_retried() {
        let calls = Arc::new(AtomicU32::new(0));
        let seen = Arc::clone(&calls);
        let err = RetryPolicy::default()
            .run(move |_| {
                seen.fetch_add(1, Ordering::SeqCst);
                std::future::ready(Err(AiError::InvalidRequest("boom".into())))
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AiError::InvalidRequest(_)));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn zero_attempts_is_clamped_to_one() {
        assert_eq!(RetryPolicy::new(0).max_attempts(), 1);
    }
}
