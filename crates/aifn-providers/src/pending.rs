//! Cancellable handle for an in-flight AI call.
//!
//! [`PendingCall`] is a future resolving to a
//! [`CallOutcome`](aifn_core::outcome::CallOutcome). Its [`CancelHandle`] can
//! be cloned and moved elsewhere; cancelling aborts the HTTP request and any
//! retries still queued, and the call then resolves to
//! `CallOutcome::Cancelled` instead of never settling.
use std::{
    fmt,
    future::Future,
    pin::Pin,
    task::{Context, Poll},
};

use aifn_core::{error::AiError, error::Result, outcome::CallOutcome};
use futures_util::{
    FutureExt,
    future::{AbortHandle, Abortable, BoxFuture},
};
use serde_json::Value;

#[derive(Debug, Clone)]
pub struct CancelHandle {
    inner: AbortHandle,
}

impl CancelHandle {
    /// Request cancellation. A no-op once the call has finished.
    pub fn cancel(&self) {
        self.inner.abort();
    }

    /// Whether [`Self::cancel`] has been called, including after the call
    /// already finished.
    pub fn is_cancelled(&self) -> bool {
        self.inner.is_aborted()
    }
}

pub struct PendingCall {
    handle: CancelHandle,
    future: BoxFuture<'static, CallOutcome<Value>>,
}

impl PendingCall {
    pub fn new<F>(future: F) -> Self
    where
        F: Future<Output = Result<Value>> + Send + 'static,
    {
        let (inner, registration) = AbortHandle::new_pair();
        let future = Abortable::new(future, registration)
            .map(|result| match result {
                Ok(result) => CallOutcome::from(result),
                Err(_aborted) => CallOutcome::Cancelled,
            })
            .boxed();

        Self {
            handle: CancelHandle { inner },
            future,
        }
    }

    /// A call that fails before anything is sent.
    pub fn failed(err: AiError) -> Self {
        Self::new(async move { Err(err) })
    }

    pub fn cancel_handle(&self) -> CancelHandle {
        self.handle.clone()
    }

    pub fn cancel(&self) {
        self.handle.cancel();
    }

    /// Transform a successful value; failures and cancellation pass through.
    pub fn map_value<F>(self, f: F) -> Self
    where
        F: FnOnce(Value) -> Value + Send + 'static,
    {
        Self {
            handle: self.handle,
            future: self.future.map(move |outcome| outcome.map(f)).boxed(),
        }
    }
}

impl Future for PendingCall {
    type Output = CallOutcome<Value>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        self.future.as_mut().poll(cx)
    }
}

impl fmt::Debug for PendingCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PendingCall")
            .field("cancelled", &self.handle.is_cancelled())
            .finish_non_exhaustive()
    }
}
