//! # `aifn-core`
//!
//! Provider-agnostic building blocks shared by every crate in the workspace:
//!
//! * [`generic`] – chat [`Message`](generic::Message)s and [`Role`](generic::Role)s.
//! * [`config`] – the [`AiConfig`](config::AiConfig) a client is built from.
//! * [`provider`] – the [`ProviderAdapter`](provider::ProviderAdapter) seam
//!   every backend implements.
//! * [`extract`] / [`retry`] – turning a model's free text into JSON, with a
//!   bounded retry loop.
//! * [`outcome`] – the tagged result of a single AI call.
//!
//! Nothing in here performs I/O; the HTTP side lives in `aifn-providers`.
pub mod config;
pub mod error;
pub mod extract;
pub mod generic;
pub mod outcome;
pub mod provider;
pub mod retry;
pub mod schema_util;
pub mod template;
