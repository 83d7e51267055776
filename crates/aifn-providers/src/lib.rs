//! HTTP backends for the two supported provider shapes.
//!
//! * [`chatgpt::ChatGpt`] and [`gemini::Gemini`] – pure request/response
//!   adapters implementing [`aifn_core::provider::ProviderAdapter`].
//! * [`Provider`] – the closed set of adapters, picked once from the config.
//! * [`AiClient`] – owns config, transport and retry policy; every call
//!   returns a cancellable [`PendingCall`].
pub mod chatgpt;
mod client;
pub mod error;
pub mod gemini;
mod pending;
mod provider;
mod transport;

pub use client::{AiClient, AiClientBuilder};
pub use pending::{CancelHandle, PendingCall};
pub use provider::Provider;
pub use transport::Transport;
