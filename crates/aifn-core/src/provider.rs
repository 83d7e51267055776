//! The seam every backend implements.
//!
//! A provider adapter is a **pure** translation layer:
//!
//! * [`ProviderAdapter::build_request`] maps a conversation plus the client's
//!   [`AiConfig`] onto a ready-to-send [`HttpRequestParts`].
//! * [`ProviderAdapter::extract_text`] digs the completion text out of the
//!   provider's decoded response envelope.
//!
//! Transport, retries and cancellation are handled by the caller, so an
//! adapter never touches the network and never keeps state between calls.
use std::collections::BTreeMap;

use serde_json::Value;

use crate::{
    config::{AiConfig, ProviderKind},
    error::Result,
    generic::Message,
};

/// Everything the transport needs for one POST.
///
/// The header map is created fresh for every request.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequestParts {
    pub url: String,
    pub headers: BTreeMap<String, String>,
    pub body: Value,
}

impl HttpRequestParts {
    /// Header set shared by both providers.
    pub fn json_headers() -> BTreeMap<String, String> {
        BTreeMap::from([("content-type".to_owned(), "application/json".to_owned())])
    }
}

pub trait ProviderAdapter: Send + Sync {
    fn kind(&self) -> ProviderKind;

    fn build_request(&self, messages: &[Message], config: &AiConfig) -> Result<HttpRequestParts>;

    /// Locate the raw completion text inside a decoded response.
    fn extract_text(&self, envelope: &Value) -> Result<String>;
}
