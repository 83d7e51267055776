use aifn_core::{
    config::{AiConfig, ProviderKind},
    error::Result,
    generic::Message,
    provider::{HttpRequestParts, ProviderAdapter},
};
use serde_json::Value;

use crate::{chatgpt::ChatGpt, gemini::Gemini};

/// The closed set of supported adapters.
///
/// Chosen once from [`AiConfig::provider`] when a client is built; calls
/// dispatch through a `match` instead of comparing provider names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provider {
    ChatGpt(ChatGpt),
    Gemini(Gemini),
}

impl From<ProviderKind> for Provider {
    fn from(value: ProviderKind) -> Self {
        match value {
            ProviderKind::ChatGpt => Provider::ChatGpt(ChatGpt),
            ProviderKind::Gemini => Provider::Gemini(Gemini),
        }
    }
}

impl ProviderAdapter for Provider {
    fn kind(&self) -> ProviderKind {
        match self {
            Provider::ChatGpt(adapter) => adapter.kind(),
            Provider::Gemini(adapter) => adapter.kind(),
        }
    }

    fn build_request(&self, messages: &[Message], config: &AiConfig) -> Result<HttpRequestParts> {
        match self {
            Provider::ChatGpt(adapter) => adapter.build_request(messages, config),
            Provider::Gemini(adapter) => adapter.build_request(messages, config),
        }
    }

    fn extract_text(&self, envelope: &Value) -> Result<String> {
        match self {
            Provider::ChatGpt(adapter) => adapter.extract_text(envelope),
            Provider::Gemini(adapter) => adapter.extract_text(envelope),
        }
    }
}
