//! gemini-style adapter.
//!
//! The API key is *set* as the `key` query parameter rather than sent as a
//! header. Roles are folded into `user` / `model`, and every message becomes
//! a single text part.
mod api;

use aifn_core::{
    config::{AiConfig, ProviderKind},
    error::{AiError, Result},
    generic::Message,
    provider::{HttpRequestParts, ProviderAdapter},
};
use reqwest::Url;
use serde::Deserialize;
use serde_json::Value;

pub use api::{
    Candidate, CandidateContent, CandidatePart, Content, GeminiRole, GenerateContentResponse, Part,
};

use crate::error::HttpError;

pub const DEFAULT_URL: &str =
    "https://generativelanguage.googleapis.com/v1beta/models/gemini-pro:generateContent";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Gemini;

impl Gemini {
    fn url(config: &AiConfig) -> Result<String> {
        let raw = config.url.as_deref().unwrap_or(DEFAULT_URL);
        let mut url = Url::parse(raw)
            .map_err(|err| AiError::InvalidRequest(format!("invalid url `{raw}`: {err}")))?;

        if let Some(key) = &config.key {
            let kept: Vec<(String, String)> = url
                .query_pairs()
                .filter(|(name, _)| name != "key")
                .map(|(name, value)| (name.into_owned(), value.into_owned()))
                .collect();

            let mut pairs = url.query_pairs_mut();
            pairs.clear();
            pairs.extend_pairs(kept);
            pairs.append_pair("key", key);
        }

        Ok(url.into())
    }
}

impl ProviderAdapter for Gemini {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Gemini
    }

    fn build_request(&self, messages: &[Message], config: &AiConfig) -> Result<HttpRequestParts> {
        let url = Self::url(config)?;

        let mut body = config.option.clone();
        let contents: Vec<Content> = messages.iter().map(Into::into).collect();
        body.insert("contents".to_owned(), serde_json::to_value(contents)?);

        Ok(HttpRequestParts {
            url,
            headers: HttpRequestParts::json_headers(),
            body: Value::Object(body),
        })
    }

    fn extract_text(&self, envelope: &Value) -> Result<String> {
        let response = GenerateContentResponse::deserialize(envelope).map_err(HttpError::from)?;

        response
            .candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content)
            .and_then(|content| content.parts.into_iter().next())
            .and_then(|part| part.text)
            .ok_or_else(|| {
                HttpError::Format("response has no candidate text part".into()).into()
            })
    }
}
