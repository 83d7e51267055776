//! chatgpt-style adapter.
//!
//! * URL: `config.url` or [`DEFAULT_URL`].
//! * Headers: `content-type`, plus `Authorization: Bearer <key>` when a key
//!   is configured.
//! * Body: `{ "model": DEFAULT_MODEL, ...config.option, "messages": [...] }`,
//!   so an option named `model` replaces the default.
mod api;

use aifn_core::{
    config::{AiConfig, ProviderKind},
    error::Result,
    generic::Message,
    provider::{HttpRequestParts, ProviderAdapter},
};
use serde::Deserialize;
use serde_json::{Map, Value};

pub use api::{
    ChatCompletionChoice, ChatCompletionMessage, ChatCompletionResponse,
    ChatCompletionResponseMessage,
};

use crate::error::HttpError;

pub const DEFAULT_URL: &str = "https://api.openai.com/v1/chat/completions";
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChatGpt;

impl ProviderAdapter for ChatGpt {
    fn kind(&self) -> ProviderKind {
        ProviderKind::ChatGpt
    }

    fn build_request(&self, messages: &[Message], config: &AiConfig) -> Result<HttpRequestParts> {
        let url = config.url.as_deref().unwrap_or(DEFAULT_URL).to_owned();

        let mut headers = HttpRequestParts::json_headers();
        if let Some(key) = &config.key {
            headers.insert("authorization".to_owned(), format!("Bearer {key}"));
        }

        let mut body = Map::new();
        body.insert("model".to_owned(), Value::from(DEFAULT_MODEL));
        for (name, value) in &config.option {
            body.insert(name.clone(), value.clone());
        }
        let messages: Vec<ChatCompletionMessage> = messages.iter().map(Into::into).collect();
        body.insert("messages".to_owned(), serde_json::to_value(messages)?);

        Ok(HttpRequestParts {
            url,
            headers,
            body: Value::Object(body),
        })
    }

    fn extract_text(&self, envelope: &Value) -> Result<String> {
        let response = ChatCompletionResponse::deserialize(envelope).map_err(HttpError::from)?;

        let Some(first_choice) = response.choices.into_iter().next() else {
            return Err(HttpError::Format("response has no choices".into()).into());
        };

        first_choice
            .message
            .content
            .ok_or_else(|| HttpError::Format("first choice has no content".into()).into())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn conversation() -> Vec<Message> {
        vec![
            Message::system("act as a function"),
            Message::user("{\"n\":5}"),
            Message::assistant("{\"doubled\":10}"),
        ]
    }

    #[test]
    fn defaults_without_key() {
        let parts = ChatGpt
            .build_request(&conversation(), &AiConfig::default())
            .unwrap();

        assert_eq!(parts.url, DEFAULT_URL);
        assert_eq!(parts.headers.len(), 1);
        assert_eq!(parts.headers["content-type"], "application/json");
        assert_eq!(
            parts.body,
            json!({
                "model": "gpt-3.5-turbo",
                "messages": [
                    { "role": "system", "content": "act as a function" },
                    { "role": "user", "content": "{\"n\":5}" },
                    { "role": "assistant", "content": "{\"doubled\":10}" },
                ]
            })
        );
    }

    #[test]
    fn key_becomes_bearer_header_and_options_merge() {
        let config = AiConfig::default()
            .with_key("sk-test")
            .with_url("http://localhost:9000/v1/chat")
            .with_option("model", "gpt-4o-mini")
            .with_option("temperature", 0);

        let parts = ChatGpt.build_request(&conversation(), &config).unwrap();

        assert_eq!(parts.url, "http://localhost:9000/v1/chat");
        assert_eq!(parts.headers["authorization"], "Bearer sk-test");
        assert_eq!(parts.body["model"], "gpt-4o-mini");
        assert_eq!(parts.body["temperature"], 0);
        assert_eq!(parts.body["messages"].as_array().unwrap().len(), 3);
    }

    #[test]
    fn headers_are_fresh_per_request() {
        let with_key = AiConfig::default().with_key("sk-test");
        let first = ChatGpt.build_request(&conversation(), &with_key).unwrap();
        let second = ChatGpt
            .build_request(&conversation(), &AiConfig::default())
            .unwrap();

        assert!(first.headers.contains_key("authorization"));
        assert!(!second.headers.contains_key("authorization"));
    }

    #[test]
    fn extracts_first_choice_content() {
        let envelope = json!({
            "choices": [
                { "message": { "role": "assistant", "content": "```json\n{}\n```" } },
                { "message": { "role": "assistant", "content": "ignored" } }
            ]
        });
        assert_eq!(ChatGpt.extract_text(&envelope).unwrap(), "```json\n{}\n```");
    }

    #[test]
    fn missing_choices_is_a_format_error() {
        let err = ChatGpt.extract_text(&json!({ "choices": [] })).unwrap_err();
        assert!(err.to_string().contains("no choices"));

        let err = ChatGpt
            .extract_text(&json!({ "error": { "message": "bad key" } }))
            .unwrap_err();
        assert!(err.to_string().contains("no choices"));
    }
}
