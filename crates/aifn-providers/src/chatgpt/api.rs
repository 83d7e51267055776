//! Wire types for the chatgpt-style `chat/completions` endpoint. Only the
//! fields this crate reads or writes are modelled.
use aifn_core::generic::{Message, Role};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatCompletionMessage {
    pub role: Role,
    pub content: String,
}

impl From<&Message> for ChatCompletionMessage {
    fn from(value: &Message) -> Self {
        Self {
            role: value.role,
            content: value.content.clone(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ChatCompletionResponse {
    #[serde(default)]
    pub choices: Vec<ChatCompletionChoice>,
}

#[derive(Debug, Deserialize)]
pub struct ChatCompletionChoice {
    pub message: ChatCompletionResponseMessage,
}

#[derive(Debug, Deserialize)]
pub struct ChatCompletionResponseMessage {
    #[serde(default)]
    pub content: Option<String>,
}
