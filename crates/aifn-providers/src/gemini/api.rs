//! Wire types for the gemini-style `generateContent` endpoint.
use aifn_core::generic::{Message, Role};
use serde::{Deserialize, Serialize};

/// Gemini only knows two roles. System prompts travel as user turns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GeminiRole {
    User,
    Model,
}

impl From<Role> for GeminiRole {
    fn from(value: Role) -> Self {
        match value {
            Role::System | Role::User => GeminiRole::User,
            Role::Assistant => GeminiRole::Model,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Content {
    pub role: GeminiRole,
    pub parts: Vec<Part>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Part {
    pub text: String,
}

impl From<&Message> for Content {
    fn from(value: &Message) -> Self {
        Self {
            role: value.role.into(),
            parts: vec![Part {
                text: value.content.clone(),
            }],
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
pub struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
pub struct CandidatePart {
    #[serde(default)]
    pub text: Option<String>,
}
