//! Generic message and role types.
//!
//! They mirror the three roles every supported provider understands. Provider
//! adapters translate them into their own wire structs; see
//! `aifn-providers::chatgpt` and `aifn-providers::gemini`.
use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// A single chat message, independent of any specific provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    /// ```rust
    /// use aifn_core::generic::{Message, Role};
    ///
    /// let sys = Message::new("Reply with JSON only.", Role::System);
    /// assert_eq!(sys.role, Role::System);
    /// ```
    pub fn new(content: impl Into<String>, role: Role) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self::new(content, Role::System)
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(content, Role::User)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(content, Role::Assistant)
    }
}

/// Chat roles recognised by the supported providers.
///
/// Serialises to the canonical lowercase name, which is exactly what the
/// chatgpt-style API expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Global behaviour and output contract.
    System,
    /// Messages originating from the caller.
    User,
    /// Messages produced by the model.
    Assistant,
}

impl Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::System => write!(f, "system"),
            Role::User => write!(f, "user"),
            Role::Assistant => write!(f, "assistant"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_serialises_lowercase() {
        let json = serde_json::to_string(&Message::assistant("hi")).unwrap();
        assert_eq!(json, r#"{"role":"assistant","content":"hi"}"#);
        assert_eq!(Role::System.to_string(), "system");
    }
}
