//! Configuration shared by every call a client makes.
//!
//! An [`AiConfig`] is built once (in code, or deserialised from a JSON / YAML
//! file using the wire names `type`, `key`, `url`, `option`, `insertV`) and
//! handed to a client. Clients keep it behind an `Arc`; there is no global
//! setter.
//!
//! ```rust
//! use aifn_core::config::{AiConfig, ProviderKind};
//!
//! let config: AiConfig = serde_json::from_str(
//!     r#"{ "type": "gemini", "key": "k", "insertV": true }"#,
//! ).unwrap();
//! assert_eq!(config.provider, ProviderKind::Gemini);
//! assert!(config.insert_values);
//! ```
use std::fmt::Display;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The two supported wire shapes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    /// OpenAI-style `chat/completions`.
    #[default]
    ChatGpt,
    /// Google `generateContent`.
    Gemini,
}

impl Display for ProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProviderKind::ChatGpt => write!(f, "chatgpt"),
            ProviderKind::Gemini => write!(f, "gemini"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AiConfig {
    #[serde(rename = "type", default)]
    pub provider: ProviderKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    /// Replaces the provider's default endpoint.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Merged verbatim into the request body (`model`, `temperature`,
    /// `generationConfig`, …).
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub option: Map<String, Value>,
    /// Substitute `$name` tokens in requirement text instead of sending the
    /// input schema.
    #[serde(rename = "insertV", default)]
    pub insert_values: bool,
}

impl AiConfig {
    pub fn new(provider: ProviderKind) -> Self {
        Self {
            provider,
            ..Self::default()
        }
    }

    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Add a single body option. Later calls overwrite earlier ones.
    pub fn with_option(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.option.insert(name.into(), value.into());
        self
    }

    pub fn with_insert_values(mut self, insert_values: bool) -> Self {
        self.insert_values = insert_values;
        self
    }
}
