//! # `aifn` – LLM-backed JSON functions
//!
//! Describe a function once – input schema, output template, requirement
//! text, a few examples – and call it like a remote procedure backed by a
//! chat model. The reply is parsed into JSON (with a bounded re-ask loop when
//! the model answers with prose).
//!
//! | Crate                 | What it provides                                                  |
//! |-----------------------|-------------------------------------------------------------------|
//! | **`aifn-core`**       | Messages, [`AiConfig`], errors, JSON extraction, retry policy     |
//! | **`aifn-prompt`**     | Markdown builder, message chains, `$name` substitution            |
//! | **`aifn-providers`**  | chatgpt- and gemini-style adapters, HTTP transport, [`AiClient`]  |
//! | **`aifn`**            | [`Definition`] and the batch runner [`run_list`]                  |
//!
//! ## Quick example
//!
//! ```rust,no_run
//! use aifn::{AiClient, AiConfig, Definition, DefinitionSpec, ProviderKind};
//! use serde_json::json;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = AiClient::new(AiConfig::new(ProviderKind::ChatGpt).with_key("sk-…"))?;
//!
//!     let double = Definition::new(
//!         DefinitionSpec::new("double the input")
//!             .input("n", "number")
//!             .output(json!({ "doubled": "number" })),
//!     );
//!
//!     let answer = double.run(&client, json!({ "n": 5 })).await.into_result()?;
//!     println!("{answer:?}");
//!     Ok(())
//! }
//! ```
//!
//! ## Cancellation
//!
//! Every call returns a [`PendingCall`]. Its [`CancelHandle`] aborts the
//! request (and any pending re-asks); the call then resolves to
//! [`CallOutcome::Cancelled`].
#![doc(html_root_url = "https://docs.rs/aifn/latest")]

pub mod batch;
pub mod definition;

pub use aifn_core::{
    config::{AiConfig, ProviderKind},
    error::{AiError, Result},
    generic::{Message, Role},
    outcome::CallOutcome,
    retry::RetryPolicy,
};
pub use aifn_providers::{AiClient, AiClientBuilder, CancelHandle, PendingCall, Provider};
pub use batch::{BatchEntry, run_list, unpack_batch};
pub use definition::{Definition, DefinitionSpec, Script, TestExample};

pub use aifn_core::{extract, schema_util};
pub use aifn_prompt as prompt;
pub use aifn_providers as providers;
