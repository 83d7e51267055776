//! Several definition calls in one round-trip.
//!
//! The conversation is the usual system preamble, one user message per entry
//! (rendered exactly like [`Definition::run`]), and a closing instruction
//! asking for a single JSON array with one element per entry.
//!
//! The reply is passed through [`unpack_batch`] and otherwise returned
//! untouched: no per-entry retry, no length check.
use aifn_core::{config::AiConfig, generic::Message};
use aifn_prompt::chain::PromptChain;
use aifn_providers::{AiClient, PendingCall};
use serde_json::Value;

use crate::definition::{Definition, SYSTEM_PREAMBLE};

/// One call inside a batch.
#[derive(Debug, Clone)]
pub struct BatchEntry<'a> {
    pub definition: &'a Definition,
    pub input: Value,
}

impl<'a> BatchEntry<'a> {
    pub fn new(definition: &'a Definition, input: impl Into<Value>) -> Self {
        Self {
            definition,
            input: input.into(),
        }
    }
}

fn closing_instruction(count: usize) -> String {
    format!(
        "Answer each of the {count} calls above, in order. Reply with one JSON array of \
         {count} element(s) where element i is the output of call i. Reply with the array only."
    )
}

/// Conversation sent by [`run_list`].
pub fn batch_messages(entries: &[BatchEntry<'_>], config: &AiConfig) -> Vec<Message> {
    let calls: Vec<Message> = entries
        .iter()
        .map(|entry| {
            entry
                .definition
                .user_message(entry.input.clone(), config.insert_values)
        })
        .collect();

    PromptChain::new()
        .with(Message::system(SYSTEM_PREAMBLE))
        .with(calls)
        .with(Message::user(closing_instruction(entries.len())))
        .build()
}

/// Run every entry in a single AI call.
///
/// ```rust,no_run
/// use aifn::{AiClient, AiConfig, BatchEntry, Definition, DefinitionSpec, run_list};
/// use serde_json::json;
///
/// # async fn demo() -> aifn::Result<()> {
/// let client = AiClient::new(AiConfig::default().with_key("sk-…"))?;
/// let upper = Definition::new(DefinitionSpec::new("uppercase the text").input("text", "string"));
/// let count = Definition::new(DefinitionSpec::new("count the letters").input("text", "string"));
///
/// let results = run_list(&client, &[
///     BatchEntry::new(&upper, "hello"),
///     BatchEntry::new(&count, json!({ "text": "hello" })),
/// ])
/// .await
/// .into_result()?;
/// # Ok(())
/// # }
/// ```
pub fn run_list(client: &AiClient, entries: &[BatchEntry<'_>]) -> PendingCall {
    client
        .call(&batch_messages(entries, client.config()))
        .map_value(unpack_batch)
}

/// Best-effort normalisation of a batch reply.
///
/// Models sometimes wrap the array (or a single result) in an object such as
/// `{"results": [...]}`. An object with exactly one key is replaced by that
/// key's value; everything else is returned unchanged.
pub fn unpack_batch(value: Value) -> Value {
    match value {
        Value::Object(map) if map.len() == 1 => map
            .into_iter()
            .next()
            .map_or(Value::Null, |(_, inner)| inner),
        other => other,
    }
}
