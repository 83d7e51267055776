//! Helpers for assembling prompt text and conversations.
//!
//! * [`builder::PromptBuilder`] – fluent markdown writer.
//! * [`chain::PromptChain`] – concatenates message fragments in order.
//! * [`placeholder::insert_values`] – `$name` substitution in requirement text.
pub mod builder;
pub mod chain;
pub mod placeholder;
