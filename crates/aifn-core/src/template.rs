//! Conversion of arbitrary values into chat messages.
//!
//! [`IntoPrompt`] is the only trait a prompt fragment needs. The
//! `aifn-prompt` chain concatenates any number of implementors into one
//! conversation.
use crate::generic::Message;

/// Converts a value into a series of chat messages.
pub trait IntoPrompt {
    /// Consume `self` and return **all** messages in the desired order.
    fn into_prompt(self) -> Vec<Message>;
}

impl IntoPrompt for Message {
    fn into_prompt(self) -> Vec<Message> {
        vec![self]
    }
}

impl IntoPrompt for Vec<Message> {
    fn into_prompt(self) -> Vec<Message> {
        self
    }
}
