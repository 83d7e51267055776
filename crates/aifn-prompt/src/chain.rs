//! Concatenates values implementing
//! [`IntoPrompt`](aifn_core::template::IntoPrompt) into one conversation.
//!
//! ```rust
//! use aifn_prompt::chain::PromptChain;
//! use aifn_core::generic::{Message, Role};
//!
//! let messages = PromptChain::new()
//!     .with(Message::system("Act as a function."))
//!     .with(vec![Message::user("first"), Message::user("second")])
//!     .build();
//!
//! assert_eq!(messages.len(), 3);
//! assert_eq!(messages[0].role, Role::System);
//! ```
use aifn_core::{generic::Message, template::IntoPrompt};

/// Order of `with` calls is the order of the resulting messages.
#[derive(Debug, Default, Clone)]
pub struct PromptChain(Vec<Message>);

impl PromptChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append the messages produced by `with` to the chain.
    pub fn with(mut self, with: impl IntoPrompt) -> Self {
        self.0.append(&mut with.into_prompt());
        self
    }

    /// Consume the builder and return the accumulated messages.
    pub fn build(self) -> Vec<Message> {
        self.0
    }
}
