//! Builder-style helper for constructing **markdown prompts**.
//!
//! Every method takes and returns `self`, enabling call-chaining:
//!
//! ```rust
//! use aifn_prompt::builder::PromptBuilder;
//!
//! let md = PromptBuilder::new()
//!     .add_section_h2("Requirement")
//!     .add_bullets(["be terse", "reply in JSON"])
//!     .add_blank_line()
//!     .add_text_json(r#"{"ok":true}"#)
//!     .finalize();
//!
//! assert!(md.starts_with("## Requirement\n- be terse\n- reply in JSON\n"));
//! assert!(md.ends_with("```json\n{\"ok\":true}\n```\n"));
//! ```
//!
//! No validation and no smart formatting: newlines and whitespace are emitted
//! exactly as requested.

use std::fmt::Display;

/// Owns a `String` buffer that grows with each chained call. Call
/// [`Self::finalize`] to obtain the assembled markdown.
#[derive(Debug, Default, Clone)]
pub struct PromptBuilder {
    buffer: String,
}

impl PromptBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a level-2 (`##`) heading.
    pub fn add_section_h2(self, line: impl Display) -> Self {
        self.add_line(format_args!("## {line}"))
    }

    /// Add a plain line of text and a trailing newline.
    pub fn add_line(mut self, line: impl Display) -> Self {
        self.buffer.push_str(&line.to_string());
        self.buffer.push('\n');
        self
    }

    /// One `- item` line per entry.
    pub fn add_bullets<I>(self, items: I) -> Self
    where
        I: IntoIterator,
        I::Item: Display,
    {
        items
            .into_iter()
            .fold(self, |builder, item| builder.add_line(format_args!("- {item}")))
    }

    /// Embed a code block fenced as `json`.
    pub fn add_text_json(self, content: impl Display) -> Self {
        self.add_line("```json").add_line(content).add_line("```")
    }

    /// Insert a single blank line.
    pub fn add_blank_line(mut self) -> Self {
        self.buffer.push('\n');
        self
    }

    /// Append `other` verbatim.
    pub fn add_raw(mut self, other: &str) -> Self {
        self.buffer.push_str(other);
        self
    }

    /// Retrieve the accumulated markdown and consume the builder.
    pub fn finalize(self) -> String {
        self.buffer
    }
}
