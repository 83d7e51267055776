//! Best-effort JSON extraction from model output.
//!
//! Models often wrap JSON answers in a markdown fence:
//!
//! ````text
//! ```json
//! {"doubled": 10}
//! ```
//! ````
//!
//! [`strip_json_fence`] removes exactly the first and the last line of such a
//! reply. It assumes the fence markers sit on their own lines; a single-line
//! fenced reply collapses to an empty string and fails to parse.
use std::borrow::Cow;

use serde_json::Value;

/// Opening marker that triggers fence stripping.
pub const JSON_FENCE: &str = "```json";

/// ```rust
/// use aifn_core::extract::strip_json_fence;
///
/// assert_eq!(strip_json_fence("```json\n{\"a\":1}\n```"), "{\"a\":1}");
/// assert_eq!(strip_json_fence("{\"a\":1}"), "{\"a\":1}");
/// ```
pub fn strip_json_fence(text: &str) -> Cow<'_, str> {
    if !text.starts_with(JSON_FENCE) {
        return Cow::Borrowed(text);
    }

    let lines: Vec<&str> = text.split('\n').collect();
    if lines.len() < 2 {
        return Cow::Borrowed("");
    }
    Cow::Owned(lines[1..lines.len() - 1].join("\n"))
}

/// Strip an optional fence and parse what is left.
pub fn parse_completion(text: &str) -> Result<Value, serde_json::Error> {
    serde_json::from_str(&strip_json_fence(text))
}
