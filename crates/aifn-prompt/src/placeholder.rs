//! `$name` substitution for requirement text.
//!
//! A placeholder is a `$` followed by one or more ASCII alphanumerics or
//! underscores. Placeholders whose name is a key of the supplied object are
//! replaced by the value (strings verbatim, everything else as compact JSON);
//! all other text, including unknown placeholders, is kept as is.
//!
//! ```rust
//! use aifn_prompt::placeholder::insert_values;
//! use serde_json::json;
//!
//! let values = json!({ "a": 2, "b": 3 });
//! let text = insert_values("Add $a and $b", values.as_object().unwrap());
//! assert_eq!(text, "Add 2 and 3");
//! ```
use serde_json::{Map, Value};

pub fn insert_values(text: &str, values: &Map<String, Value>) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(pos) = rest.find('$') {
        out.push_str(&rest[..pos]);
        let after = &rest[pos + 1..];
        let name_len = after
            .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
            .unwrap_or(after.len());
        let name = &after[..name_len];

        match values.get(name) {
            Some(value) if !name.is_empty() => out.push_str(&render_value(value)),
            _ => {
                out.push('$');
                out.push_str(name);
            }
        }
        rest = &after[name_len..];
    }
    out.push_str(rest);
    out
}

fn render_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected an object"),
        }
    }

    #[test]
    fn strings_are_inserted_raw() {
        let values = object(json!({ "name": "Ada", "tags": ["x", "y"] }));
        assert_eq!(
            insert_values("Greet $name, tags $tags.", &values),
            r#"Greet Ada, tags ["x","y"]."#
        );
    }

    #[test]
    fn longest_identifier_is_matched() {
        let values = object(json!({ "a": 1, "ab": 2 }));
        assert_eq!(insert_values("$ab $a $abc", &values), "2 1 $abc");
    }

    #[test]
    fn lone_and_trailing_dollars_survive() {
        let values = object(json!({ "a": 1 }));
        assert_eq!(insert_values("cost: $ 5$", &values), "cost: $ 5$");
        assert_eq!(insert_values("$$a", &values), "$1");
    }

    #[test]
    fn unicode_around_placeholders() {
        let values = object(json!({ "x": "ü" }));
        assert_eq!(insert_values("→$x←", &values), "→ü←");
    }
}
