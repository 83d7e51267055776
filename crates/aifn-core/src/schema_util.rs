//! Derive an output template from a Rust type.
//!
//! A definition's output template is arbitrary JSON. When the caller already
//! has a typed struct for the answer, the JSON Schema produced by
//! [`schemars`] is a precise template, so [`derive_output_template`] can be
//! used instead of writing one by hand.

use schemars::{
    r#gen::{SchemaGenerator, SchemaSettings},
    JsonSchema,
};
use serde_json::Value;

use crate::error::Result;

/// Generate an inline (no `$ref`) JSON Schema for `T`, without the
/// `$schema` meta key.
///
/// ```
/// use aifn_core::schema_util::derive_output_template;
/// use schemars::JsonSchema;
///
/// #[derive(JsonSchema)]
/// struct Doubled { doubled: i64 }
///
/// let template = derive_output_template::<Doubled>().unwrap();
/// assert_eq!(template["properties"]["doubled"]["type"], "integer");
/// ```
pub fn derive_output_template<T>() -> Result<Value>
where
    T: JsonSchema + 'static,
{
    let mut settings = SchemaSettings::draft07();
    settings.inline_subschemas = true;
    settings.meta_schema = None;

    let generator = SchemaGenerator::new(settings);
    let root = generator.into_root_schema_for::<T>();

    Ok(serde_json::to_value(root)?)
}
