//! Reusable prompt templates that behave like functions.
//!
//! A [`Definition`] bundles an input schema, an output template, the
//! requirement text and optional worked examples. The prompt fragment built
//! from these fields is rendered once, at construction, and reused by every
//! [`Definition::run`].
//!
//! ```rust
//! use aifn::{AiConfig, Definition, DefinitionSpec, Role};
//! use serde_json::json;
//!
//! let double = Definition::new(
//!     DefinitionSpec::new("double the input")
//!         .input("n", "number")
//!         .output(json!({ "doubled": "number" })),
//! );
//!
//! let messages = double.messages(json!({ "n": 5 }), &AiConfig::default());
//! assert_eq!(messages[0].role, Role::System);
//! assert!(messages[1].content.contains(r#"{"n":"number"}"#));
//! assert!(messages[1].content.contains(r#"{"n":5}"#));
//! ```
//!
//! Definitions can also be loaded from data using the construction-input
//! shape `{ input?, output?, script: string | string[], test?: example |
//! example[] }`:
//!
//! ```rust
//! use aifn::Definition;
//!
//! let def = Definition::from_json(r#"{
//!     "input": { "text": "string: a sentence" },
//!     "output": { "words": "number" },
//!     "script": ["count the words", "ignore punctuation"],
//!     "test": { "input": { "text": "Hi there!" }, "output": { "words": 2 } }
//! }"#).unwrap();
//! assert!(def.text().contains("- ignore punctuation"));
//! ```
use aifn_core::{
    config::AiConfig,
    error::Result,
    generic::Message,
    schema_util::derive_output_template,
};
use aifn_prompt::{builder::PromptBuilder, chain::PromptChain, placeholder::insert_values};
use aifn_providers::{AiClient, PendingCall};
use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// System message opening every conversation.
pub const SYSTEM_PREAMBLE: &str = "Act as a function. Each call gives you a requirement, \
optionally an input schema, an output template and worked examples, followed by the actual \
call input. Apply the requirement to the input and reply with machine-parseable JSON only: \
no explanations, no prose, no comments.";

/// Key used for a bare string input when no schema is declared.
pub const DEFAULT_INPUT_KEY: &str = "input";

const INPUT_GUIDANCE: &str = "The call input is a JSON object. Each key below is a parameter \
name; its value describes the parameter's type and meaning.";
const OUTPUT_GUIDANCE: &str = "Reply with JSON shaped like this template. Values describe the \
expected type and meaning of each field.";

/// Requirement text: one paragraph or a list of bullet points.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Script {
    Text(String),
    Bullets(Vec<String>),
}

impl From<&str> for Script {
    fn from(value: &str) -> Self {
        Script::Text(value.to_owned())
    }
}

impl From<String> for Script {
    fn from(value: String) -> Self {
        Script::Text(value)
    }
}

impl From<Vec<String>> for Script {
    fn from(value: Vec<String>) -> Self {
        Script::Bullets(value)
    }
}

impl From<Vec<&str>> for Script {
    fn from(value: Vec<&str>) -> Self {
        Script::Bullets(value.into_iter().map(str::to_owned).collect())
    }
}

/// An input / expected-output pair shown to the model. Never executed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestExample {
    pub input: Value,
    pub output: Value,
}

/// Construction input for a [`Definition`].
///
/// Nothing here is validated: whatever is supplied ends up in the prompt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DefinitionSpec {
    /// Parameter name → type / description, in declaration order.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input: Option<Map<String, Value>>,
    /// Arbitrary JSON template of the expected reply.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<Value>,
    pub script: Script,
    #[serde(
        default,
        deserialize_with = "one_or_many",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub test: Vec<TestExample>,
}

impl DefinitionSpec {
    pub fn new(script: impl Into<Script>) -> Self {
        Self {
            input: None,
            output: None,
            script: script.into(),
            test: Vec::new(),
        }
    }

    /// Declare one input parameter. Declaration order is kept.
    pub fn input(mut self, name: impl Into<String>, schema: impl Into<Value>) -> Self {
        self.input
            .get_or_insert_with(Map::new)
            .insert(name.into(), schema.into());
        self
    }

    pub fn input_schema(mut self, schema: Map<String, Value>) -> Self {
        self.input = Some(schema);
        self
    }

    pub fn output(mut self, template: impl Into<Value>) -> Self {
        self.output = Some(template.into());
        self
    }

    /// Use the JSON Schema of `T` as the output template.
    pub fn output_type<T: JsonSchema + 'static>(mut self) -> Result<Self> {
        self.output = Some(derive_output_template::<T>()?);
        Ok(self)
    }

    pub fn test(mut self, input: impl Into<Value>, output: impl Into<Value>) -> Self {
        self.test.push(TestExample {
            input: input.into(),
            output: output.into(),
        });
        self
    }
}

fn one_or_many<'de, D>(deserializer: D) -> std::result::Result<Vec<TestExample>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Examples {
        One(TestExample),
        Many(Vec<TestExample>),
    }

    Ok(match Examples::deserialize(deserializer)? {
        Examples::One(example) => vec![example],
        Examples::Many(examples) => examples,
    })
}

#[derive(Debug, Clone)]
pub struct Definition {
    spec: DefinitionSpec,
    text: String,
}

impl From<DefinitionSpec> for Definition {
    fn from(value: DefinitionSpec) -> Self {
        Self::new(value)
    }
}

impl Definition {
    pub fn new(spec: DefinitionSpec) -> Self {
        let text = render(&spec, None);
        Self { spec, text }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let spec: DefinitionSpec = serde_json::from_str(json)?;
        Ok(Self::new(spec))
    }

    /// The cached prompt fragment (input schema, output template,
    /// requirement, examples).
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Wrap a bare string under the first declared parameter, or under
    /// [`DEFAULT_INPUT_KEY`] without a schema. Other values pass through.
    pub fn normalize_input(&self, input: Value) -> Value {
        if !input.is_string() {
            return input;
        }
        Value::Object(self.wrap_input(input))
    }

    fn wrap_input(&self, input: Value) -> Map<String, Value> {
        let key = self
            .spec
            .input
            .as_ref()
            .and_then(|schema| schema.keys().next())
            .map_or(DEFAULT_INPUT_KEY, String::as_str);

        let mut wrapped = Map::new();
        wrapped.insert(key.to_owned(), input);
        wrapped
    }

    /// The user message for one call of this definition.
    ///
    /// With `insert_values` the requirement's `$name` tokens are replaced by
    /// the call values, and neither the input schema nor the raw input is
    /// sent. Any input that is not an object is bound to the first declared
    /// parameter (or [`DEFAULT_INPUT_KEY`]), so `$n` still resolves for a
    /// bare `5`.
    pub fn user_message(&self, input: Value, insert_values: bool) -> Message {
        if insert_values {
            let values = match input {
                Value::Object(values) => values,
                other => self.wrap_input(other),
            };
            return Message::user(render(&self.spec, Some(&values)));
        }

        let input = self.normalize_input(input);

        let content = PromptBuilder::new()
            .add_raw(&self.text)
            .add_blank_line()
            .add_section_h2("Call")
            .add_text_json(input)
            .finalize();
        Message::user(content)
    }

    /// System preamble followed by this definition's user message.
    pub fn messages(&self, input: Value, config: &AiConfig) -> Vec<Message> {
        PromptChain::new()
            .with(Message::system(SYSTEM_PREAMBLE))
            .with(self.user_message(input, config.insert_values))
            .build()
    }

    /// Execute one call with `client`'s config.
    pub fn run(&self, client: &AiClient, input: impl Into<Value>) -> PendingCall {
        client.call(&self.messages(input.into(), client.config()))
    }
}

/// Render the prompt fragment. `values` switches to insert-values mode.
fn render(spec: &DefinitionSpec, values: Option<&Map<String, Value>>) -> String {
    let mut builder = PromptBuilder::new();

    if let (Some(schema), None) = (&spec.input, values) {
        builder = builder
            .add_section_h2("Input")
            .add_line(INPUT_GUIDANCE)
            .add_text_json(Value::Object(schema.clone()))
            .add_blank_line();
    }

    if let Some(output) = &spec.output {
        builder = builder
            .add_section_h2("Output")
            .add_line(OUTPUT_GUIDANCE)
            .add_text_json(output)
            .add_blank_line();
    }

    let substitute = |text: &str| match values {
        Some(values) => insert_values(text, values),
        None => text.to_owned(),
    };

    builder = builder.add_section_h2("Requirement");
    builder = match &spec.script {
        Script::Text(text) => builder.add_line(substitute(text.as_str())),
        Script::Bullets(items) => {
            builder.add_bullets(items.iter().map(|item| substitute(item.as_str())))
        }
    };

    for (index, example) in spec.test.iter().enumerate() {
        builder = builder
            .add_blank_line()
            .add_section_h2(format_args!("Example {}", index + 1))
            .add_line("Input:")
            .add_text_json(&example.input)
            .add_line("Expected output:")
            .add_text_json(&example.output);
    }

    builder.finalize()
}
