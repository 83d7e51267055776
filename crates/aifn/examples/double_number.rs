//! # Double a number, twice
//!
//! Builds a client from the environment, runs one definition on its own and
//! then two calls in a single batch.
//!
//! ```bash
//! export OPENAI_API_KEY=sk-…
//! cargo run -p aifn --example double_number
//! ```
//!
//! Set `AIFN_PROVIDER=gemini` (and `GEMINI_API_KEY`) to use the gemini-style
//! endpoint instead.
use aifn::{
    AiClientBuilder, BatchEntry, CallOutcome, Definition, DefinitionSpec, ProviderKind, run_list,
};
use serde_json::json;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let provider = match std::env::var("AIFN_PROVIDER").as_deref() {
        Ok("gemini") => ProviderKind::Gemini,
        _ => ProviderKind::ChatGpt,
    };
    let client = AiClientBuilder::new_from_env(provider).build()?;

    let double = Definition::new(
        DefinitionSpec::new("double the input")
            .input("n", "number: any integer")
            .output(json!({ "doubled": "number" }))
            .test(json!({ "n": 2 }), json!({ "doubled": 4 })),
    );

    match double.run(&client, json!({ "n": 5 })).await {
        CallOutcome::Success(value) => println!("single: {value}"),
        CallOutcome::Failure(err) => return Err(err.into()),
        CallOutcome::Cancelled => println!("single: cancelled"),
    }

    let batch = run_list(
        &client,
        &[
            BatchEntry::new(&double, json!({ "n": 1 })),
            BatchEntry::new(&double, json!({ "n": 21 })),
        ],
    )
    .await
    .into_result()?;
    println!("batch: {batch:?}");

    Ok(())
}
