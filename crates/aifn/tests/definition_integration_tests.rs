use std::time::Duration;

use aifn::{
    AiClient, AiConfig, BatchEntry, CallOutcome, Definition, DefinitionSpec, ProviderKind,
    run_list,
};
use serde_json::{Value, json};
use wiremock::{
    Mock, MockServer, Request, ResponseTemplate,
    matchers::{method, path},
};

// ============================================================================
// Helper Functions
// ============================================================================

const CHAT_PATH: &str = "/v1/chat/completions";

fn chatgpt_reply(content: &str) -> Value {
    json!({ "choices": [{ "message": { "role": "assistant", "content": content } }] })
}

fn client_for(server: &MockServer) -> AiClient {
    AiClient::new(AiConfig::default().with_url(format!("{}{CHAT_PATH}", server.uri()))).unwrap()
}

fn double() -> Definition {
    Definition::new(
        DefinitionSpec::new("double the input")
            .input("n", "number")
            .output(json!({ "doubled": "number" })),
    )
}

/// Contents of every message in the single recorded request.
async fn sent_messages(server: &MockServer) -> Vec<String> {
    let requests: Vec<Request> = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    let body: Value = serde_json::from_slice(&requests[0].body).unwrap();
    body["messages"]
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m["content"].as_str().unwrap().to_owned())
        .collect()
}

// ============================================================================
// Definition::run
// ============================================================================

#[tokio::test]
async fn run_doubles_end_to_end() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(CHAT_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(chatgpt_reply("{\"doubled\":10}")))
        .expect(1)
        .mount(&server)
        .await;

    let outcome = double().run(&client_for(&server), json!({ "n": 5 })).await;

    assert!(matches!(outcome, CallOutcome::Success(ref v) if *v == json!({ "doubled": 10 })));

    let messages = sent_messages(&server).await;
    assert_eq!(messages.len(), 2);
    assert!(messages[1].contains(r#"{"n":"number"}"#));
    assert!(messages[1].contains(r#"{"n":5}"#));
}

#[tokio::test]
async fn run_with_insert_values_sends_substituted_requirement() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(CHAT_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(chatgpt_reply("{\"sum\":5}")))
        .mount(&server)
        .await;

    let add = Definition::new(
        DefinitionSpec::new("Add $a and $b")
            .input("a", "number")
            .input("b", "number"),
    );
    let client = client_for(&server);
    let client = client
        .with_config(client.config().clone().with_insert_values(true))
        .unwrap();

    let outcome = add.run(&client, json!({ "a": 2, "b": 3 })).await;
    assert!(outcome.is_success());

    let messages = sent_messages(&server).await;
    assert!(messages[1].contains("Add 2 and 3"));
    assert!(!messages[1].contains(r#"{"a":"number""#));
}

#[tokio::test]
async fn cancelled_run_resolves_as_cancelled() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(CHAT_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(chatgpt_reply("{}"))
                .set_delay(Duration::from_secs(20)),
        )
        .mount(&server)
        .await;

    let call = double().run(&client_for(&server), json!({ "n": 1 }));
    let handle = call.cancel_handle();
    let waiter = tokio::spawn(call);
    tokio::time::sleep(Duration::from_millis(50)).await;
    handle.cancel();

    let outcome = tokio::time::timeout(Duration::from_secs(5), waiter)
        .await
        .expect("cancelled call must settle")
        .unwrap();
    assert!(outcome.is_cancelled());
    assert!(handle.is_cancelled());
}

// ============================================================================
// run_list
// ============================================================================

#[tokio::test]
async fn run_list_unwraps_single_key_reply() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(CHAT_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(chatgpt_reply("```json\n{\"results\": [{\"doubled\":2}, \"ABC\"]}\n```")),
        )
        .expect(1)
        .mount(&server)
        .await;

    let upper = Definition::new(DefinitionSpec::new("uppercase").input("text", "string"));
    let double = double();
    let entries = [
        BatchEntry::new(&double, json!({ "n": 1 })),
        BatchEntry::new(&upper, "abc"),
    ];

    let outcome = run_list(&client_for(&server), &entries).await;

    assert!(matches!(outcome, CallOutcome::Success(ref v) if *v == json!([{ "doubled": 2 }, "ABC"])));

    let messages = sent_messages(&server).await;
    assert_eq!(messages.len(), 4);
    assert!(messages[1].contains(r#"{"n":1}"#));
    assert!(messages[2].contains(r#"{"text":"abc"}"#));
}

#[tokio::test]
async fn run_list_passes_short_arrays_through() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(CHAT_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(chatgpt_reply("[1]")))
        .mount(&server)
        .await;

    let double = double();
    let entries = [
        BatchEntry::new(&double, json!({ "n": 1 })),
        BatchEntry::new(&double, json!({ "n": 2 })),
    ];

    let outcome = run_list(&client_for(&server), &entries).await;
    assert!(matches!(outcome, CallOutcome::Success(ref v) if *v == json!([1])));
}

// ============================================================================
// Loading from files
// ============================================================================

#[test]
fn config_and_definition_load_from_yaml() {
    let config: AiConfig = serde_yaml::from_str(
        "type: gemini\nkey: abc\noption:\n  generationConfig:\n    temperature: 0\ninsertV: true\n",
    )
    .unwrap();
    assert_eq!(config.provider, ProviderKind::Gemini);
    assert_eq!(config.key.as_deref(), Some("abc"));
    assert_eq!(config.option["generationConfig"]["temperature"], 0);
    assert!(config.insert_values);

    let spec: DefinitionSpec = serde_yaml::from_str(
        "input:\n  n: number\noutput:\n  doubled: number\nscript: double the input\ntest:\n  input: {n: 2}\n  output: {doubled: 4}\n",
    )
    .unwrap();
    let def = Definition::new(spec);
    assert_eq!(def.text(), double_with_example().text());
}

fn double_with_example() -> Definition {
    Definition::new(
        DefinitionSpec::new("double the input")
            .input("n", "number")
            .output(json!({ "doubled": "number" }))
            .test(json!({ "n": 2 }), json!({ "doubled": 4 })),
    )
}
