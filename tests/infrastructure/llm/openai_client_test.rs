use std::sync::{Arc, Mutex};

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode, Uri};
use axum::response::IntoResponse;
use axum::{Json, Router};
use serde_json::{Value, json};

use docchat::application::ports::{LlmClient, LlmClientError};
use docchat::infrastructure::llm::OpenAiClient;
use docchat::presentation::config::LlmSettings;

use crate::support::spawn_server;

#[derive(Clone, Default)]
struct Seen {
    path: String,
    authorization: String,
    body: Value,
}

#[derive(Clone)]
struct FakeChat {
    status: StatusCode,
    reply: Value,
    seen: Arc<Mutex<Option<Seen>>>,
}

async fn completions(
    State(fake): State<FakeChat>,
    uri: Uri,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> impl IntoResponse {
    *fake.seen.lock().unwrap() = Some(Seen {
        path: uri.path().to_string(),
        authorization: headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string(),
        body,
    });
    (fake.status, Json(fake.reply.clone()))
}

async fn fake_chat(status: StatusCode, reply: Value) -> (String, FakeChat) {
    let fake = FakeChat {
        status,
        reply,
        seen: Arc::new(Mutex::new(None)),
    };
    let router = Router::new().fallback(completions).with_state(fake.clone());
    (spawn_server(router).await, fake)
}

#[tokio::test]
async fn given_prompt_when_completing_then_sends_single_user_message() {
    let (url, fake) = fake_chat(
        StatusCode::OK,
        json!({"choices": [{"message": {"role": "assistant", "content": " Blue. "}}]}),
    )
    .await;
    let client = OpenAiClient::new(&url, "secret".to_string(), "test-model".to_string());

    let reply = client.complete("Question: sky?\nAnswer:").await.unwrap();

    assert_eq!(reply, " Blue. ");
    let seen = fake.seen.lock().unwrap().clone().unwrap();
    assert_eq!(seen.path, "/chat/completions");
    assert_eq!(seen.authorization, "Bearer secret");
    assert_eq!(seen.body["model"], "test-model");
    assert_eq!(
        seen.body["messages"],
        json!([{"role": "user", "content": "Question: sky?\nAnswer:"}])
    );
    assert!(seen.body.get("temperature").is_none());
}

#[tokio::test]
async fn given_settings_with_tuning_when_completing_then_sends_them() {
    let (url, fake) = fake_chat(
        StatusCode::OK,
        json!({"choices": [{"message": {"content": "ok"}}]}),
    )
    .await;
    let settings = LlmSettings {
        base_url: format!("{url}/"),
        api_key: "k".to_string(),
        chat_model: "m".to_string(),
        temperature: Some(0.5),
        max_tokens: Some(64),
        timeout_secs: Some(5),
    };
    let client = OpenAiClient::from_settings(&settings);

    client.complete("hi").await.unwrap();

    let seen = fake.seen.lock().unwrap().clone().unwrap();
    assert_eq!(seen.path, "/chat/completions");
    assert_eq!(seen.body["temperature"], 0.5);
    assert_eq!(seen.body["max_tokens"], 64);
}

#[tokio::test]
async fn given_too_many_requests_when_completing_then_returns_rate_limited() {
    let (url, _) = fake_chat(StatusCode::TOO_MANY_REQUESTS, json!({})).await;
    let client = OpenAiClient::new(&url, "k".to_string(), "m".to_string());

    let result = client.complete("hi").await;

    assert!(matches!(result, Err(LlmClientError::RateLimited)));
}

#[tokio::test]
async fn given_server_error_when_completing_then_returns_api_request_failed() {
    let (url, _) = fake_chat(StatusCode::INTERNAL_SERVER_ERROR, json!({"error": "down"})).await;
    let client = OpenAiClient::new(&url, "k".to_string(), "m".to_string());

    let result = client.complete("hi").await;

    assert!(matches!(result, Err(LlmClientError::ApiRequestFailed(_))));
}

#[tokio::test]
async fn given_empty_choices_when_completing_then_returns_invalid_response() {
    let (url, _) = fake_chat(StatusCode::OK, json!({"choices": []})).await;
    let client = OpenAiClient::new(&url, "k".to_string(), "m".to_string());

    let result = client.complete("hi").await;

    assert!(matches!(result, Err(LlmClientError::InvalidResponse(_))));
}

#[tokio::test]
async fn given_unreachable_endpoint_when_completing_then_returns_api_request_failed() {
    let client = OpenAiClient::new("http://127.0.0.1:1", "k".to_string(), "m".to_string());

    let result = client.complete("hi").await;

    assert!(matches!(result, Err(LlmClientError::ApiRequestFailed(_))));
}
