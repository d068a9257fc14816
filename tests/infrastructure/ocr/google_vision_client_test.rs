use std::sync::{Arc, Mutex};

use axum::extract::State;
use axum::http::{StatusCode, Uri};
use axum::response::IntoResponse;
use axum::{Json, Router};
use serde_json::{Value, json};

use docchat::application::ports::{OcrEngine, OcrError};
use docchat::infrastructure::ocr::{AnnotateResponse, GoogleVisionClient};

use crate::support::spawn_server;

#[derive(Clone)]
struct FakeVision {
    status: StatusCode,
    reply: Value,
    seen: Arc<Mutex<Vec<(String, Value)>>>,
}

async fn annotate(
    State(fake): State<FakeVision>,
    uri: Uri,
    Json(body): Json<Value>,
) -> impl IntoResponse {
    fake.seen.lock().unwrap().push((uri.to_string(), body));
    (fake.status, Json(fake.reply.clone()))
}

async fn fake_vision(status: StatusCode, reply: Value) -> (String, FakeVision) {
    let fake = FakeVision {
        status,
        reply,
        seen: Arc::new(Mutex::new(Vec::new())),
    };
    let router = Router::new().fallback(annotate).with_state(fake.clone());
    (spawn_server(router).await, fake)
}

#[tokio::test]
async fn given_annotations_when_detecting_then_returns_first_description() {
    let (url, fake) = fake_vision(
        StatusCode::OK,
        json!({"responses": [{"textAnnotations": [
            {"description": "HELLO\nWORLD"},
            {"description": "HELLO"}
        ]}]}),
    )
    .await;
    let client = GoogleVisionClient::new(&url, "vision-key", None);

    let text = client.detect_text(b"image-bytes").await.unwrap();

    assert_eq!(text, "HELLO\nWORLD");
    let seen = fake.seen.lock().unwrap();
    let (uri, body) = &seen[0];
    assert_eq!(uri, "/v1/images:annotate?key=vision-key");
    assert_eq!(body["requests"][0]["features"][0]["type"], "TEXT_DETECTION");
    assert_eq!(body["requests"][0]["image"]["content"], "aW1hZ2UtYnl0ZXM=");
}

#[tokio::test]
async fn given_no_annotations_when_detecting_then_returns_empty_string() {
    let (url, _) = fake_vision(StatusCode::OK, json!({"responses": [{}]})).await;
    let client = GoogleVisionClient::new(&url, "k", None);

    let text = client.detect_text(b"blank").await.unwrap();

    assert_eq!(text, "");
}

#[tokio::test]
async fn given_error_in_response_when_detecting_then_returns_service_error() {
    let (url, _) = fake_vision(
        StatusCode::OK,
        json!({"responses": [{"error": {"code": 3, "message": "Bad image data."}}]}),
    )
    .await;
    let client = GoogleVisionClient::new(&url, "k", None);

    let result = client.detect_text(b"junk").await;

    match result {
        Err(OcrError::ServiceError(message)) => assert!(message.contains("Bad image data.")),
        other => panic!("unexpected result: {other:?}"),
    }
}

#[tokio::test]
async fn given_http_error_when_detecting_then_returns_api_request_failed() {
    let (url, _) = fake_vision(
        StatusCode::FORBIDDEN,
        json!({"error": {"message": "API key not valid"}}),
    )
    .await;
    let client = GoogleVisionClient::new(&url, "wrong", None);

    let result = client.detect_text(b"img").await;

    assert!(matches!(result, Err(OcrError::ApiRequestFailed(_))));
}

#[test]
fn given_empty_error_message_when_parsing_then_treats_as_success() {
    let parsed: AnnotateResponse = serde_json::from_str(
        r#"{"responses":[{"error":{"code":0,"message":""},"textAnnotations":[{"description":"ok"}]}]}"#,
    )
    .unwrap();

    assert_eq!(parsed.into_full_text().unwrap(), "ok");
}

#[test]
fn given_no_responses_when_parsing_then_returns_empty_text() {
    let parsed: AnnotateResponse = serde_json::from_str("{}").unwrap();

    assert_eq!(parsed.into_full_text().unwrap(), "");
}
