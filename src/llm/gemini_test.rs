use super::*;
use crate::llm::types::{Content, GenerationConfig};

use axum::Router;
use axum::http::{HeaderMap, StatusCode, Uri};
use std::sync::{Arc, Mutex};

// =============================================================================
// parse_response
// =============================================================================

#[test]
fn parse_text_response() {
    let json = serde_json::json!({
        "candidates": [{
            "content": { "role": "model", "parts": [{ "text": "Hello world" }] },
            "finishReason": "STOP"
        }],
        "usageMetadata": { "promptTokenCount": 12, "candidatesTokenCount": 3 }
    })
    .to_string();
    let resp = parse_response(&json).unwrap();
    assert_eq!(resp.first_text(), Some("Hello world"));
    assert_eq!(resp.candidates[0].finish_reason.as_deref(), Some("STOP"));
}

#[test]
fn parse_invalid_json() {
    let err = parse_response("not json").unwrap_err();
    assert!(matches!(err, LlmError::ApiParse(_)));
}

#[test]
fn new_builds_client_for_configured_model() {
    let cfg = LlmConfig { model: "gemini-test".into(), ..LlmConfig::default() };
    let client = GeminiClient::new(&cfg).unwrap();
    assert!(client.url.ends_with("/models/gemini-test:generateContent"));
}

// =============================================================================
// generate against a local stand-in server
// =============================================================================

#[derive(Default)]
struct Seen {
    path: Option<String>,
    api_key: Option<String>,
    body: Option<serde_json::Value>,
}

async fn spawn_upstream(status: StatusCode, reply: &'static str) -> (String, Arc<Mutex<Seen>>) {
    let seen = Arc::new(Mutex::new(Seen::default()));
    let recorder = seen.clone();
    let app = Router::new().fallback(move |uri: Uri, headers: HeaderMap, body: String| {
        let recorder = recorder.clone();
        async move {
            let mut seen = recorder.lock().unwrap();
            seen.path = Some(uri.path().to_string());
            seen.api_key = headers
                .get("x-goog-api-key")
                .and_then(|v| v.to_str().ok())
                .map(str::to_string);
            seen.body = serde_json::from_str(&body).ok();
            (status, reply)
        }
    });
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (format!("http://{addr}/v1beta"), seen)
}

fn sample_request() -> GenerateContentRequest {
    GenerateContentRequest {
        contents: vec![Content::user("hello")],
        system_instruction: Content::system("persona"),
        generation_config: GenerationConfig { temperature: 0.7, top_k: 40, top_p: 0.95, max_output_tokens: 500 },
        safety_settings: Vec::new(),
    }
}

#[tokio::test]
async fn generate_posts_to_model_endpoint_with_key_header() {
    let (base_url, seen) = spawn_upstream(
        StatusCode::OK,
        r#"{"candidates":[{"content":{"role":"model","parts":[{"text":"hey"}]}}]}"#,
    )
    .await;
    let cfg = LlmConfig { base_url, model: "gemini-test".into(), ..LlmConfig::default() };
    let client = GeminiClient::new(&cfg).unwrap();

    let resp = client.generate("k-123", &sample_request()).await.unwrap();
    assert_eq!(resp.first_text(), Some("hey"));

    let seen = seen.lock().unwrap();
    assert_eq!(seen.path.as_deref(), Some("/v1beta/models/gemini-test:generateContent"));
    assert_eq!(seen.api_key.as_deref(), Some("k-123"));
    let body = seen.body.as_ref().unwrap();
    assert_eq!(body["contents"][0]["parts"][0]["text"], "hello");
    assert_eq!(body["systemInstruction"]["parts"][0]["text"], "persona");
}

#[tokio::test]
async fn generate_maps_error_status_with_body() {
    let (base_url, _seen) = spawn_upstream(StatusCode::FORBIDDEN, r#"{"error":{"message":"bad key"}}"#).await;
    let cfg = LlmConfig { base_url, ..LlmConfig::default() };
    let client = GeminiClient::new(&cfg).unwrap();

    let err = client.generate("nope", &sample_request()).await.unwrap_err();
    match err {
        LlmError::ApiResponse { status, body } => {
            assert_eq!(status, 403);
            assert!(body.contains("bad key"));
        }
        other => panic!("expected ApiResponse, got {other:?}"),
    }
}

#[tokio::test]
async fn generate_maps_unparseable_body() {
    let (base_url, _seen) = spawn_upstream(StatusCode::OK, "<html>").await;
    let cfg = LlmConfig { base_url, ..LlmConfig::default() };
    let client = GeminiClient::new(&cfg).unwrap();

    let err = client.generate("k", &sample_request()).await.unwrap_err();
    assert!(matches!(err, LlmError::ApiParse(_)));
}

#[tokio::test]
async fn generate_maps_connection_failure() {
    // Bind then drop to get a port with nothing listening.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let cfg = LlmConfig { base_url: format!("http://{addr}"), ..LlmConfig::default() };
    let client = GeminiClient::new(&cfg).unwrap();

    let err = client.generate("k", &sample_request()).await.unwrap_err();
    assert!(matches!(err, LlmError::ApiRequest(_)));
}
