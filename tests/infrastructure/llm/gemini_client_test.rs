use std::sync::{Arc, Mutex};

use axum::Router;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use base64::Engine as _;
use base64::engine::general_purpose;
use futures::StreamExt;
use serde_json::{Value, json};
use tokio::net::TcpListener;

use mediaforge::application::ports::{ContentGenerator, GeneratorError};
use mediaforge::domain::ResponseChunk;
use mediaforge::infrastructure::llm::{
    GeminiClient, GenerateRequest, build_script_prompt, parse_generated_content,
};
use mediaforge::presentation::config::GeminiSettings;

use crate::helpers::mocks::sample_category;

const API_KEY: &str = "test-key";

#[derive(Clone, Default)]
struct MockGemini {
    requests: Arc<Mutex<Vec<(String, Value)>>>,
    status: Option<StatusCode>,
}

async fn handle(
    State(mock): State<MockGemini>,
    Path(action): Path<String>,
    headers: HeaderMap,
    body: String,
) -> Response {
    if headers.get("x-goog-api-key").and_then(|v| v.to_str().ok()) != Some(API_KEY) {
        return (StatusCode::UNAUTHORIZED, "missing key").into_response();
    }
    if let Some(status) = mock.status {
        return (status, "upstream says no").into_response();
    }

    let body: Value = serde_json::from_str(&body).unwrap();
    mock.requests.lock().unwrap().push((action.clone(), body));

    let pcm = general_purpose::STANDARD.encode([1u8, 2, 3, 4]);
    match action.as_str() {
        "gemini-2.5-flash:generateContent" => axum::Json(json!({
            "candidates": [{ "content": { "parts": [{
                "text": "```json\n{\"title\":\"T\",\"caption\":\"C\",\"scriptText\":\"S\",\"promptImage\":\"P\"}\n```"
            }]}}]
        }))
        .into_response(),
        "gemini-2.5-flash-preview-tts:generateContent" => axum::Json(json!({
            "candidates": [{ "content": { "parts": [{
                "inlineData": { "mimeType": "audio/L16;codec=pcm;rate=24000", "data": pcm }
            }]}}]
        }))
        .into_response(),
        "imagen-3.0-generate-002:predict" => axum::Json(json!({
            "predictions": [{ "bytesBase64Encoded": pcm, "mimeType": "image/png" }]
        }))
        .into_response(),
        "stream-model:streamGenerateContent" => {
            let first = json!({ "candidates": [{ "content": { "parts": [{ "text": "Here you go" }]}}]});
            let second = json!({ "candidates": [{ "content": { "parts": [{
                "inlineData": { "mimeType": "image/png", "data": pcm }
            }]}}]});
            (
                [("content-type", "text/event-stream")],
                format!("data: {}\r\n\r\ndata: {}\r\n\r\n", first, second),
            )
                .into_response()
        }
        _ => (StatusCode::NOT_FOUND, "unknown model").into_response(),
    }
}

async fn spawn_mock(mock: MockGemini) -> String {
    let app = Router::new()
        .route("/v1beta/models/{action}", post(handle))
        .with_state(mock);
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}/v1beta", addr)
}

fn settings(base_url: String, api_key: &str) -> GeminiSettings {
    GeminiSettings {
        api_key: api_key.to_string(),
        base_url,
        ..GeminiSettings::default()
    }
}

#[tokio::test]
async fn given_fenced_json_reply_when_generating_script_then_content_is_parsed() {
    let mock = MockGemini::default();
    let base_url = spawn_mock(mock.clone()).await;
    let client = GeminiClient::new(&settings(base_url, API_KEY), "English");

    let script = client
        .generate_script(&sample_category(1, "Finance"))
        .await
        .unwrap();

    assert_eq!(script.title, "T");
    assert_eq!(script.prompt_image, "P");

    let requests = mock.requests.lock().unwrap();
    let (_, body) = &requests[0];
    assert_eq!(body["generationConfig"]["responseMimeType"], "application/json");
    let prompt = body["contents"][0]["parts"][0]["text"].as_str().unwrap();
    assert!(prompt.contains("Finance"));
    assert!(prompt.contains("English"));
}

#[tokio::test]
async fn given_audio_reply_when_synthesizing_then_pcm_and_mime_are_returned() {
    let mock = MockGemini::default();
    let base_url = spawn_mock(mock.clone()).await;
    let client = GeminiClient::new(&settings(base_url, API_KEY), "English");

    let audio = client.synthesize_speech("Halo").await.unwrap().unwrap();

    assert_eq!(audio.data.as_ref(), &[1, 2, 3, 4]);
    assert_eq!(audio.mime_type, "audio/L16;codec=pcm;rate=24000");

    let requests = mock.requests.lock().unwrap();
    let config = &requests[0].1["generationConfig"];
    assert_eq!(config["responseModalities"], json!(["AUDIO"]));
    assert_eq!(
        config["speechConfig"]["voiceConfig"]["prebuiltVoiceConfig"]["voiceName"],
        "Zephyr"
    );
}

#[tokio::test]
async fn given_prediction_when_generating_image_then_bytes_are_decoded() {
    let mock = MockGemini::default();
    let base_url = spawn_mock(mock.clone()).await;
    let client = GeminiClient::new(&settings(base_url, API_KEY), "English");

    let image = client.generate_image("A lighthouse").await.unwrap().unwrap();

    assert_eq!(image.mime_type, "image/png");
    assert_eq!(image.data.len(), 4);

    let requests = mock.requests.lock().unwrap();
    let body = &requests[0].1;
    assert_eq!(body["instances"][0]["prompt"], "A lighthouse");
    assert_eq!(body["parameters"]["sampleCount"], 1);
    assert_eq!(body["parameters"]["aspectRatio"], "9:16");
}

#[tokio::test]
async fn given_sse_reply_when_streaming_then_chunks_arrive_in_order() {
    let base_url = spawn_mock(MockGemini::default()).await;
    let client = GeminiClient::new(&settings(base_url, API_KEY), "English");
    let request = GenerateRequest::user_text("draw").with_modalities(&["IMAGE", "TEXT"]);

    let chunks: Vec<ResponseChunk> = client
        .stream_generate("stream-model", &request)
        .await
        .unwrap()
        .map(|c| c.unwrap())
        .collect()
        .await;

    assert_eq!(chunks.len(), 2);
    assert_eq!(chunks[0], ResponseChunk::Text("Here you go".to_string()));
    assert!(matches!(&chunks[1], ResponseChunk::Binary { mime_type, .. } if mime_type == "image/png"));
}

#[tokio::test]
async fn given_429_when_calling_then_rate_limited_is_returned() {
    let base_url = spawn_mock(MockGemini {
        status: Some(StatusCode::TOO_MANY_REQUESTS),
        ..MockGemini::default()
    })
    .await;
    let client = GeminiClient::new(&settings(base_url, API_KEY), "English");

    let result = client.synthesize_speech("Halo").await;

    assert!(matches!(result, Err(GeneratorError::RateLimited)));
}

#[tokio::test]
async fn given_server_error_when_calling_then_status_and_body_are_reported() {
    let base_url = spawn_mock(MockGemini {
        status: Some(StatusCode::INTERNAL_SERVER_ERROR),
        ..MockGemini::default()
    })
    .await;
    let client = GeminiClient::new(&settings(base_url, API_KEY), "English");

    let result = client.generate_image("x").await;

    match result {
        Err(GeneratorError::ApiRequestFailed(message)) => {
            assert!(message.contains("500"));
            assert!(message.contains("upstream says no"));
        }
        other => panic!("unexpected result: {:?}", other),
    }
}

#[tokio::test]
async fn given_empty_api_key_when_calling_then_missing_key_is_returned() {
    let client = GeminiClient::new(&settings("http://127.0.0.1:9".to_string(), ""), "English");

    let result = client.synthesize_speech("Halo").await;

    assert!(matches!(result, Err(GeneratorError::MissingApiKey)));
}

#[test]
fn given_bare_json_when_parsing_content_then_it_is_accepted() {
    let content = parse_generated_content(
        r#"{"title":"A","caption":"B","scriptText":"C","promptImage":"D"}"#,
    )
    .unwrap();

    assert_eq!(content.caption, "B");
}

#[test]
fn given_prose_reply_when_parsing_content_then_invalid_response_is_returned() {
    let result = parse_generated_content("Sorry, I cannot help with that.");

    assert!(matches!(result, Err(GeneratorError::InvalidResponse(_))));
}

#[test]
fn given_category_without_optional_fields_when_building_prompt_then_no_placeholders_remain() {
    let mut category = sample_category(1, "Cooking");
    category.description = None;
    category.content_goal = None;

    let prompt = build_script_prompt(&category, "Indonesian");

    assert!(prompt.contains("Cooking"));
    assert!(prompt.contains("Indonesian"));
    assert!(!prompt.contains("{name}"));
    assert!(!prompt.contains("{goal}"));
}
