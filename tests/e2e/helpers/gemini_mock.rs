use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::post,
    Json, Router,
};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use parking_lot::Mutex;
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;

pub const MOCK_API_KEY: &str = "test-gemini-key";

/// Samples returned per speech call: 100 ms at 24 kHz
pub const SAMPLES_PER_CALL: usize = 2_400;

/// PCM sample value the mock speaks with
pub const MOCK_SAMPLE: i16 = 8_192;

#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub path: String,
    pub body: Value,
}

#[derive(Debug, Clone, Default)]
struct Behaviour {
    speech_delay: Duration,
    /// 1-based speech call that answers without audio
    missing_audio_on: Option<usize>,
    /// 1-based speech call that answers 500
    fail_on: Option<usize>,
    text_reply: Option<String>,
    samples_per_call: Option<usize>,
}

#[derive(Default)]
struct MockState {
    calls: Mutex<Vec<RecordedCall>>,
    speech_calls: Mutex<usize>,
    behaviour: Mutex<Behaviour>,
}

/// In-process stand-in for the Gemini `generateContent` endpoint
#[derive(Clone)]
pub struct GeminiMock {
    pub base_url: String,
    state: Arc<MockState>,
}

impl GeminiMock {
    pub async fn start() -> Self {
        let state = Arc::new(MockState::default());
        let app = Router::new()
            .route("/v1beta/models/:call", post(generate_content))
            .with_state(state.clone());

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind mock listener");
        let addr = listener.local_addr().expect("Failed to get mock addr");

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://{}", addr),
            state,
        }
    }

    pub fn set_speech_delay(&self, delay: Duration) {
        self.state.behaviour.lock().speech_delay = delay;
    }

    pub fn set_missing_audio_on(&self, call: usize) {
        self.state.behaviour.lock().missing_audio_on = Some(call);
    }

    pub fn set_failure_on(&self, call: usize) {
        self.state.behaviour.lock().fail_on = Some(call);
    }

    /// Make every speech call return `duration` of audio
    pub fn set_audio_duration(&self, duration: Duration) {
        let samples = (duration.as_secs_f64() * 24_000.0) as usize;
        self.state.behaviour.lock().samples_per_call = Some(samples);
    }

    pub fn set_text_reply(&self, reply: &str) {
        self.state.behaviour.lock().text_reply = Some(reply.to_string());
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.state.calls.lock().clone()
    }

    pub fn speech_calls(&self) -> Vec<RecordedCall> {
        self.calls()
            .into_iter()
            .filter(|c| c.body.get("generationConfig").is_some())
            .collect()
    }

    /// Script text of every speech call, in order
    pub fn spoken_scripts(&self) -> Vec<String> {
        self.speech_calls()
            .iter()
            .filter_map(|c| c.body["contents"][0]["parts"][0]["text"].as_str())
            .map(|prompt| {
                prompt
                    .split_once("SCRIPT:\n")
                    .map(|(_, script)| script.to_string())
                    .unwrap_or_default()
            })
            .collect()
    }
}

fn pcm_payload(samples: usize) -> String {
    let bytes: Vec<u8> = std::iter::repeat(MOCK_SAMPLE)
        .take(samples)
        .flat_map(|s| s.to_le_bytes())
        .collect();
    STANDARD.encode(bytes)
}

async fn generate_content(
    State(state): State<Arc<MockState>>,
    Path(call): Path<String>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> impl IntoResponse {
    if headers.get("x-goog-api-key").and_then(|v| v.to_str().ok()) != Some(MOCK_API_KEY) {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "error": { "message": "API key not valid" } })),
        );
    }

    let is_speech = body.get("generationConfig").is_some();
    state.calls.lock().push(RecordedCall {
        path: call,
        body,
    });
    let behaviour = state.behaviour.lock().clone();

    if !is_speech {
        let reply = behaviour.text_reply.unwrap_or_default();
        return (
            StatusCode::OK,
            Json(json!({ "candidates": [{ "content": { "parts": [{ "text": reply }] } }] })),
        );
    }

    let number = {
        let mut count = state.speech_calls.lock();
        *count += 1;
        *count
    };

    if !behaviour.speech_delay.is_zero() {
        tokio::time::sleep(behaviour.speech_delay).await;
    }

    if behaviour.fail_on == Some(number) {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": { "message": "backend exploded" } })),
        );
    }

    if behaviour.missing_audio_on == Some(number) {
        return (
            StatusCode::OK,
            Json(json!({ "candidates": [{ "content": { "parts": [] } }] })),
        );
    }

    (
        StatusCode::OK,
        Json(json!({
            "candidates": [{
                "content": {
                    "parts": [{
                        "inlineData": { "mimeType": "audio/L16;codec=pcm;rate=24000", "data": pcm_payload(behaviour.samples_per_call.unwrap_or(SAMPLES_PER_CALL)) }
                    }]
                }
            }]
        })),
    )
}
