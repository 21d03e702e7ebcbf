use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use test_context::AsyncTestContext;
use tokio::net::TcpListener;
use voicescript_backend::app::build_controllers;
use voicescript_backend::domain::playback::ClockSink;
use voicescript_backend::infrastructure::config::{Config, Environment, LogFormat};
use voicescript_backend::infrastructure::http::create_router;

pub mod api_client;
pub mod gemini_mock;

use api_client::TestClient;
use gemini_mock::{GeminiMock, MOCK_API_KEY};

/// Segment size used by the test server
pub const TEST_SEGMENT_SIZE: usize = 40;

/// Script length ceiling used by the test server
pub const TEST_MAX_CHARS: usize = 400;

pub struct TestContext {
    pub client: TestClient,
    pub gemini: GeminiMock,
}

pub fn test_config(gemini_base_url: &str) -> Config {
    Config {
        host: "127.0.0.1".to_string(),
        port: 0,
        environment: Environment::Development,
        log_format: LogFormat::Pretty,
        gemini_api_key: MOCK_API_KEY.to_string(),
        gemini_base_url: gemini_base_url.to_string(),
        gemini_tts_model: "gemini-2.5-flash-preview-tts".to_string(),
        gemini_text_model: "gemini-3-flash-preview".to_string(),
        max_script_chars: TEST_MAX_CHARS,
        segment_size: TEST_SEGMENT_SIZE,
        export_file_prefix: "VOICESCRIPT".to_string(),
        autoplay: false,
        preview_cache_enabled: false,
    }
}

impl TestContext {
    pub async fn with_config(gemini: GeminiMock, config: Config) -> Self {
        let app = create_router(build_controllers(&config, Arc::new(ClockSink::new())));

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind listener");
        let addr = listener.local_addr().expect("Failed to get local addr");
        let base_url = format!("http://{}", addr);

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            client: TestClient::new(&base_url),
            gemini,
        }
    }

    /// Start a synthesis and return the 202 body
    pub async fn start_synthesis(&self, text: &str) -> Value {
        let response = self
            .client
            .post("/api/synthesis", &json!({ "text": text, "voice": "Kore", "language": "english" }))
            .await
            .unwrap();
        response.assert_status(hyper::StatusCode::ACCEPTED);
        response.body.clone().unwrap()
    }

    /// Poll the job until it leaves the running state
    pub async fn wait_for_job(&self) -> Value {
        for _ in 0..400 {
            let response = self.client.get("/api/synthesis").await.unwrap();
            let body = response.body.clone().unwrap();
            if body["state"] != "running" {
                return body;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        panic!("synthesis job never finished");
    }

    /// Run a script to completion and return its history id
    pub async fn synthesize(&self, text: &str) -> String {
        self.start_synthesis(text).await;
        let job = self.wait_for_job().await;
        assert_eq!(job["state"], "completed", "job did not complete: {}", job);
        job["history_id"].as_str().unwrap().to_string()
    }
}

impl AsyncTestContext for TestContext {
    fn setup() -> impl std::future::Future<Output = Self> + Send {
        async {
            let gemini = GeminiMock::start().await;
            let config = test_config(&gemini.base_url);
            Self::with_config(gemini, config).await
        }
    }

    fn teardown(self) -> impl std::future::Future<Output = ()> + Send {
        async {}
    }
}
