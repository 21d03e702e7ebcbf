use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use voicescript_backend::app::build_controllers;
use voicescript_backend::domain::playback::ClockSink;
use voicescript_backend::infrastructure::config::{Config, LogFormat};
use voicescript_backend::infrastructure::http::start_http_server;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;

    init_logging(&config);

    tracing::info!(
        "Starting VoiceScript Backend on {}:{}",
        config.host,
        config.port
    );
    tracing::info!(
        base_url = %config.gemini_base_url,
        tts_model = %config.gemini_tts_model,
        text_model = %config.gemini_text_model,
        segment_size = config.segment_size,
        max_script_chars = config.max_script_chars,
        autoplay = config.autoplay,
        development = config.is_development(),
        "Speech provider configured"
    );

    let controllers = build_controllers(&config, Arc::new(ClockSink::new()));

    start_http_server(Arc::new(config), controllers).await?;

    Ok(())
}

fn init_logging(config: &Config) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "voicescript_backend=debug,tower_http=debug".into());

    if config.log_format == LogFormat::Json {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().pretty())
            .init();
    }
}
