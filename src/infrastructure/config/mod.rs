use anyhow::{bail, Context};
use serde::Deserialize;
use std::env;

use crate::infrastructure::gemini::DEFAULT_BASE_URL;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub environment: Environment,
    pub log_format: LogFormat,
    // Gemini
    pub gemini_api_key: String,
    pub gemini_base_url: String,
    pub gemini_tts_model: String,
    pub gemini_text_model: String,
    // Synthesis
    pub max_script_chars: usize,
    pub segment_size: usize,
    pub export_file_prefix: String,
    pub autoplay: bool,
    // Voice preview cache
    pub preview_cache_enabled: bool,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Development,
    Production,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

fn var_or(name: &str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| default.to_string())
}

fn flag(name: &str, default: bool) -> bool {
    env::var(name)
        .map(|s| s.trim().eq_ignore_ascii_case("true"))
        .unwrap_or(default)
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let config = Config {
            host: var_or("HOST", "0.0.0.0"),
            port: var_or("PORT", "8080").parse().context("PORT must be a number")?,
            environment: match var_or("ENVIRONMENT", "development").as_str() {
                "production" => Environment::Production,
                _ => Environment::Development,
            },
            log_format: match var_or("LOG_FORMAT", "pretty").as_str() {
                "json" => LogFormat::Json,
                _ => LogFormat::Pretty,
            },
            gemini_api_key: env::var("GEMINI_API_KEY").context("GEMINI_API_KEY is not set")?,
            gemini_base_url: var_or("GEMINI_BASE_URL", DEFAULT_BASE_URL),
            gemini_tts_model: var_or("GEMINI_TTS_MODEL", "gemini-2.5-flash-preview-tts"),
            gemini_text_model: var_or("GEMINI_TEXT_MODEL", "gemini-3-flash-preview"),
            max_script_chars: var_or("MAX_SCRIPT_CHARS", "50000")
                .parse()
                .context("MAX_SCRIPT_CHARS must be a number")?,
            segment_size: var_or("SEGMENT_SIZE", "4500")
                .parse()
                .context("SEGMENT_SIZE must be a number")?,
            export_file_prefix: var_or("EXPORT_FILE_PREFIX", "VOICESCRIPT"),
            autoplay: flag("AUTOPLAY", true),
            preview_cache_enabled: flag("PREVIEW_CACHE_ENABLED", true),
        };

        if config.segment_size == 0 {
            bail!("SEGMENT_SIZE must be greater than zero");
        }

        Ok(config)
    }

    pub fn is_development(&self) -> bool {
        self.environment == Environment::Development
    }
}
