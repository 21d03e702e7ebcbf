use super::error::VoiceError;
use super::registry::VoiceRegistry;
use super::VoiceOption;
use crate::domain::audio::AudioBuffer;
use crate::domain::playback::{PlaybackController, PlaybackSource};
use crate::domain::script::LanguageHint;
use crate::domain::synthesis::{SynthesisRequest, DEFAULT_PITCH, DEFAULT_SPEED};
use crate::infrastructure::repositories::{
    InlineAudio, SpeechSynthesisRepository, TextGenerationRepository,
};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use chrono::Utc;
use moka::future::Cache;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

const ANALYSIS_PROMPT: &str = "Analyze this voice clip carefully. Describe its vocal characteristics in detail: gender, age, tone (breathy, raspy, nasal, etc.), emotional baseline, and unique cadence. Return only a concise descriptive paragraph that can be used as a style guide for a TTS engine.";

pub const FALLBACK_PROFILE: &str = "Standard expressive voice.";

const DEFAULT_SAMPLE_MIME: &str = "audio/wav";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PreviewOutcome {
    Started,
    Stopped,
}

pub fn preview_text(voice_name: &str) -> String {
    format!("Voice check for {}. (amused) Working perfectly!", voice_name)
}

pub struct VoiceService {
    registry: Arc<VoiceRegistry>,
    text_repo: Arc<dyn TextGenerationRepository>,
    speech_repo: Arc<dyn SpeechSynthesisRepository>,
    player: Arc<PlaybackController>,
    preview_cache: Option<Cache<String, Arc<AudioBuffer>>>,
}

impl VoiceService {
    pub fn new(
        registry: Arc<VoiceRegistry>,
        text_repo: Arc<dyn TextGenerationRepository>,
        speech_repo: Arc<dyn SpeechSynthesisRepository>,
        player: Arc<PlaybackController>,
        preview_cache_enabled: bool,
    ) -> Self {
        let preview_cache = if preview_cache_enabled {
            Some(
                Cache::builder()
                    .max_capacity(64)
                    .time_to_idle(Duration::from_secs(30 * 60))
                    .build(),
            )
        } else {
            None
        };

        Self {
            registry,
            text_repo,
            speech_repo,
            player,
            preview_cache,
        }
    }

    pub fn list(&self) -> Vec<VoiceOption> {
        self.registry.list()
    }

    /// Describe the voice in an audio sample as a style profile
    pub async fn analyze_voice(
        &self,
        audio_base64: &str,
        mime_type: Option<&str>,
    ) -> Result<String, VoiceError> {
        let data = audio_base64.trim();
        let decoded = STANDARD
            .decode(data)
            .map_err(|e| VoiceError::InvalidSample(format!("Audio is not valid base64: {}", e)))?;
        if decoded.is_empty() {
            return Err(VoiceError::InvalidSample("Audio sample is empty".to_string()));
        }

        let audio = InlineAudio {
            mime_type: mime_type.unwrap_or(DEFAULT_SAMPLE_MIME).to_string(),
            data_base64: data.to_string(),
        };

        tracing::info!(
            sample_bytes = decoded.len(),
            mime_type = %audio.mime_type,
            "Analyzing voice sample"
        );

        let profile = self
            .text_repo
            .generate_text(ANALYSIS_PROMPT, Some(&audio))
            .await
            .map_err(VoiceError::Analysis)?;

        Ok(profile
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty())
            .unwrap_or_else(|| FALLBACK_PROFILE.to_string()))
    }

    /// Analyze a sample and register the result as a new cloned voice
    pub async fn clone_voice(
        &self,
        audio_base64: &str,
        mime_type: Option<&str>,
    ) -> Result<VoiceOption, VoiceError> {
        let profile = self.analyze_voice(audio_base64, mime_type).await?;
        Ok(self.registry.register_clone(profile, Utc::now()))
    }

    /// Play a short sample of `voice_id`, or stop it if it is already previewing
    pub async fn preview(&self, voice_id: &str) -> Result<PreviewOutcome, VoiceError> {
        let source = PlaybackSource::Preview {
            voice_id: voice_id.to_string(),
        };
        if self.player.stop_source(&source) {
            tracing::info!(voice_id = voice_id, "Voice preview stopped");
            return Ok(PreviewOutcome::Stopped);
        }

        let voice = self.registry.resolve(voice_id)?;

        let cached = match &self.preview_cache {
            Some(cache) => cache.get(voice_id).await,
            None => None,
        };

        let audio = match cached {
            Some(audio) => {
                tracing::debug!(voice_id = voice_id, "Voice preview cache hit");
                audio
            }
            None => {
                let request = SynthesisRequest {
                    text: preview_text(&voice.label),
                    voice: voice.provider_voice,
                    reference_profile: voice.reference_profile,
                    style_prompt: None,
                    language: LanguageHint::Auto,
                    pitch: DEFAULT_PITCH,
                    speed: DEFAULT_SPEED,
                };
                let audio = Arc::new(
                    self.speech_repo
                        .synthesize(&request)
                        .await
                        .map_err(VoiceError::Preview)?,
                );
                if let Some(cache) = &self.preview_cache {
                    cache.insert(voice_id.to_string(), audio.clone()).await;
                }
                audio
            }
        };

        self.player.play(audio, source, None)?;
        tracing::info!(voice_id = voice_id, "Voice preview started");
        Ok(PreviewOutcome::Started)
    }
}
