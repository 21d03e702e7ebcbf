use super::speech_synthesis_repository::SpeechSynthesisRepository;
use crate::domain::audio::{AudioBuffer, PROVIDER_SAMPLE_RATE};
use crate::domain::script::markers::{EMOTIONS, PHYSICAL_EFFECTS, PROCESSING_EFFECTS, TONES};
use crate::domain::synthesis::{ProviderError, SynthesisRequest};
use crate::infrastructure::gemini::{Content, GeminiClient, GenerateContentRequest, GenerationConfig, Part};
use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use std::fmt::Write as _;
use std::sync::Arc;

const DEFAULT_STYLE: &str = "Natural";

/// Gemini speech model behind [`SpeechSynthesisRepository`]
pub struct GeminiTtsRepository {
    client: Arc<GeminiClient>,
    model: String,
}

impl GeminiTtsRepository {
    pub fn new(client: Arc<GeminiClient>, model: String) -> Self {
        Self { client, model }
    }
}

#[async_trait]
impl SpeechSynthesisRepository for GeminiTtsRepository {
    async fn synthesize(&self, request: &SynthesisRequest) -> Result<AudioBuffer, ProviderError> {
        let start_time = std::time::Instant::now();

        let body = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part::text(build_prompt(request))],
            }],
            generation_config: Some(GenerationConfig::audio(request.voice.as_str())),
        };

        tracing::debug!(
            model = %self.model,
            voice = %request.voice,
            language = %request.language,
            text_length = request.text.chars().count(),
            "Calling Gemini speech model"
        );

        let response = self.client.generate_content(&self.model, &body).await?;
        let audio = decode_audio(response.inline_audio())?;

        tracing::info!(
            provider = "gemini",
            model = %self.model,
            voice = %request.voice,
            latency_ms = start_time.elapsed().as_millis() as u64,
            frames = audio.len(),
            "Speech synthesized"
        );

        Ok(audio)
    }
}

/// Base64 16-bit little-endian mono PCM at the provider rate into a buffer
pub fn decode_audio(payload: Option<&str>) -> Result<AudioBuffer, ProviderError> {
    let payload = payload.ok_or(ProviderError::NoAudioData)?;
    let bytes = STANDARD
        .decode(payload)
        .map_err(|e| ProviderError::Decode(e.to_string()))?;
    if bytes.len() < 2 {
        return Err(ProviderError::NoAudioData);
    }
    Ok(AudioBuffer::from_pcm16_le(PROVIDER_SAMPLE_RATE, &bytes))
}

pub fn pitch_description(pitch: f32) -> &'static str {
    if pitch <= 0.7 {
        "very low pitch"
    } else if pitch <= 0.9 {
        "low pitch"
    } else if pitch >= 1.3 {
        "very high pitch"
    } else if pitch >= 1.1 {
        "high pitch"
    } else {
        "normal pitch"
    }
}

pub fn pace_description(speed: f32) -> &'static str {
    if speed <= 0.7 {
        "very slow pace"
    } else if speed <= 0.9 {
        "slow pace"
    } else if speed >= 1.5 {
        "very fast pace"
    } else if speed >= 1.1 {
        "fast pace"
    } else {
        "natural pace"
    }
}

fn marker_list(tags: &[&str]) -> String {
    tags.iter()
        .map(|t| format!("({})", t))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Full instruction text sent for one segment
pub fn build_prompt(request: &SynthesisRequest) -> String {
    let style = request
        .style_prompt
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or(DEFAULT_STYLE);

    let mut prompt = String::new();
    let _ = writeln!(
        prompt,
        "Voice Actor Persona: Professional & Ultra-Expressive Audio Engineer."
    );
    let _ = writeln!(
        prompt,
        "Tone: {}, Pace: {}, Style: {}.",
        pitch_description(request.pitch),
        pace_description(request.speed),
        style
    );
    if let Some(profile) = &request.reference_profile {
        let _ = writeln!(prompt, "ADOPT VOICE CHARACTERISTICS: {}", profile);
    }
    if let Some(language) = request.language.display_name() {
        let _ = writeln!(prompt, "Speak the script in {}.", language);
    }

    prompt.push_str("\nScript Interpretation Rules for markers in (parentheses):\n");
    prompt.push_str("DO NOT speak the literal text inside the parentheses. Use them as instructions:\n\n");
    let _ = writeln!(prompt, "1. EMOTION: {}.", marker_list(EMOTIONS));
    let _ = writeln!(prompt, "2. TONE CONTROL: {}.", marker_list(TONES));
    let _ = writeln!(prompt, "3. PHYSICAL EFFECTS: {}.", marker_list(PHYSICAL_EFFECTS));
    let _ = writeln!(prompt, "4. AUDIO PROCESSING EFFECTS: {}.", marker_list(PROCESSING_EFFECTS));
    prompt.push_str(
        "   - These markers can include intensity: (reverb: low), (reverb: high), (echo: subtle), (distortion: heavy).\n",
    );
    prompt.push_str(
        "   - Apply these audio characteristics to the speech following the marker. Reverb should sound like a room ambience, Echo should sound like delay/reflections, Distortion should sound like radio static or overdrive.\n\n",
    );
    prompt.push_str(
        "IMPORTANT: When you see (laughing), you should produce the sound of a person laughing. When you see (reverb), adjust the acoustic environment of the generated audio.\n\n",
    );
    prompt.push_str("SCRIPT:\n");
    prompt.push_str(&request.text);
    prompt
}
