use super::text_generation_repository::{InlineAudio, TextGenerationRepository};
use crate::domain::synthesis::ProviderError;
use crate::infrastructure::gemini::{Content, GeminiClient, GenerateContentRequest, Part};
use async_trait::async_trait;
use std::sync::Arc;

pub struct GeminiTextRepository {
    client: Arc<GeminiClient>,
    model: String,
}

impl GeminiTextRepository {
    pub fn new(client: Arc<GeminiClient>, model: String) -> Self {
        Self { client, model }
    }
}

#[async_trait]
impl TextGenerationRepository for GeminiTextRepository {
    async fn generate_text(
        &self,
        prompt: &str,
        audio: Option<&InlineAudio>,
    ) -> Result<Option<String>, ProviderError> {
        let mut parts = vec![Part::text(prompt)];
        if let Some(audio) = audio {
            parts.push(Part::inline(audio.mime_type.clone(), audio.data_base64.clone()));
        }

        let request = GenerateContentRequest {
            contents: vec![Content { parts }],
            generation_config: None,
        };

        let start_time = std::time::Instant::now();
        let response = self.client.generate_content(&self.model, &request).await?;
        let text = response.text();

        tracing::info!(
            provider = "gemini",
            model = %self.model,
            with_audio = audio.is_some(),
            latency_ms = start_time.elapsed().as_millis() as u64,
            has_text = text.is_some(),
            "Text generated"
        );

        Ok(text)
    }
}
