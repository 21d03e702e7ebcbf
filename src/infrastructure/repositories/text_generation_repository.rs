use crate::domain::synthesis::ProviderError;
use async_trait::async_trait;

/// Audio clip attached to a text-generation prompt
#[derive(Debug, Clone, PartialEq)]
pub struct InlineAudio {
    pub mime_type: String,
    pub data_base64: String,
}

/// General-purpose text model, used for voice analysis and proofreading
#[async_trait]
pub trait TextGenerationRepository: Send + Sync {
    /// Returns `None` when the model answered without any text
    async fn generate_text(
        &self,
        prompt: &str,
        audio: Option<&InlineAudio>,
    ) -> Result<Option<String>, ProviderError>;
}
