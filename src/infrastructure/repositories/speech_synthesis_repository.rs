use crate::domain::audio::AudioBuffer;
use crate::domain::synthesis::{ProviderError, SynthesisRequest};
use async_trait::async_trait;

/// One speech-provider call: a single segment in, one decoded buffer out.
///
/// Implementations never split text; the orchestrator sends each segment on
/// its own and merges the results.
#[async_trait]
pub trait SpeechSynthesisRepository: Send + Sync {
    async fn synthesize(&self, request: &SynthesisRequest) -> Result<AudioBuffer, ProviderError>;
}
