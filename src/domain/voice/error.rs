use crate::domain::playback::PlaybackError;
use crate::domain::synthesis::ProviderError;
use crate::error::AppError;

#[derive(Debug, thiserror::Error)]
pub enum VoiceError {
    #[error("Unknown voice: {0}")]
    UnknownVoice(String),
    #[error("invalid voice sample: {0}")]
    InvalidSample(String),
    #[error("Failed to analyze voice sample: {0}")]
    Analysis(ProviderError),
    #[error("Preview failed: {0}")]
    Preview(ProviderError),
    #[error(transparent)]
    Playback(#[from] PlaybackError),
}

impl From<VoiceError> for AppError {
    fn from(err: VoiceError) -> Self {
        match err {
            VoiceError::UnknownVoice(_) => AppError::NotFound(err.to_string()),
            VoiceError::InvalidSample(msg) => AppError::BadRequest(msg),
            VoiceError::Analysis(_) | VoiceError::Preview(_) => {
                AppError::ExternalService(err.to_string())
            }
            VoiceError::Playback(e) => AppError::from(e),
        }
    }
}
