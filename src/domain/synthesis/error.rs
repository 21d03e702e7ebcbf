use crate::domain::audio::AssemblyError;
use crate::domain::voice::VoiceError;
use crate::error::AppError;

/// Failure of a single provider call
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ProviderError {
    #[error("speech provider error: {0}")]
    Transport(String),
    #[error("No audio data received.")]
    NoAudioData,
    #[error("could not decode provider audio: {0}")]
    Decode(String),
}

#[derive(Debug, thiserror::Error)]
pub enum SynthesisError {
    #[error("invalid input: {0}")]
    Invalid(String),
    #[error("text too large: {0}")]
    TooLong(String),
    #[error("a synthesis job is already running")]
    Busy,
    #[error("synthesis cancelled by user")]
    Cancelled,
    #[error(transparent)]
    Provider(#[from] ProviderError),
    #[error("audio assembly failed: {0}")]
    Assembly(#[from] AssemblyError),
    #[error(transparent)]
    Voice(#[from] VoiceError),
}

impl From<SynthesisError> for AppError {
    fn from(err: SynthesisError) -> Self {
        match err {
            SynthesisError::Invalid(msg) => AppError::BadRequest(msg),
            SynthesisError::TooLong(msg) => AppError::PayloadTooLarge(msg),
            SynthesisError::Busy => AppError::Conflict(err.to_string()),
            SynthesisError::Cancelled => AppError::Conflict(err.to_string()),
            SynthesisError::Provider(e) => AppError::ExternalService(e.to_string()),
            SynthesisError::Assembly(e) => AppError::Internal(e.to_string()),
            SynthesisError::Voice(e) => AppError::from(e),
        }
    }
}
