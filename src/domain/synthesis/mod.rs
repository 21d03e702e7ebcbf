pub mod error;
pub mod orchestrator;
pub mod service;

use crate::domain::script::LanguageHint;
use crate::domain::voice::PrebuiltVoice;
use serde::{Deserialize, Serialize};

pub use error::{ProviderError, SynthesisError};
pub use orchestrator::{Orchestrator, ProgressEvent};
pub use service::{JobSnapshot, JobState, PreparedScript, SynthesisService, SynthesisSettings};

pub const DEFAULT_PITCH: f32 = 1.0;
pub const DEFAULT_SPEED: f32 = 1.0;

/// Everything the provider needs for one call
#[derive(Debug, Clone, PartialEq)]
pub struct SynthesisRequest {
    pub text: String,
    pub voice: PrebuiltVoice,
    /// Free-text description of a cloned voice
    pub reference_profile: Option<String>,
    pub style_prompt: Option<String>,
    pub language: LanguageHint,
    pub pitch: f32,
    pub speed: f32,
}

impl SynthesisRequest {
    /// Copy of this request carrying `text` instead
    pub fn for_segment(&self, text: &str) -> Self {
        Self {
            text: text.to_string(),
            ..self.clone()
        }
    }
}

/// Body of POST /api/synthesis
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScriptRequest {
    pub text: String,
    pub voice: String,
    #[serde(default)]
    pub language: LanguageHint,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style_prompt: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pitch: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub speed: Option<f32>,
}
