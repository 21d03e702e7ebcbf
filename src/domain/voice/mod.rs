pub mod error;
pub mod registry;
pub mod service;

use serde::{Deserialize, Serialize};

pub use error::VoiceError;
pub use registry::{ResolvedVoice, VoiceRegistry};
pub use service::{PreviewOutcome, VoiceService};

/// Voices the speech provider ships with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PrebuiltVoice {
    Zephyr,
    Puck,
    Charon,
    Kore,
    Fenrir,
    Aoede,
}

impl PrebuiltVoice {
    pub const ALL: [PrebuiltVoice; 6] = [
        PrebuiltVoice::Zephyr,
        PrebuiltVoice::Puck,
        PrebuiltVoice::Kore,
        PrebuiltVoice::Aoede,
        PrebuiltVoice::Charon,
        PrebuiltVoice::Fenrir,
    ];

    /// Name the provider expects in `prebuiltVoiceConfig`
    pub fn as_str(&self) -> &'static str {
        match self {
            PrebuiltVoice::Zephyr => "Zephyr",
            PrebuiltVoice::Puck => "Puck",
            PrebuiltVoice::Charon => "Charon",
            PrebuiltVoice::Kore => "Kore",
            PrebuiltVoice::Fenrir => "Fenrir",
            PrebuiltVoice::Aoede => "Aoede",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            PrebuiltVoice::Zephyr => "Warm & Professional",
            PrebuiltVoice::Puck => "Energetic & Youthful",
            PrebuiltVoice::Charon => "Deep & Authoritative",
            PrebuiltVoice::Kore => "Calm & Steady",
            PrebuiltVoice::Fenrir => "Gravely & Intense",
            PrebuiltVoice::Aoede => "Graceful & Narrative",
        }
    }

    pub fn gender(&self) -> Gender {
        match self {
            PrebuiltVoice::Kore | PrebuiltVoice::Aoede => Gender::Female,
            _ => Gender::Male,
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|v| v.as_str() == id)
    }
}

impl std::fmt::Display for PrebuiltVoice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
    Custom,
}

/// Voice as listed to the editor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoiceOption {
    pub id: String,
    pub name: String,
    pub description: String,
    pub gender: Gender,
    #[serde(default)]
    pub is_cloned: bool,
}

impl From<PrebuiltVoice> for VoiceOption {
    fn from(voice: PrebuiltVoice) -> Self {
        Self {
            id: voice.as_str().to_string(),
            name: voice.as_str().to_string(),
            description: voice.description().to_string(),
            gender: voice.gender(),
            is_cloned: false,
        }
    }
}
