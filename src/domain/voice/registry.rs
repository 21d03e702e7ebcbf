use super::{Gender, PrebuiltVoice, VoiceError, VoiceOption};
use chrono::{DateTime, Utc};
use parking_lot::RwLock;

const CLONED_ID_PREFIX: &str = "custom-";

/// Cloned voices are synthesized with this provider voice plus their profile
pub const CLONE_BASE_VOICE: PrebuiltVoice = PrebuiltVoice::Zephyr;

/// Provider-facing settings for a voice id
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedVoice {
    pub provider_voice: PrebuiltVoice,
    pub label: String,
    pub reference_profile: Option<String>,
}

/// Prebuilt voices plus the voices cloned during this process lifetime
#[derive(Debug, Default)]
pub struct VoiceRegistry {
    cloned: RwLock<Vec<VoiceOption>>,
}

impl VoiceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn list(&self) -> Vec<VoiceOption> {
        PrebuiltVoice::ALL
            .into_iter()
            .map(VoiceOption::from)
            .chain(self.cloned.read().iter().cloned())
            .collect()
    }

    pub fn find(&self, id: &str) -> Option<VoiceOption> {
        if let Some(voice) = PrebuiltVoice::from_id(id) {
            return Some(voice.into());
        }
        self.cloned.read().iter().find(|v| v.id == id).cloned()
    }

    pub fn resolve(&self, id: &str) -> Result<ResolvedVoice, VoiceError> {
        if let Some(voice) = PrebuiltVoice::from_id(id) {
            return Ok(ResolvedVoice {
                provider_voice: voice,
                label: voice.as_str().to_string(),
                reference_profile: None,
            });
        }

        let cloned = self.cloned.read();
        let voice = cloned
            .iter()
            .find(|v| v.id == id)
            .ok_or_else(|| VoiceError::UnknownVoice(id.to_string()))?;

        Ok(ResolvedVoice {
            provider_voice: CLONE_BASE_VOICE,
            label: voice.name.clone(),
            reference_profile: Some(voice.description.clone()),
        })
    }

    /// Register a cloned voice described by `profile`
    pub fn register_clone(&self, profile: String, now: DateTime<Utc>) -> VoiceOption {
        let mut cloned = self.cloned.write();

        let mut millis = now.timestamp_millis();
        while cloned.iter().any(|v| v.id == format!("{}{}", CLONED_ID_PREFIX, millis)) {
            millis += 1;
        }

        let voice = VoiceOption {
            id: format!("{}{}", CLONED_ID_PREFIX, millis),
            name: format!("Cloned Voice {}", cloned.len() + 1),
            description: profile,
            gender: Gender::Custom,
            is_cloned: true,
        };
        cloned.push(voice.clone());

        tracing::info!(voice_id = %voice.id, voice_name = %voice.name, "Cloned voice registered");
        voice
    }
}
