use lingua::{Language, LanguageDetector, LanguageDetectorBuilder};
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// Language hint passed along with a synthesis request
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LanguageHint {
    #[default]
    Auto,
    Vietnamese,
    Japanese,
    English,
}

impl LanguageHint {
    pub fn as_str(&self) -> &'static str {
        match self {
            LanguageHint::Auto => "auto",
            LanguageHint::Vietnamese => "vietnamese",
            LanguageHint::Japanese => "japanese",
            LanguageHint::English => "english",
        }
    }

    /// Name used when instructing the provider
    pub fn display_name(&self) -> Option<&'static str> {
        match self {
            LanguageHint::Auto => None,
            LanguageHint::Vietnamese => Some("Vietnamese"),
            LanguageHint::Japanese => Some("Japanese"),
            LanguageHint::English => Some("English"),
        }
    }

    pub fn from_lingua(language: Language) -> Self {
        match language {
            Language::Vietnamese => LanguageHint::Vietnamese,
            Language::Japanese => LanguageHint::Japanese,
            Language::English => LanguageHint::English,
        }
    }
}

impl std::fmt::Display for LanguageHint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Detection only looks at the head of long scripts
const DETECTION_SAMPLE_CHARS: usize = 2_000;

fn detector() -> &'static LanguageDetector {
    static DETECTOR: OnceLock<LanguageDetector> = OnceLock::new();
    DETECTOR.get_or_init(|| {
        LanguageDetectorBuilder::from_languages(&[
            Language::English,
            Language::Vietnamese,
            Language::Japanese,
        ])
        .build()
    })
}

/// Replace `Auto` with the detected script language, when detection succeeds
pub fn resolve_language(hint: LanguageHint, text: &str) -> LanguageHint {
    if hint != LanguageHint::Auto {
        return hint;
    }

    let sample: String = text.chars().take(DETECTION_SAMPLE_CHARS).collect();
    match detector().detect_language_of(sample) {
        Some(language) => LanguageHint::from_lingua(language),
        None => {
            tracing::warn!("Could not detect script language, leaving hint on auto");
            LanguageHint::Auto
        }
    }
}
