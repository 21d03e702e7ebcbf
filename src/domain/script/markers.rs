use regex::Regex;
use serde::Serialize;
use std::sync::OnceLock;

pub const EMOTIONS: &[&str] = &[
    "disdainful", "unhappy", "anxious", "hysterical", "indifferent",
    "impatient", "guilty", "scornful", "panicked", "furious",
    "reluctant", "keen", "disapproving", "negative", "denying",
    "astonished", "serious", "sarcastic", "conciliative", "comforting",
    "sincere", "sneering", "hesitating", "yielding", "painful",
    "awkward", "amused",
];

pub const TONES: &[&str] = &[
    "in a hurry tone", "shouting", "screaming", "whispering", "soft tone",
];

pub const PHYSICAL_EFFECTS: &[&str] = &[
    "laughing", "chuckling", "sobbing", "crying loudly", "sighing", "panting",
    "groaning", "crowd laughing", "background laughter", "audience laughing",
];

pub const PROCESSING_EFFECTS: &[&str] = &["reverb", "echo", "distortion"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkerCategory {
    Emotion,
    Tone,
    PhysicalEffect,
    ProcessingEffect,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Intensity {
    Low,
    Medium,
    High,
}

impl Intensity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Intensity::Low => "low",
            Intensity::Medium => "medium",
            Intensity::High => "high",
        }
    }
}

/// A parenthesised directive found in script text
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Marker {
    pub tag: String,
    pub intensity: Option<String>,
    pub category: MarkerCategory,
}

/// Marker vocabulary as exposed to editors
#[derive(Debug, Clone, Serialize)]
pub struct MarkerCatalog {
    pub emotions: &'static [&'static str],
    pub tones: &'static [&'static str],
    pub physical_effects: &'static [&'static str],
    pub processing_effects: &'static [&'static str],
    pub intensities: [Intensity; 3],
}

pub fn catalog() -> MarkerCatalog {
    MarkerCatalog {
        emotions: EMOTIONS,
        tones: TONES,
        physical_effects: PHYSICAL_EFFECTS,
        processing_effects: PROCESSING_EFFECTS,
        intensities: [Intensity::Low, Intensity::Medium, Intensity::High],
    }
}

pub fn categorize(tag: &str) -> MarkerCategory {
    let tag = tag.trim().to_lowercase();
    let tag = tag.as_str();
    if EMOTIONS.contains(&tag) {
        MarkerCategory::Emotion
    } else if TONES.contains(&tag) {
        MarkerCategory::Tone
    } else if PHYSICAL_EFFECTS.contains(&tag) {
        MarkerCategory::PhysicalEffect
    } else if PROCESSING_EFFECTS.contains(&tag) {
        MarkerCategory::ProcessingEffect
    } else {
        MarkerCategory::Unknown
    }
}

/// `(tag)` or `(tag: intensity)`
pub fn format_marker(tag: &str, intensity: Option<Intensity>) -> String {
    match intensity {
        Some(level) => format!("({}: {})", tag, level.as_str()),
        None => format!("({})", tag),
    }
}

fn marker_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"\(\s*([A-Za-z][A-Za-z ]*?)\s*(?::\s*([A-Za-z]+)\s*)?\)")
            .expect("marker pattern is valid")
    })
}

/// Find every directive in `text`, in order of appearance
pub fn extract_markers(text: &str) -> Vec<Marker> {
    marker_pattern()
        .captures_iter(text)
        .map(|caps| {
            let tag = caps[1].to_lowercase();
            Marker {
                category: categorize(&tag),
                intensity: caps.get(2).map(|m| m.as_str().to_lowercase()),
                tag,
            }
        })
        .collect()
}
