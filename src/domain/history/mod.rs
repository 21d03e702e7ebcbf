use crate::domain::audio::{AudioBuffer, ExportArtifact};
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::Serialize;
use std::sync::Arc;
use uuid::Uuid;

/// Characters of script text kept for display
pub const DISPLAY_TEXT_CHARS: usize = 120;

/// A finished synthesis
#[derive(Debug)]
pub struct HistoryEntry {
    pub id: Uuid,
    pub text: String,
    pub voice_label: String,
    pub created_at: DateTime<Utc>,
    pub audio: Arc<AudioBuffer>,
    pub artifact: ExportArtifact,
    pub file_name: String,
}

impl HistoryEntry {
    pub fn new(
        script: &str,
        voice_label: String,
        created_at: DateTime<Utc>,
        audio: AudioBuffer,
        artifact: ExportArtifact,
        file_name: String,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            text: display_text(script),
            voice_label,
            created_at,
            audio: Arc::new(audio),
            artifact,
            file_name,
        }
    }

    pub fn summary(&self) -> HistorySummary {
        HistorySummary {
            id: self.id,
            text: self.text.clone(),
            voice_label: self.voice_label.clone(),
            created_at: self.created_at,
            duration_ms: self.audio.duration().as_millis() as u64,
            size_bytes: self.artifact.len(),
            file_name: self.file_name.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct HistorySummary {
    pub id: Uuid,
    pub text: String,
    pub voice_label: String,
    pub created_at: DateTime<Utc>,
    pub duration_ms: u64,
    pub size_bytes: usize,
    pub file_name: String,
}

/// Truncate to [`DISPLAY_TEXT_CHARS`] characters, marking the cut with an ellipsis
pub fn display_text(script: &str) -> String {
    let trimmed = script.trim();
    if trimmed.chars().count() <= DISPLAY_TEXT_CHARS {
        return trimmed.to_string();
    }
    let mut text: String = trimmed.chars().take(DISPLAY_TEXT_CHARS).collect();
    text.push('…');
    text
}

/// In-memory, most-recent-first list of finished syntheses
#[derive(Debug, Default)]
pub struct HistoryStore {
    entries: RwLock<Vec<Arc<HistoryEntry>>>,
}

impl HistoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&self, entry: HistoryEntry) -> Arc<HistoryEntry> {
        let entry = Arc::new(entry);
        self.entries.write().insert(0, entry.clone());
        tracing::info!(history_id = %entry.id, file_name = %entry.file_name, "History entry added");
        entry
    }

    pub fn list(&self) -> Vec<Arc<HistoryEntry>> {
        self.entries.read().clone()
    }

    pub fn get(&self, id: Uuid) -> Option<Arc<HistoryEntry>> {
        self.entries.read().iter().find(|e| e.id == id).cloned()
    }

    pub fn remove(&self, id: Uuid) -> Option<Arc<HistoryEntry>> {
        let mut entries = self.entries.write();
        let position = entries.iter().position(|e| e.id == id)?;
        Some(entries.remove(position))
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}
