use super::error::SynthesisError;
use super::orchestrator::{Orchestrator, ProgressEvent};
use super::{ScriptRequest, SynthesisRequest, DEFAULT_PITCH, DEFAULT_SPEED};
use crate::domain::audio::{to_export_artifact, wav::export_file_name};
use crate::domain::history::{HistoryEntry, HistoryStore};
use crate::domain::playback::{PlaybackController, PlaybackSource};
use crate::domain::script::{resolve_language, split, Segment};
use crate::domain::voice::VoiceRegistry;
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde::Serialize;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

pub const MIN_FACTOR: f32 = 0.5;
pub const MAX_FACTOR: f32 = 2.0;

const CANCELLED_MESSAGE: &str = "Synthesis cancelled.";

#[derive(Debug, Clone)]
pub struct SynthesisSettings {
    pub max_script_chars: usize,
    pub segment_size: usize,
    pub export_file_prefix: String,
    pub autoplay: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum JobState {
    Idle,
    Running,
    Completed,
    Cancelled,
    Failed,
}

/// What GET /api/synthesis reports
#[derive(Debug, Clone, Serialize)]
pub struct JobSnapshot {
    pub state: JobState,
    pub progress: u8,
    pub message: String,
    pub segment_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub history_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub started_at: Option<DateTime<Utc>>,
}

impl JobSnapshot {
    fn idle() -> Self {
        Self {
            state: JobState::Idle,
            progress: 0,
            message: String::new(),
            segment_count: 0,
            history_id: None,
            error: None,
            started_at: None,
        }
    }
}

struct JobSlot {
    snapshot: JobSnapshot,
    cancel: Option<CancellationToken>,
}

/// A validated script ready for the orchestrator
#[derive(Debug, Clone)]
pub struct PreparedScript {
    pub text: String,
    pub voice_label: String,
    pub template: SynthesisRequest,
    pub segments: Vec<Segment>,
}

/// Runs at most one script synthesis at a time and files the result
pub struct SynthesisService {
    orchestrator: Orchestrator,
    voices: Arc<VoiceRegistry>,
    history: Arc<HistoryStore>,
    player: Arc<PlaybackController>,
    settings: SynthesisSettings,
    job: Mutex<JobSlot>,
}

impl SynthesisService {
    pub fn new(
        orchestrator: Orchestrator,
        voices: Arc<VoiceRegistry>,
        history: Arc<HistoryStore>,
        player: Arc<PlaybackController>,
        settings: SynthesisSettings,
    ) -> Self {
        Self {
            orchestrator,
            voices,
            history,
            player,
            settings,
            job: Mutex::new(JobSlot {
                snapshot: JobSnapshot::idle(),
                cancel: None,
            }),
        }
    }

    /// Validate and split a script; no provider call happens here
    pub fn prepare(&self, request: ScriptRequest) -> Result<PreparedScript, SynthesisError> {
        if request.text.trim().is_empty() {
            return Err(SynthesisError::Invalid("Text cannot be empty".to_string()));
        }

        let char_count = request.text.chars().count();
        if char_count > self.settings.max_script_chars {
            return Err(SynthesisError::TooLong(format!(
                "Text exceeds maximum length of {} characters ({} given)",
                self.settings.max_script_chars, char_count
            )));
        }

        let voice = self.voices.resolve(&request.voice)?;
        let pitch = factor("pitch", request.pitch.unwrap_or(DEFAULT_PITCH))?;
        let speed = factor("speed", request.speed.unwrap_or(DEFAULT_SPEED))?;
        let language = resolve_language(request.language, &request.text);
        let segments = split(&request.text, self.settings.segment_size);

        tracing::info!(
            voice = %voice.label,
            language = %language,
            text_length = char_count,
            segment_count = segments.len(),
            "Script prepared"
        );

        Ok(PreparedScript {
            template: SynthesisRequest {
                text: String::new(),
                voice: voice.provider_voice,
                reference_profile: voice.reference_profile,
                style_prompt: request.style_prompt,
                language,
                pitch,
                speed,
            },
            voice_label: voice.label,
            segments,
            text: request.text,
        })
    }

    /// Start a background job for `request`
    pub fn start(self: &Arc<Self>, request: ScriptRequest) -> Result<JobSnapshot, SynthesisError> {
        let prepared = self.prepare(request)?;
        let cancel = CancellationToken::new();

        let snapshot = {
            let mut job = self.job.lock();
            if job.snapshot.state == JobState::Running {
                return Err(SynthesisError::Busy);
            }
            job.snapshot = JobSnapshot {
                state: JobState::Running,
                progress: 0,
                message: format!("Processing segment 1/{}...", prepared.segments.len()),
                segment_count: prepared.segments.len(),
                history_id: None,
                error: None,
                started_at: Some(Utc::now()),
            };
            job.cancel = Some(cancel.clone());
            job.snapshot.clone()
        };

        let service = Arc::clone(self);
        let job = tokio::spawn(async move {
            service.execute(prepared, cancel).await;
        });

        let service = Arc::clone(self);
        tokio::spawn(async move {
            if let Err(e) = job.await {
                service.abandon_job(e.to_string());
            }
        });

        Ok(snapshot)
    }

    /// Release the slot of a job whose task died before recording an outcome
    fn abandon_job(&self, reason: String) {
        let mut job = self.job.lock();
        job.cancel = None;
        if job.snapshot.state != JobState::Running {
            return;
        }
        tracing::error!(error = %reason, "Synthesis task aborted");
        job.snapshot.state = JobState::Failed;
        job.snapshot.message = "Synthesis failed.".to_string();
        job.snapshot.error = Some(reason);
    }

    async fn execute(&self, prepared: PreparedScript, cancel: CancellationToken) {
        let result = self
            .synthesize_script(&prepared, |event| self.record_progress(event), &cancel)
            .await;

        let mut job = self.job.lock();
        job.cancel = None;
        match result {
            Ok(entry) => {
                job.snapshot.state = JobState::Completed;
                job.snapshot.progress = 100;
                job.snapshot.message = "Synthesis complete.".to_string();
                job.snapshot.history_id = Some(entry.id);
            }
            Err(SynthesisError::Cancelled) => {
                job.snapshot.state = JobState::Cancelled;
                job.snapshot.progress = 0;
                job.snapshot.message = CANCELLED_MESSAGE.to_string();
            }
            Err(e) => {
                tracing::error!(error = %e, "Script synthesis failed");
                job.snapshot.state = JobState::Failed;
                job.snapshot.message = "Synthesis failed.".to_string();
                job.snapshot.error = Some(e.to_string());
            }
        }
    }

    fn record_progress(&self, event: ProgressEvent) {
        let mut job = self.job.lock();
        match event {
            ProgressEvent::SegmentStarted { index, total } => {
                job.snapshot.message = format!("Processing segment {}/{}...", index + 1, total);
            }
            ProgressEvent::SegmentCompleted { percent, .. } => {
                job.snapshot.progress = percent;
            }
            ProgressEvent::Merging => {
                job.snapshot.message = "Merging audio...".to_string();
            }
        }
    }

    /// Synthesize a prepared script, export it and add it to history
    pub async fn synthesize_script<F>(
        &self,
        prepared: &PreparedScript,
        on_progress: F,
        cancel: &CancellationToken,
    ) -> Result<Arc<HistoryEntry>, SynthesisError>
    where
        F: FnMut(ProgressEvent) + Send,
    {
        let start_time = std::time::Instant::now();
        let audio = self
            .orchestrator
            .run(&prepared.segments, &prepared.template, on_progress, cancel)
            .await?;

        let artifact = to_export_artifact(&audio, audio.sample_rate());
        let created_at = Utc::now();
        let file_name = export_file_name(&self.settings.export_file_prefix, created_at);

        let entry = self.history.add(HistoryEntry::new(
            &prepared.text,
            prepared.voice_label.clone(),
            created_at,
            audio,
            artifact,
            file_name,
        ));

        tracing::info!(
            history_id = %entry.id,
            segment_count = prepared.segments.len(),
            duration_ms = entry.audio.duration().as_millis() as u64,
            latency_ms = start_time.elapsed().as_millis() as u64,
            "Script synthesized"
        );

        if self.settings.autoplay {
            let source = PlaybackSource::History { id: entry.id };
            if let Err(e) = self.player.play(entry.audio.clone(), source, None) {
                tracing::warn!(error = %e, history_id = %entry.id, "Autoplay failed");
            }
        }

        Ok(entry)
    }

    /// Ask the running job to stop at the next segment boundary
    pub fn cancel(&self) -> JobSnapshot {
        let job = self.job.lock();
        if let Some(flag) = &job.cancel {
            flag.cancel();
            tracing::info!("Synthesis cancellation requested");
        }
        job.snapshot.clone()
    }

    pub fn status(&self) -> JobSnapshot {
        self.job.lock().snapshot.clone()
    }
}

fn factor(name: &str, value: f32) -> Result<f32, SynthesisError> {
    if !value.is_finite() {
        return Err(SynthesisError::Invalid(format!("{} must be a finite number", name)));
    }
    Ok(value.clamp(MIN_FACTOR, MAX_FACTOR))
}
