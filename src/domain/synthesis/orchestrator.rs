use super::error::SynthesisError;
use super::SynthesisRequest;
use crate::domain::audio::{concatenate, AudioBuffer};
use crate::domain::script::{extract_markers, Segment};
use crate::infrastructure::repositories::SpeechSynthesisRepository;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressEvent {
    SegmentStarted { index: usize, total: usize },
    SegmentCompleted { completed: usize, total: usize, percent: u8 },
    Merging,
}

/// `round(completed / total * 100)`
pub fn progress_percent(completed: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    ((completed as f64 / total as f64) * 100.0).round() as u8
}

/// Drives segments through the provider one at a time and merges the result
pub struct Orchestrator {
    provider: Arc<dyn SpeechSynthesisRepository>,
}

impl Orchestrator {
    pub fn new(provider: Arc<dyn SpeechSynthesisRepository>) -> Self {
        Self { provider }
    }

    /// Synthesize every segment in order.
    ///
    /// The first provider failure ends the run, and so does a cancellation seen
    /// at a segment boundary; audio gathered so far is dropped in both cases.
    pub async fn run<F>(
        &self,
        segments: &[Segment],
        template: &SynthesisRequest,
        mut on_progress: F,
        cancel: &CancellationToken,
    ) -> Result<AudioBuffer, SynthesisError>
    where
        F: FnMut(ProgressEvent) + Send,
    {
        if segments.is_empty() {
            return Err(SynthesisError::Invalid("Nothing to synthesize".to_string()));
        }

        let total = segments.len();
        let mut buffers = Vec::with_capacity(total);

        for (position, segment) in segments.iter().enumerate() {
            if cancel.is_cancelled() {
                tracing::info!(
                    segment_index = position,
                    segment_count = total,
                    discarded_segments = buffers.len(),
                    "Synthesis cancelled before segment"
                );
                return Err(SynthesisError::Cancelled);
            }

            on_progress(ProgressEvent::SegmentStarted {
                index: position,
                total,
            });

            let started = std::time::Instant::now();
            tracing::info!(
                segment_index = position,
                segment_count = total,
                segment_chars = segment.char_count(),
                directive_count = extract_markers(&segment.content).len(),
                "Synthesizing segment"
            );

            let request = template.for_segment(&segment.content);
            let audio = self.provider.synthesize(&request).await.map_err(|e| {
                tracing::error!(
                    error = %e,
                    segment_index = position,
                    segment_count = total,
                    "Segment synthesis failed, aborting run"
                );
                e
            })?;

            tracing::info!(
                segment_index = position,
                frames = audio.len(),
                latency_ms = started.elapsed().as_millis() as u64,
                "Segment synthesized"
            );
            buffers.push(audio);

            let completed = position + 1;
            on_progress(ProgressEvent::SegmentCompleted {
                completed,
                total,
                percent: progress_percent(completed, total),
            });
        }

        if cancel.is_cancelled() {
            tracing::info!(discarded_segments = buffers.len(), "Synthesis cancelled before merge");
            return Err(SynthesisError::Cancelled);
        }

        if buffers.len() == 1 {
            return buffers
                .pop()
                .ok_or_else(|| SynthesisError::Invalid("Nothing to synthesize".to_string()));
        }

        on_progress(ProgressEvent::Merging);
        Ok(concatenate(buffers)?)
    }
}
