use super::error::PlaybackError;
use super::sink::{AudioSink, OutputHandle, TransportState};
use crate::domain::audio::AudioBuffer;
use parking_lot::Mutex;
use serde::Serialize;
use std::sync::{Arc, Weak};
use std::time::Duration;
use uuid::Uuid;

pub type EndedCallback = Box<dyn FnOnce() + Send + 'static>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaybackState {
    Stopped,
    Playing,
    Paused,
}

/// What the active session is playing
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PlaybackSource {
    History { id: Uuid },
    Preview { voice_id: String },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlaybackSnapshot {
    pub state: PlaybackState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<PlaybackSource>,
    pub position_ms: u64,
    pub duration_ms: u64,
}

struct Session {
    generation: u64,
    handle: Box<dyn OutputHandle>,
    source: PlaybackSource,
    duration: Duration,
    on_ended: Option<EndedCallback>,
}

#[derive(Default)]
struct Inner {
    session: Option<Session>,
    next_generation: u64,
}

/// Owns the single live playback session.
///
/// Starting a new session stops the previous one first, under the same lock,
/// so two output handles are never live at once. A superseded or stopped
/// session never reports completion.
pub struct PlaybackController {
    sink: Arc<dyn AudioSink>,
    inner: Arc<Mutex<Inner>>,
}

impl PlaybackController {
    pub fn new(sink: Arc<dyn AudioSink>) -> Self {
        Self {
            sink,
            inner: Arc::new(Mutex::new(Inner::default())),
        }
    }

    pub fn play(
        &self,
        audio: Arc<AudioBuffer>,
        source: PlaybackSource,
        on_ended: Option<EndedCallback>,
    ) -> Result<(), PlaybackError> {
        let mut inner = self.inner.lock();

        if let Some(previous) = inner.session.take() {
            tracing::debug!(source = ?previous.source, "Stopping previous playback");
            stop_quietly(&previous);
        }

        inner.next_generation += 1;
        let generation = inner.next_generation;
        let weak = Arc::downgrade(&self.inner);
        let duration = audio.duration();

        let handle = self
            .sink
            .start(audio, Box::new(move || finish(weak, generation)))?;

        tracing::info!(
            source = ?source,
            duration_ms = duration.as_millis() as u64,
            "Playback started"
        );

        inner.session = Some(Session {
            generation,
            handle,
            source,
            duration,
            on_ended,
        });
        Ok(())
    }

    /// Pause a running session; no-op otherwise
    pub fn pause(&self) -> bool {
        self.transition(TransportState::Running, |handle| handle.suspend())
    }

    /// Resume a paused session; no-op otherwise
    pub fn resume(&self) -> bool {
        self.transition(TransportState::Suspended, |handle| handle.resume())
    }

    /// Stop whatever is playing. Idempotent; `on_ended` does not fire.
    pub fn stop(&self) {
        let session = self.inner.lock().session.take();
        if let Some(session) = session {
            stop_quietly(&session);
            tracing::info!(source = ?session.source, "Playback stopped");
        }
    }

    /// Stop only if the active session plays `source`
    pub fn stop_source(&self, source: &PlaybackSource) -> bool {
        let session = {
            let mut inner = self.inner.lock();
            match &inner.session {
                Some(active) if &active.source == source => inner.session.take(),
                _ => None,
            }
        };
        match session {
            Some(session) => {
                stop_quietly(&session);
                true
            }
            None => false,
        }
    }

    pub fn state(&self) -> PlaybackState {
        self.snapshot().state
    }

    pub fn snapshot(&self) -> PlaybackSnapshot {
        let inner = self.inner.lock();
        match &inner.session {
            Some(session) => PlaybackSnapshot {
                state: match session.handle.transport() {
                    TransportState::Running => PlaybackState::Playing,
                    TransportState::Suspended => PlaybackState::Paused,
                    TransportState::Closed => PlaybackState::Stopped,
                },
                source: Some(session.source.clone()),
                position_ms: session.handle.position().as_millis() as u64,
                duration_ms: session.duration.as_millis() as u64,
            },
            None => PlaybackSnapshot {
                state: PlaybackState::Stopped,
                source: None,
                position_ms: 0,
                duration_ms: 0,
            },
        }
    }

    fn transition<F>(&self, required: TransportState, apply: F) -> bool
    where
        F: FnOnce(&dyn OutputHandle) -> Result<(), PlaybackError>,
    {
        let inner = self.inner.lock();
        let Some(session) = &inner.session else {
            return false;
        };
        if session.handle.transport() != required {
            return false;
        }
        match apply(session.handle.as_ref()) {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(error = %e, "Playback transition ignored");
                false
            }
        }
    }
}

fn stop_quietly(session: &Session) {
    if let Err(e) = session.handle.stop() {
        tracing::debug!(error = %e, "Ignoring output stop failure");
    }
}

/// Completion hook handed to the sink for session `generation`
fn finish(inner: Weak<Mutex<Inner>>, generation: u64) {
    let Some(inner) = inner.upgrade() else {
        return;
    };

    let on_ended = {
        let mut guard = inner.lock();
        match &guard.session {
            Some(active) if active.generation == generation => {
                guard.session.take().and_then(|session| session.on_ended)
            }
            _ => None,
        }
    };

    if let Some(callback) = on_ended {
        tracing::info!("Playback finished");
        callback();
    }
}
