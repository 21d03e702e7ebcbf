//! Audio output transports.
//!
//! A sink opens one output handle per played buffer. [`ClockSink`] is a
//! virtual device that "plays" in real time on the tokio clock, which keeps the
//! controller's state machine honest on hosts without a sound card.

use super::error::PlaybackError;
use crate::domain::audio::AudioBuffer;
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Notify;
use tokio::time::Instant;

pub type CompletionCallback = Box<dyn FnOnce() + Send + 'static>;

/// State of the underlying output transport
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportState {
    Running,
    Suspended,
    Closed,
}

pub trait AudioSink: Send + Sync {
    /// Start playing `audio`. `on_complete` fires at most once, and only when
    /// the buffer plays to its end. Implementations must not call it from
    /// inside `start`.
    fn start(
        &self,
        audio: Arc<AudioBuffer>,
        on_complete: CompletionCallback,
    ) -> Result<Box<dyn OutputHandle>, PlaybackError>;
}

pub trait OutputHandle: Send + Sync {
    fn transport(&self) -> TransportState;
    fn suspend(&self) -> Result<(), PlaybackError>;
    fn resume(&self) -> Result<(), PlaybackError>;
    /// Stop output for good; never triggers the completion callback
    fn stop(&self) -> Result<(), PlaybackError>;
    fn position(&self) -> Duration;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct ClockSink;

impl ClockSink {
    pub fn new() -> Self {
        Self
    }
}

enum ClockState {
    Running { since: Instant, played: Duration },
    Suspended { played: Duration },
    Closed { played: Duration },
}

struct ClockShared {
    state: Mutex<ClockState>,
    wake: Notify,
    duration: Duration,
}

impl ClockShared {
    fn played(&self) -> Duration {
        let played = match *self.state.lock() {
            ClockState::Running { since, played } => played + since.elapsed(),
            ClockState::Suspended { played } | ClockState::Closed { played } => played,
        };
        played.min(self.duration)
    }
}

enum Step {
    Wait(Option<Duration>),
    Finished,
    Exit,
}

impl AudioSink for ClockSink {
    fn start(
        &self,
        audio: Arc<AudioBuffer>,
        on_complete: CompletionCallback,
    ) -> Result<Box<dyn OutputHandle>, PlaybackError> {
        let runtime = tokio::runtime::Handle::try_current()
            .map_err(|e| PlaybackError::Output(e.to_string()))?;

        let shared = Arc::new(ClockShared {
            state: Mutex::new(ClockState::Running {
                since: Instant::now(),
                played: Duration::ZERO,
            }),
            wake: Notify::new(),
            duration: audio.duration(),
        });

        runtime.spawn(drive(shared.clone(), on_complete));
        Ok(Box::new(ClockOutput { shared }))
    }
}

async fn drive(shared: Arc<ClockShared>, on_complete: CompletionCallback) {
    loop {
        let step = {
            let mut state = shared.state.lock();
            match *state {
                ClockState::Running { since, played } => {
                    let elapsed = played + since.elapsed();
                    if elapsed >= shared.duration {
                        *state = ClockState::Closed {
                            played: shared.duration,
                        };
                        Step::Finished
                    } else {
                        Step::Wait(Some(shared.duration - elapsed))
                    }
                }
                ClockState::Suspended { .. } => Step::Wait(None),
                ClockState::Closed { .. } => Step::Exit,
            }
        };

        match step {
            Step::Finished => {
                on_complete();
                return;
            }
            Step::Exit => return,
            Step::Wait(Some(remaining)) => {
                tokio::select! {
                    _ = tokio::time::sleep(remaining) => {}
                    _ = shared.wake.notified() => {}
                }
            }
            Step::Wait(None) => shared.wake.notified().await,
        }
    }
}

struct ClockOutput {
    shared: Arc<ClockShared>,
}

impl OutputHandle for ClockOutput {
    fn transport(&self) -> TransportState {
        match *self.shared.state.lock() {
            ClockState::Running { .. } => TransportState::Running,
            ClockState::Suspended { .. } => TransportState::Suspended,
            ClockState::Closed { .. } => TransportState::Closed,
        }
    }

    fn suspend(&self) -> Result<(), PlaybackError> {
        {
            let mut state = self.shared.state.lock();
            match *state {
                ClockState::Running { since, played } => {
                    *state = ClockState::Suspended {
                        played: played + since.elapsed(),
                    };
                }
                _ => return Err(PlaybackError::InvalidTransition("suspend")),
            }
        }
        self.shared.wake.notify_one();
        Ok(())
    }

    fn resume(&self) -> Result<(), PlaybackError> {
        {
            let mut state = self.shared.state.lock();
            match *state {
                ClockState::Suspended { played } => {
                    *state = ClockState::Running {
                        since: Instant::now(),
                        played,
                    };
                }
                _ => return Err(PlaybackError::InvalidTransition("resume")),
            }
        }
        self.shared.wake.notify_one();
        Ok(())
    }

    fn stop(&self) -> Result<(), PlaybackError> {
        let played = self.shared.played();
        *self.shared.state.lock() = ClockState::Closed { played };
        self.shared.wake.notify_one();
        Ok(())
    }

    fn position(&self) -> Duration {
        self.shared.played()
    }
}

impl Drop for ClockOutput {
    fn drop(&mut self) {
        let _ = self.stop();
    }
}
