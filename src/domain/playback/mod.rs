pub mod controller;
pub mod error;
pub mod sink;

pub use controller::{EndedCallback, PlaybackController, PlaybackSnapshot, PlaybackSource, PlaybackState};
pub use error::PlaybackError;
pub use sink::{AudioSink, ClockSink, CompletionCallback, OutputHandle, TransportState};
