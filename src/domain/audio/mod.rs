pub mod assembler;
pub mod buffer;
pub mod error;
pub mod wav;

pub use assembler::concatenate;
pub use buffer::AudioBuffer;
pub use error::AssemblyError;
pub use wav::{to_export_artifact, ExportArtifact};

/// Sample rate of every buffer the speech provider returns
pub const PROVIDER_SAMPLE_RATE: u32 = 24_000;

/// Channel count of every buffer the speech provider returns
pub const PROVIDER_CHANNELS: u16 = 1;
