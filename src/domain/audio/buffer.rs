use super::error::AssemblyError;
use std::time::Duration;

/// Planar floating-point sample buffer.
///
/// Every channel holds the same number of frames. Samples are nominally in
/// `[-1.0, 1.0]` but nothing here enforces that; the encoder clamps on export.
#[derive(Debug, Clone, PartialEq)]
pub struct AudioBuffer {
    sample_rate: u32,
    channels: Vec<Vec<f32>>,
}

impl AudioBuffer {
    /// Build a single-channel buffer
    pub fn mono(sample_rate: u32, samples: Vec<f32>) -> Self {
        Self {
            sample_rate,
            channels: vec![samples],
        }
    }

    /// Build a buffer from planar channel data, rejecting ragged channels
    pub fn from_channels(sample_rate: u32, channels: Vec<Vec<f32>>) -> Result<Self, AssemblyError> {
        let frames = channels.first().map(Vec::len).unwrap_or(0);
        if channels.is_empty() || channels.iter().any(|c| c.len() != frames) {
            return Err(AssemblyError::RaggedChannels);
        }
        Ok(Self {
            sample_rate,
            channels,
        })
    }

    /// Decode 16-bit little-endian mono PCM, the provider's wire format
    pub fn from_pcm16_le(sample_rate: u32, bytes: &[u8]) -> Self {
        let samples = bytes
            .chunks_exact(2)
            .map(|pair| i16::from_le_bytes([pair[0], pair[1]]) as f32 / 32768.0)
            .collect();
        Self::mono(sample_rate, samples)
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn channel_count(&self) -> u16 {
        self.channels.len() as u16
    }

    /// Number of frames (samples per channel)
    pub fn len(&self) -> usize {
        self.channels.first().map(Vec::len).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn channel(&self, index: usize) -> Option<&[f32]> {
        self.channels.get(index).map(Vec::as_slice)
    }

    pub fn channels(&self) -> &[Vec<f32>] {
        &self.channels
    }

    pub fn duration(&self) -> Duration {
        if self.sample_rate == 0 {
            return Duration::ZERO;
        }
        Duration::from_secs_f64(self.len() as f64 / self.sample_rate as f64)
    }
}
