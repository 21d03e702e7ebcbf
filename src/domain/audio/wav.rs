//! 16-bit PCM quantization and RIFF/WAVE wrapping for export.

use super::buffer::AudioBuffer;
use chrono::{DateTime, Utc};

pub const WAV_CONTENT_TYPE: &str = "audio/wav";

const HEADER_LEN: usize = 44;
const FORMAT_PCM: u16 = 1;
const BITS_PER_SAMPLE: u16 = 16;
const EXPORT_CHANNELS: u16 = 1;

/// Self-contained audio file ready for download
#[derive(Debug, Clone, PartialEq)]
pub struct ExportArtifact {
    pub bytes: Vec<u8>,
    pub content_type: &'static str,
}

impl ExportArtifact {
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Clamp to [-1, 1] and scale to i16, truncating toward zero
pub fn quantize(samples: &[f32]) -> Vec<i16> {
    samples
        .iter()
        .map(|&s| (s.clamp(-1.0, 1.0) * 32767.0) as i16)
        .collect()
}

/// Prepend a canonical 44-byte WAVE header to raw 16-bit little-endian PCM
pub fn wav_container(pcm: &[u8], sample_rate: u32, channels: u16) -> Vec<u8> {
    let block_align = channels * (BITS_PER_SAMPLE / 8);
    let byte_rate = sample_rate * block_align as u32;
    let data_len = pcm.len() as u32;

    let mut out = Vec::with_capacity(HEADER_LEN + pcm.len());
    out.extend_from_slice(b"RIFF");
    out.extend_from_slice(&(36 + data_len).to_le_bytes());
    out.extend_from_slice(b"WAVE");

    out.extend_from_slice(b"fmt ");
    out.extend_from_slice(&16u32.to_le_bytes());
    out.extend_from_slice(&FORMAT_PCM.to_le_bytes());
    out.extend_from_slice(&channels.to_le_bytes());
    out.extend_from_slice(&sample_rate.to_le_bytes());
    out.extend_from_slice(&byte_rate.to_le_bytes());
    out.extend_from_slice(&block_align.to_le_bytes());
    out.extend_from_slice(&BITS_PER_SAMPLE.to_le_bytes());

    out.extend_from_slice(b"data");
    out.extend_from_slice(&data_len.to_le_bytes());
    out.extend_from_slice(pcm);
    out
}

/// Encode channel 0 of `buffer` as a mono 16-bit WAV file
pub fn to_export_artifact(buffer: &AudioBuffer, sample_rate: u32) -> ExportArtifact {
    let samples = quantize(buffer.channel(0).unwrap_or_default());
    let pcm: Vec<u8> = samples.iter().flat_map(|s| s.to_le_bytes()).collect();

    ExportArtifact {
        bytes: wav_container(&pcm, sample_rate, EXPORT_CHANNELS),
        content_type: WAV_CONTENT_TYPE,
    }
}

/// `<prefix>_<epoch-millis>.wav`
pub fn export_file_name(prefix: &str, created_at: DateTime<Utc>) -> String {
    format!("{}_{}.wav", prefix, created_at.timestamp_millis())
}
