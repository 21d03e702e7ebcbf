use super::buffer::AudioBuffer;
use super::error::AssemblyError;

/// Concatenate per-segment buffers into one gap-free buffer, in order.
///
/// All buffers must share sample rate and channel count. A single buffer is
/// returned as is.
pub fn concatenate(buffers: Vec<AudioBuffer>) -> Result<AudioBuffer, AssemblyError> {
    let first = buffers.first().ok_or(AssemblyError::Empty)?;
    let sample_rate = first.sample_rate();
    let channel_count = first.channel_count();

    for (index, buffer) in buffers.iter().enumerate() {
        if buffer.sample_rate() != sample_rate || buffer.channel_count() != channel_count {
            return Err(AssemblyError::FormatMismatch {
                index,
                expected_rate: sample_rate,
                expected_channels: channel_count,
                found_rate: buffer.sample_rate(),
                found_channels: buffer.channel_count(),
            });
        }
    }

    if buffers.len() == 1 {
        return buffers.into_iter().next().ok_or(AssemblyError::Empty);
    }

    let total_frames: usize = buffers.iter().map(AudioBuffer::len).sum();
    let mut merged = vec![vec![0.0f32; total_frames]; channel_count as usize];

    let mut offset = 0;
    for buffer in &buffers {
        let frames = buffer.len();
        for (target, source) in merged.iter_mut().zip(buffer.channels()) {
            target[offset..offset + frames].copy_from_slice(source);
        }
        offset += frames;
    }

    tracing::debug!(
        segment_count = buffers.len(),
        total_frames = total_frames,
        "Audio buffers concatenated"
    );

    AudioBuffer::from_channels(sample_rate, merged)
}
