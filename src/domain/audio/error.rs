#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AssemblyError {
    #[error("no audio buffers to concatenate")]
    Empty,
    #[error("channel data has uneven lengths")]
    RaggedChannels,
    #[error(
        "buffer {index} is {found_rate} Hz / {found_channels} ch, expected {expected_rate} Hz / {expected_channels} ch"
    )]
    FormatMismatch {
        index: usize,
        expected_rate: u32,
        expected_channels: u16,
        found_rate: u32,
        found_channels: u16,
    },
}
