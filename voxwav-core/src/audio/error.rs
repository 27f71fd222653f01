use thiserror::Error;

#[derive(Error, Debug)]
pub enum AudioError {
    #[error("Malformed base64 audio payload: {0}")]
    Decode(#[from] base64::DecodeError),

    #[error("PCM byte stream has odd length {len}; 16-bit samples need pairs of bytes")]
    Alignment { len: usize },

    #[error("Sample rate must be positive")]
    InvalidSampleRate,

    #[error("Channel {channel} has {actual} samples, expected {expected}")]
    ChannelMismatch {
        channel: usize,
        expected: usize,
        actual: usize,
    },

    #[error("Audio buffer needs at least one channel")]
    NoChannels,

    #[error("{channels} channels exceed the WAV block alignment field")]
    TooManyChannels { channels: usize },

    #[error("Byte rate for {sample_rate} Hz with {block_align}-byte frames overflows 32 bits")]
    ByteRateOverflow { sample_rate: u32, block_align: u16 },

    #[error("WAV container of {total_bytes} bytes does not fit the 32-bit RIFF size fields")]
    ContainerTooLarge { total_bytes: u64 },
}
