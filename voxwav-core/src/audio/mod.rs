//! Audio decode/encode pipeline: base64 text to raw PCM bytes, PCM bytes to
//! normalized float samples, float samples to a WAV container.

pub mod decoder;
pub mod error;
pub mod pcm;
pub mod resource;
pub mod wav;

pub use decoder::{decode_base64, RawAudioBytes};
pub use error::AudioError;
pub use pcm::{normalize, normalize_default, PcmSampleBuffer};
pub use resource::{AudioResourceStore, WavResource};
pub use wav::{encode_wav, WavContainer, WavHeader};

/// Sample rate of the PCM stream returned by the synthesis model.
pub const DEFAULT_SAMPLE_RATE: u32 = 24_000;

/// Audio format profile specifying sample rate and channel count
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AudioProfile {
    pub sample_rate: u32,
    pub channels: u16,
}

impl AudioProfile {
    pub const fn mono(sample_rate: u32) -> Self {
        Self {
            sample_rate,
            channels: 1,
        }
    }
}

impl Default for AudioProfile {
    fn default() -> Self {
        Self::mono(DEFAULT_SAMPLE_RATE)
    }
}
