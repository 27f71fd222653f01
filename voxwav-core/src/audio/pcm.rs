//! 16-bit PCM to normalized float samples

use std::time::Duration;

use super::decoder::RawAudioBytes;
use super::error::AudioError;
use super::DEFAULT_SAMPLE_RATE;

/// Float sample buffer, one vector per channel. Values are nominally in
/// `[-1.0, 1.0]`; the encoder clamps anything outside.
#[derive(Debug, Clone, PartialEq)]
pub struct PcmSampleBuffer {
    channels: Vec<Vec<f32>>,
    sample_rate: u32,
}

impl PcmSampleBuffer {
    pub fn mono(samples: Vec<f32>, sample_rate: u32) -> Result<Self, AudioError> {
        Self::from_channels(vec![samples], sample_rate)
    }

    /// Build a buffer from per-channel sample data. Every channel must have
    /// the same length.
    pub fn from_channels(channels: Vec<Vec<f32>>, sample_rate: u32) -> Result<Self, AudioError> {
        if sample_rate == 0 {
            return Err(AudioError::InvalidSampleRate);
        }

        let Some(first) = channels.first() else {
            return Err(AudioError::NoChannels);
        };

        let expected = first.len();
        if let Some((channel, data)) = channels
            .iter()
            .enumerate()
            .find(|(_, data)| data.len() != expected)
        {
            return Err(AudioError::ChannelMismatch {
                channel,
                expected,
                actual: data.len(),
            });
        }

        Ok(Self {
            channels,
            sample_rate,
        })
    }

    /// Samples per channel
    pub fn sample_count(&self) -> usize {
        self.channels[0].len()
    }

    pub fn channel_count(&self) -> usize {
        self.channels.len()
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn channel_data(&self, channel: usize) -> Option<&[f32]> {
        self.channels.get(channel).map(Vec::as_slice)
    }

    pub fn duration(&self) -> Duration {
        Duration::from_secs_f64(self.sample_count() as f64 / f64::from(self.sample_rate))
    }

    pub fn is_empty(&self) -> bool {
        self.sample_count() == 0
    }

    /// Sample at `frame` for `channel`. Callers iterate within bounds.
    pub(crate) fn sample(&self, channel: usize, frame: usize) -> f32 {
        self.channels[channel][frame]
    }
}

/// Interpret `bytes` as little-endian i16 samples and rescale to floats.
pub fn normalize(bytes: &RawAudioBytes, sample_rate: u32) -> Result<PcmSampleBuffer, AudioError> {
    if bytes.len() % 2 != 0 {
        return Err(AudioError::Alignment { len: bytes.len() });
    }

    PcmSampleBuffer::mono(i16_bytes_to_f32(bytes.as_bytes()), sample_rate)
}

/// [`normalize`] at the model's 24 kHz output rate.
pub fn normalize_default(bytes: &RawAudioBytes) -> Result<PcmSampleBuffer, AudioError> {
    normalize(bytes, DEFAULT_SAMPLE_RATE)
}

// Divides by 32768 rather than 32767; the encoder scales negatives back up by
// the same factor.
fn i16_bytes_to_f32(bytes: &[u8]) -> Vec<f32> {
    bytes
        .chunks_exact(2)
        .map(|chunk| {
            let sample = i16::from_le_bytes([chunk[0], chunk[1]]);
            sample as f32 / 32768.0
        })
        .collect()
}
