//! WAV (RIFF, linear PCM, 16-bit) container encoding
//!
//! The layout is the canonical 44-byte header followed by interleaved
//! little-endian samples:
//!
//! | offset | field                         |
//! |--------|-------------------------------|
//! | 0      | `"RIFF"`                      |
//! | 4      | total length - 8              |
//! | 8      | `"WAVE"`                      |
//! | 12     | `"fmt "`, 16, format 1        |
//! | 22     | channels, rate, byte rate, block align, bits |
//! | 36     | `"data"`, total length - 44   |
//! | 44     | samples                       |

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use super::error::AudioError;
use super::pcm::PcmSampleBuffer;

pub const HEADER_LEN: usize = 44;
pub const BITS_PER_SAMPLE: u16 = 16;
pub const MIME_TYPE: &str = "audio/wav";

const BYTES_PER_SAMPLE: u16 = 2;
const FMT_CHUNK_LEN: u32 = 16;
const FORMAT_PCM: u16 = 1;

/// Linear little-endian byte builder. Each write appends at the current
/// position and advances it.
struct WavWriter {
    buf: Vec<u8>,
}

impl WavWriter {
    fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: Vec::with_capacity(capacity),
        }
    }

    fn tag(&mut self, tag: &[u8; 4]) -> &mut Self {
        self.buf.extend_from_slice(tag);
        self
    }

    fn u16(&mut self, value: u16) -> &mut Self {
        self.buf.extend_from_slice(&value.to_le_bytes());
        self
    }

    fn u32(&mut self, value: u32) -> &mut Self {
        self.buf.extend_from_slice(&value.to_le_bytes());
        self
    }

    fn i16(&mut self, value: i16) -> &mut Self {
        self.buf.extend_from_slice(&value.to_le_bytes());
        self
    }

    fn position(&self) -> usize {
        self.buf.len()
    }

    fn finish(self) -> Vec<u8> {
        self.buf
    }
}

/// Header fields of a 16-bit PCM WAV container
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WavHeader {
    pub riff_chunk_size: u32,
    pub fmt_chunk_size: u32,
    pub audio_format: u16,
    pub channels: u16,
    pub sample_rate: u32,
    pub byte_rate: u32,
    pub block_align: u16,
    pub bits_per_sample: u16,
    pub data_chunk_size: u32,
}

impl WavHeader {
    /// Parse the canonical 44-byte header. Returns `None` when the magic
    /// values are missing or the slice is too short.
    pub fn parse(bytes: &[u8]) -> Option<Self> {
        let header = bytes.get(..HEADER_LEN)?;
        if &header[0..4] != b"RIFF"
            || &header[8..12] != b"WAVE"
            || &header[12..16] != b"fmt "
            || &header[36..40] != b"data"
        {
            return None;
        }

        let u16_at = |at: usize| u16::from_le_bytes([header[at], header[at + 1]]);
        let u32_at = |at: usize| {
            u32::from_le_bytes([header[at], header[at + 1], header[at + 2], header[at + 3]])
        };

        Some(Self {
            riff_chunk_size: u32_at(4),
            fmt_chunk_size: u32_at(16),
            audio_format: u16_at(20),
            channels: u16_at(22),
            sample_rate: u32_at(24),
            byte_rate: u32_at(28),
            block_align: u16_at(32),
            bits_per_sample: u16_at(34),
            data_chunk_size: u32_at(40),
        })
    }

    /// Header for `sample_count` frames of `channel_count` interleaved
    /// 16-bit channels. Fails when a field would not fit its width.
    pub fn for_layout(
        sample_count: usize,
        channel_count: usize,
        sample_rate: u32,
    ) -> Result<Self, AudioError> {
        let (channels, block_align) = u16::try_from(channel_count)
            .ok()
            .and_then(|channels| Some((channels, channels.checked_mul(BYTES_PER_SAMPLE)?)))
            .ok_or(AudioError::TooManyChannels {
                channels: channel_count,
            })?;
        let byte_rate = sample_rate
            .checked_mul(u32::from(block_align))
            .ok_or(AudioError::ByteRateOverflow {
                sample_rate,
                block_align,
            })?;

        let total_bytes = sample_count as u64 * u64::from(block_align) + HEADER_LEN as u64;
        let total = u32::try_from(total_bytes)
            .map_err(|_| AudioError::ContainerTooLarge { total_bytes })?;

        Ok(Self {
            riff_chunk_size: total - 8,
            fmt_chunk_size: FMT_CHUNK_LEN,
            audio_format: FORMAT_PCM,
            channels,
            sample_rate,
            byte_rate,
            block_align,
            bits_per_sample: BITS_PER_SAMPLE,
            data_chunk_size: total - HEADER_LEN as u32,
        })
    }
}

/// A complete, immutable WAV file held in memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WavContainer {
    bytes: Vec<u8>,
    header: WavHeader,
}

impl WavContainer {
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Always false: even an empty recording carries its header.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn header(&self) -> &WavHeader {
        &self.header
    }

    pub fn mime_type(&self) -> &'static str {
        MIME_TYPE
    }

    /// Interleaved sample bytes following the header
    pub fn data(&self) -> &[u8] {
        &self.bytes[HEADER_LEN..]
    }

    pub fn write_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {parent:?}"))?;
        }
        fs::write(path, &self.bytes).with_context(|| format!("Failed to write WAV to {path:?}"))
    }
}

/// Encode a float buffer as a 16-bit PCM WAV container.
pub fn encode_wav(buffer: &PcmSampleBuffer) -> Result<WavContainer, AudioError> {
    let sample_count = buffer.sample_count();
    let channel_count = buffer.channel_count();
    let header = WavHeader::for_layout(sample_count, channel_count, buffer.sample_rate())?;
    let total = header.riff_chunk_size as usize + 8;

    let mut writer = WavWriter::with_capacity(total);
    writer
        .tag(b"RIFF")
        .u32(header.riff_chunk_size)
        .tag(b"WAVE")
        .tag(b"fmt ")
        .u32(header.fmt_chunk_size)
        .u16(header.audio_format)
        .u16(header.channels)
        .u32(header.sample_rate)
        .u32(header.byte_rate)
        .u16(header.block_align)
        .u16(header.bits_per_sample)
        .tag(b"data")
        .u32(header.data_chunk_size);
    debug_assert_eq!(writer.position(), HEADER_LEN);

    for frame in 0..sample_count {
        for channel in 0..channel_count {
            writer.i16(scale_sample(buffer.sample(channel, frame)));
        }
    }
    debug_assert_eq!(writer.position(), total);

    Ok(WavContainer {
        bytes: writer.finish(),
        header,
    })
}

/// Clamp to `[-1, 1]` and scale to i16, truncating toward zero. Samples
/// below -0.5 scale by 32768, everything else by 32767, so -1.0 reaches
/// `i16::MIN` and 1.0 reaches `i16::MAX`.
pub fn scale_sample(sample: f32) -> i16 {
    let sample = f64::from(sample).clamp(-1.0, 1.0);
    let scaled = if 0.5 + sample < 0.0 {
        sample * 32768.0
    } else {
        sample * 32767.0
    };
    // `as` truncates toward zero and maps NaN to 0
    scaled as i16
}
