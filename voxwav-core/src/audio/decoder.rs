//! Base64 payload decoding

use std::borrow::Cow;

use base64::engine::general_purpose::{STANDARD, STANDARD_NO_PAD};
use base64::Engine as _;

use super::error::AudioError;

/// Raw bytes decoded from a synthesis payload. Interpreted as 16-bit PCM by
/// the normalizer, which is where the even-length requirement is checked.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RawAudioBytes(Vec<u8>);

impl RawAudioBytes {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<u8>> for RawAudioBytes {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}

/// Decode a standard base64 string into raw audio bytes.
///
/// ASCII whitespace is ignored, so line-wrapped payloads decode. Padding must
/// be either canonical or absent altogether.
pub fn decode_base64(text: &str) -> Result<RawAudioBytes, AudioError> {
    let compact: Cow<'_, str> = if text.bytes().any(|b| b.is_ascii_whitespace()) {
        Cow::Owned(text.chars().filter(|c| !c.is_ascii_whitespace()).collect())
    } else {
        Cow::Borrowed(text)
    };

    let engine = if compact.contains('=') {
        &STANDARD
    } else {
        &STANDARD_NO_PAD
    };
    let bytes = engine.decode(compact.as_bytes())?;
    Ok(RawAudioBytes(bytes))
}
