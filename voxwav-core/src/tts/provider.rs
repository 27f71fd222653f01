use anyhow::Result;
use async_trait::async_trait;

use super::types::VoiceName;
use crate::audio::AudioProfile;

/// Trait for text-to-speech providers
#[async_trait]
pub trait TextToSpeech: Send + Sync {
    fn name(&self) -> &'static str;

    /// Format of the PCM stream behind the returned payload
    fn output_profile(&self) -> AudioProfile {
        AudioProfile::default()
    }

    /// Synthesize `text` and return the base64-encoded 16-bit PCM payload.
    /// `Ok(None)` means the call succeeded but carried no audio.
    async fn request_speech(&self, text: &str, voice: VoiceName) -> Result<Option<String>>;
}
