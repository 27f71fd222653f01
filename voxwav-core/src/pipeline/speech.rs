use std::sync::Arc;

use tracing::{debug, info, warn};

use super::error::SynthesisError;
use crate::audio::{
    decode_base64, encode_wav, normalize, AudioError, AudioResourceStore, PcmSampleBuffer,
    WavContainer, WavResource,
};
use crate::tts::{TextToSpeech, VoiceName};

/// Decode, normalize and encode a base64 PCM payload into a WAV container.
pub fn render_wav(payload: &str, sample_rate: u32) -> Result<WavContainer, AudioError> {
    let bytes = decode_base64(payload)?;
    let buffer = normalize(&bytes, sample_rate)?;
    encode_wav(&buffer)
}

/// Sequences provider call, decode, normalize and encode, and publishes the
/// result in its resource store. Every call performs a fresh request.
#[derive(Clone)]
pub struct SpeechPipeline {
    provider: Arc<dyn TextToSpeech>,
    store: AudioResourceStore,
    sample_rate: u32,
}

impl SpeechPipeline {
    pub fn new(provider: Arc<dyn TextToSpeech>) -> Self {
        let sample_rate = provider.output_profile().sample_rate;
        Self {
            provider,
            store: AudioResourceStore::new(),
            sample_rate,
        }
    }

    /// Override the rate the PCM payload is interpreted at.
    pub fn with_sample_rate(mut self, sample_rate: u32) -> Self {
        self.sample_rate = sample_rate;
        self
    }

    pub fn with_store(mut self, store: AudioResourceStore) -> Self {
        self.store = store;
        self
    }

    pub fn store(&self) -> &AudioResourceStore {
        &self.store
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub async fn synthesize_to_audio(
        &self,
        text: &str,
        voice: VoiceName,
    ) -> Result<WavResource, SynthesisError> {
        if text.trim().is_empty() {
            return Err(SynthesisError::EmptyText);
        }

        let payload = self
            .provider
            .request_speech(text, voice)
            .await
            .map_err(|e| {
                warn!(provider = self.provider.name(), %voice, error = ?e, "Speech synthesis failed");
                SynthesisError::upstream(e)
            })?
            .filter(|payload| !payload.is_empty())
            .ok_or(SynthesisError::EmptyResponse)?;

        debug!(%voice, payload_len = payload.len(), "Received speech payload");
        self.render(&payload)
    }

    /// Run the local stages on an existing payload and publish the result.
    pub fn render(&self, payload: &str) -> Result<WavResource, SynthesisError> {
        let bytes = decode_base64(payload)?;
        let buffer = normalize(&bytes, self.sample_rate)?;
        Ok(self.publish(&buffer)?)
    }

    fn publish(&self, buffer: &PcmSampleBuffer) -> Result<WavResource, AudioError> {
        let container = encode_wav(buffer)?;
        let duration = buffer.duration();
        info!(
            samples = buffer.sample_count(),
            sample_rate = buffer.sample_rate(),
            bytes = container.len(),
            ?duration,
            "Encoded WAV"
        );
        Ok(self.store.publish(container, duration))
    }
}
