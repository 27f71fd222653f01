use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use tracing::info;

use super::error::SynthesisError;
use super::slot::{AudioSlot, SlotKind, SlotOutcome};
use super::speech::SpeechPipeline;
use crate::audio::WavContainer;
use crate::tts::VoiceName;

pub const DEFAULT_PREVIEW_TEXT: &str = "Hola, esta es una prueba de mi voz en español.";

/// Snapshot of the audio a slot currently holds
#[derive(Debug, Clone)]
pub struct ActiveAudio {
    pub url: String,
    pub container: Arc<WavContainer>,
    pub duration: Duration,
}

/// One user session: an independent slot for the main generation and one for
/// voice previews. Slot locks are never held across an await.
pub struct SpeechSession {
    pipeline: SpeechPipeline,
    preview_text: String,
    main: Mutex<AudioSlot>,
    preview: Mutex<AudioSlot>,
}

impl SpeechSession {
    pub fn new(pipeline: SpeechPipeline) -> Self {
        Self {
            pipeline,
            preview_text: DEFAULT_PREVIEW_TEXT.to_string(),
            main: Mutex::new(AudioSlot::new(SlotKind::Main)),
            preview: Mutex::new(AudioSlot::new(SlotKind::Preview)),
        }
    }

    pub fn with_preview_text(mut self, preview_text: impl Into<String>) -> Self {
        self.preview_text = preview_text.into();
        self
    }

    /// Synthesize `text` into the main slot.
    pub async fn generate(
        &self,
        text: &str,
        voice: VoiceName,
    ) -> Result<SlotOutcome, SynthesisError> {
        self.run(&self.main, text, voice).await
    }

    /// Synthesize the preview phrase for `voice` into the preview slot,
    /// stopping whatever preview was playing.
    pub async fn preview(&self, voice: VoiceName) -> Result<SlotOutcome, SynthesisError> {
        self.run(&self.preview, &self.preview_text, voice).await
    }

    /// Release the main generation.
    pub fn reset(&self) {
        lock(&self.main).release();
    }

    /// Release the current preview and ignore any preview still in flight.
    pub fn stop_preview(&self) {
        lock(&self.preview).cancel();
    }

    pub fn main_audio(&self) -> Option<ActiveAudio> {
        snapshot(&lock(&self.main))
    }

    pub fn preview_audio(&self) -> Option<ActiveAudio> {
        snapshot(&lock(&self.preview))
    }

    async fn run(
        &self,
        slot: &Mutex<AudioSlot>,
        text: &str,
        voice: VoiceName,
    ) -> Result<SlotOutcome, SynthesisError> {
        let (kind, ticket) = {
            let mut slot = lock(slot);
            (slot.kind(), slot.begin())
        };

        info!(slot = %kind, %voice, "Starting synthesis");
        let resource = self.pipeline.synthesize_to_audio(text, voice).await?;

        let outcome = lock(slot).install(ticket, resource);
        info!(slot = %kind, ?outcome, "Synthesis finished");
        Ok(outcome)
    }
}

fn lock(slot: &Mutex<AudioSlot>) -> MutexGuard<'_, AudioSlot> {
    slot.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn snapshot(slot: &AudioSlot) -> Option<ActiveAudio> {
    slot.active().map(|resource| ActiveAudio {
        url: resource.url().to_string(),
        container: resource.container().clone(),
        duration: resource.duration(),
    })
}
