pub mod audio;
pub mod pipeline;
pub mod settings;
pub mod tts;

// Public library API. The front-end only needs these; everything else is
// public for tests and embedding.
pub use audio::{AudioError, PcmSampleBuffer, RawAudioBytes, WavContainer};
pub use pipeline::{SpeechPipeline, SpeechSession, SynthesisError};
pub use settings::{Settings, SettingsManager};
pub use tts::{TextToSpeech, VoiceName};
