//! Speech synthesis providers

pub mod gemini;
pub mod mock;
pub mod provider;
pub mod types;

pub use gemini::{GeminiConfig, GeminiTts};
pub use provider::TextToSpeech;
pub use types::{VoiceGender, VoiceName, VoiceProfile};
