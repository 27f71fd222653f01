//! Orchestration: provider call, audio pipeline, and ownership of the
//! resulting playable resources.

pub mod error;
pub mod session;
pub mod slot;
pub mod speech;

pub use error::SynthesisError;
pub use session::{ActiveAudio, SpeechSession, DEFAULT_PREVIEW_TEXT};
pub use slot::{AudioSlot, SlotKind, SlotOutcome, SlotTicket};
pub use speech::{render_wav, SpeechPipeline};
