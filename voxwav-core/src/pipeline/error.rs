use thiserror::Error;

use crate::audio::AudioError;

#[derive(Error, Debug)]
pub enum SynthesisError {
    #[error("Enter some text to generate audio")]
    EmptyText,

    #[error("No audio data was received from the model")]
    EmptyResponse,

    #[error("{0}")]
    Upstream(String),

    #[error(transparent)]
    Audio(#[from] AudioError),
}

impl SynthesisError {
    pub(crate) fn upstream(source: anyhow::Error) -> Self {
        Self::Upstream(format!("{source:#}"))
    }
}
