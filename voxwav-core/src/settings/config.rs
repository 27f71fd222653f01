use serde::{Deserialize, Serialize};

use crate::audio::DEFAULT_SAMPLE_RATE;
use crate::pipeline::DEFAULT_PREVIEW_TEXT;
use crate::tts::gemini::{DEFAULT_BASE_URL, DEFAULT_MODEL};
use crate::tts::VoiceName;

/// Environment variables consulted, in order, when no key is configured.
pub const API_KEY_ENV_VARS: [&str; 2] = ["GEMINI_API_KEY", "API_KEY"];

pub const DEFAULT_TEXT: &str = "Hola, soy la voz de Gemini. Puedo leer cualquier texto que escribas aquí con una entonación natural y clara. ¡Pruébame!";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Settings {
    /// Gemini API key. Falls back to the environment when unset.
    #[serde(default)]
    pub api_key: Option<String>,

    #[serde(default = "default_model")]
    pub model: String,

    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Rate the returned PCM stream is interpreted at
    #[serde(default = "default_sample_rate")]
    pub sample_rate: u32,

    #[serde(default)]
    pub default_voice: VoiceName,

    #[serde(default = "default_text")]
    pub default_text: String,

    #[serde(default = "default_preview_text")]
    pub preview_text: String,

    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_sample_rate() -> u32 {
    DEFAULT_SAMPLE_RATE
}

fn default_text() -> String {
    DEFAULT_TEXT.to_string()
}

fn default_preview_text() -> String {
    DEFAULT_PREVIEW_TEXT.to_string()
}

fn default_request_timeout_secs() -> u64 {
    300
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_key: None,
            model: default_model(),
            base_url: default_base_url(),
            sample_rate: default_sample_rate(),
            default_voice: VoiceName::default(),
            default_text: default_text(),
            preview_text: default_preview_text(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl Settings {
    /// Configured key, else the first non-empty environment variable.
    pub fn resolve_api_key(&self) -> Option<String> {
        self.resolve_api_key_with(|name| std::env::var(name).ok())
    }

    pub fn resolve_api_key_with<F>(&self, lookup: F) -> Option<String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let configured = self
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .map(str::to_string);

        configured.or_else(|| {
            API_KEY_ENV_VARS
                .into_iter()
                .filter_map(|name| lookup(name))
                .map(|key| key.trim().to_string())
                .find(|key| !key.is_empty())
        })
    }
}
