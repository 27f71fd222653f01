//! Gemini text-to-speech implementation

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::provider::TextToSpeech;
use super::types::VoiceName;
use crate::audio::AudioProfile;

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash-preview-tts";
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Gemini TTS output is 24 kHz mono 16-bit PCM
const OUTPUT_PROFILE: AudioProfile = AudioProfile::mono(24_000);

#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
    pub timeout: Duration,
}

impl GeminiConfig {
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(300),
        }
    }
}

pub struct GeminiTts {
    config: GeminiConfig,
    client: Client,
}

impl GeminiTts {
    pub fn new(config: GeminiConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { config, client })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.config.base_url.trim_end_matches('/'),
            self.config.model
        )
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<RequestContent>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct RequestContent {
    parts: Vec<TextPart>,
}

#[derive(Debug, Serialize)]
struct TextPart {
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_modalities: Vec<&'static str>,
    speech_config: SpeechConfig,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SpeechConfig {
    voice_config: VoiceConfig,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct VoiceConfig {
    prebuilt_voice_config: PrebuiltVoiceConfig,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PrebuiltVoiceConfig {
    voice_name: VoiceName,
}

#[derive(Debug, Default, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ResponsePart {
    inline_data: Option<InlineData>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InlineData {
    #[serde(default)]
    mime_type: Option<String>,
    data: Option<String>,
}

fn build_request(text: &str, voice: VoiceName) -> GenerateContentRequest {
    GenerateContentRequest {
        contents: vec![RequestContent {
            parts: vec![TextPart {
                text: text.to_string(),
            }],
        }],
        generation_config: GenerationConfig {
            response_modalities: vec!["AUDIO"],
            speech_config: SpeechConfig {
                voice_config: VoiceConfig {
                    prebuilt_voice_config: PrebuiltVoiceConfig { voice_name: voice },
                },
            },
        },
    }
}

/// Audio lives in the first part of the first candidate.
fn extract_audio(response: GenerateContentResponse) -> Option<String> {
    let part = response
        .candidates
        .into_iter()
        .next()?
        .content?
        .parts
        .into_iter()
        .next()?;
    let inline = part.inline_data?;
    debug!(mime_type = ?inline.mime_type, "Gemini returned inline audio");
    inline.data.filter(|data| !data.is_empty())
}

#[async_trait]
impl TextToSpeech for GeminiTts {
    fn name(&self) -> &'static str {
        "gemini"
    }

    fn output_profile(&self) -> AudioProfile {
        OUTPUT_PROFILE
    }

    async fn request_speech(&self, text: &str, voice: VoiceName) -> Result<Option<String>> {
        let request_body = build_request(text, voice);

        info!(
            model = %self.config.model,
            %voice,
            chars = text.chars().count(),
            "Requesting speech from Gemini"
        );

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.config.api_key)
            .header("Content-Type", "application/json")
            .json(&request_body)
            .send()
            .await
            .context("Failed to send request to Gemini")?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            debug!(?status, %body, "Gemini API returned error");
            anyhow::bail!("Gemini API error {status}: {body}");
        }

        let parsed: GenerateContentResponse = response
            .json()
            .await
            .context("Failed to parse Gemini response")?;

        Ok(extract_audio(parsed))
    }
}
