use std::future::Future;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;
use voxwav_core::pipeline::{render_wav, ActiveAudio, SlotOutcome, SpeechPipeline, SpeechSession};
use voxwav_core::settings::config::API_KEY_ENV_VARS;
use voxwav_core::tts::{GeminiConfig, GeminiTts, VoiceName};
use voxwav_core::Settings;

pub fn list_voices(default_voice: VoiceName) {
    println!("{} voices available:", VoiceName::all().len());
    for voice in VoiceName::all() {
        let profile = voice.profile();
        let marker = if *voice == default_voice { "*" } else { " " };
        println!(
            "{marker} {:<8} [{}] {} - {}",
            voice.id(),
            profile.gender.short_label(),
            profile.label,
            profile.description
        );
    }
}

pub async fn generate(settings: &Settings, text: &str, voice: VoiceName, output: &Path) -> Result<()> {
    let session = build_session(settings)?;

    let outcome = with_spinner(
        format!("Generating audio with {voice}..."),
        session.generate(text, voice),
    )
    .await?;

    let audio = installed(outcome, session.main_audio())?;
    save(&audio, output)
}

pub async fn preview(settings: &Settings, voice: VoiceName, output: &Path) -> Result<()> {
    let session = build_session(settings)?;

    let outcome = with_spinner(format!("Previewing {voice}..."), session.preview(voice)).await?;

    let audio = installed(outcome, session.preview_audio())?;
    save(&audio, output)
}

pub fn render(payload: &str, sample_rate: u32, output: &Path) -> Result<()> {
    let container = render_wav(payload.trim(), sample_rate)?;
    container.write_to(output)?;

    println!("Wrote {} bytes to {}", container.len(), output.display());
    Ok(())
}

fn build_session(settings: &Settings) -> Result<SpeechSession> {
    let api_key = settings.resolve_api_key().with_context(|| {
        format!(
            "No API key configured. Set api_key in the settings file or export {}",
            API_KEY_ENV_VARS.join(" or ")
        )
    })?;

    let config = GeminiConfig {
        api_key,
        model: settings.model.clone(),
        base_url: settings.base_url.clone(),
        timeout: Duration::from_secs(settings.request_timeout_secs),
    };
    let provider = GeminiTts::new(config)?;

    let pipeline = SpeechPipeline::new(Arc::new(provider)).with_sample_rate(settings.sample_rate);
    Ok(SpeechSession::new(pipeline).with_preview_text(settings.preview_text.clone()))
}

fn installed(outcome: SlotOutcome, audio: Option<ActiveAudio>) -> Result<ActiveAudio> {
    match outcome {
        SlotOutcome::Installed { .. } => audio.context("Generated audio is no longer available"),
        SlotOutcome::Superseded => anyhow::bail!("Request was superseded by a newer one"),
    }
}

fn save(audio: &ActiveAudio, output: &Path) -> Result<()> {
    audio.container.write_to(output)?;
    info!(url = %audio.url, ?output, "Saved generated audio");

    println!(
        "Saved {:.1}s of audio ({} bytes) to {}",
        audio.duration.as_secs_f64(),
        audio.container.len(),
        output.display()
    );
    Ok(())
}

async fn with_spinner<F, T>(message: String, future: F) -> T
where
    F: Future<Output = T>,
{
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
        spinner.set_style(style);
    }
    spinner.set_message(message);
    spinner.enable_steady_tick(Duration::from_millis(100));

    let result = future.await;
    spinner.finish_and_clear();
    result
}
