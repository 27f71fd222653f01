use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

mod commands;

use voxwav_core::tts::VoiceName;
use voxwav_core::SettingsManager;

#[derive(Parser, Debug)]
#[command(name = "voxwav")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Turn text into WAV audio with Gemini text-to-speech")]
struct Args {
    /// Load settings from a specific profile
    #[arg(long, value_name = "NAME", global = true)]
    profile: Option<String>,

    /// Load settings from an explicit file instead of ~/.voxwav
    #[arg(long, value_name = "PATH", global = true, conflicts_with = "profile")]
    settings: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the available voices
    Voices,

    /// Synthesize text and save it as a WAV file
    Generate {
        /// Text to speak (defaults to the configured sample text)
        #[arg(long, conflicts_with = "file")]
        text: Option<String>,

        /// Read the text to speak from a file
        #[arg(long, value_name = "PATH")]
        file: Option<PathBuf>,

        /// Voice to use (defaults to the configured voice)
        #[arg(long)]
        voice: Option<VoiceName>,

        /// Where to write the WAV file
        #[arg(long, short, default_value = "speech.wav")]
        output: PathBuf,
    },

    /// Synthesize the preview phrase for a voice
    Preview {
        voice: VoiceName,

        /// Where to write the WAV file (defaults to the temp directory)
        #[arg(long, short)]
        output: Option<PathBuf>,
    },

    /// Convert a saved base64 PCM payload to WAV without calling the API
    Render {
        #[arg(long, value_name = "PATH")]
        input: PathBuf,

        #[arg(long, short)]
        output: PathBuf,

        /// Sample rate of the PCM payload (defaults to the configured rate)
        #[arg(long)]
        sample_rate: Option<u32>,
    },
}

fn main() -> Result<()> {
    setup_tracing()?;

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    runtime.block_on(async_main())
}

async fn async_main() -> Result<()> {
    let args = Args::parse();

    info!(
        "CLI startup: profile={:?}, settings={:?}, command={:?}",
        args.profile, args.settings, args.command
    );

    let settings_manager = match &args.settings {
        Some(path) => SettingsManager::from_path(path.clone())?,
        None => SettingsManager::from_profile(args.profile.as_deref())?,
    };
    let settings = settings_manager.settings();

    match args.command {
        Command::Voices => {
            commands::list_voices(settings.default_voice);
            Ok(())
        }
        Command::Generate {
            text,
            file,
            voice,
            output,
        } => {
            let text = match (text, file) {
                (Some(text), _) => text,
                (None, Some(path)) => read_text(&path)?,
                (None, None) => settings.default_text.clone(),
            };
            let voice = voice.unwrap_or(settings.default_voice);
            commands::generate(&settings, &text, voice, &output).await
        }
        Command::Preview { voice, output } => {
            let output = output.unwrap_or_else(|| {
                std::env::temp_dir().join(format!("voxwav-preview-{}.wav", voice.id()))
            });
            commands::preview(&settings, voice, &output).await
        }
        Command::Render {
            input,
            output,
            sample_rate,
        } => {
            let payload = read_text(&input)?;
            commands::render(&payload, sample_rate.unwrap_or(settings.sample_rate), &output)
        }
    }
}

fn read_text(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("Failed to read {path:?}"))
}

fn setup_tracing() -> Result<()> {
    use std::fs;
    use tracing_subscriber::fmt;

    // Create trace directory in user's home
    let home = dirs::home_dir().unwrap_or_else(std::env::temp_dir);
    let trace_dir = home.join(".voxwav").join("trace");
    fs::create_dir_all(&trace_dir)?;

    let log_file = trace_dir.join("voxwav.log");
    let file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_file)?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    // Setup tracing subscriber with file output
    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::sync::Mutex::new(file))
                .with_ansi(false)
                .with_target(true)
                .with_file(true)
                .with_line_number(true),
        )
        .with(filter)
        .init();

    info!("Tracing initialized to {:?}", log_file);
    Ok(())
}
