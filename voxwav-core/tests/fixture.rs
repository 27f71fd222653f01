use std::sync::Arc;

use tempfile::TempDir;
use voxwav_core::{
    audio::AudioResourceStore,
    pipeline::{SlotOutcome, SpeechPipeline, SpeechSession},
    settings::{Settings, SettingsManager},
    tts::mock::{MockBehavior, MockTts},
};

pub struct Fixture {
    pub session: SpeechSession,
    pub store: AudioResourceStore,
    pub mock: MockTts,
    pub settings: Settings,
    #[allow(dead_code)]
    pub temp_dir: TempDir,
}

impl Fixture {
    #[allow(dead_code)]
    pub fn new() -> Self {
        Self::with_mock_behavior(MockBehavior::default())
    }

    pub fn with_mock_behavior(behavior: MockBehavior) -> Self {
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();

        // Isolated settings so tests never touch ~/.voxwav
        let temp_dir = TempDir::new().unwrap();
        let settings_path = temp_dir.path().join(".voxwav").join("settings.toml");
        let settings = SettingsManager::from_path(settings_path).unwrap().settings();

        let mock = MockTts::new(behavior);
        let pipeline =
            SpeechPipeline::new(Arc::new(mock.clone())).with_sample_rate(settings.sample_rate);
        let store = pipeline.store().clone();
        let session = SpeechSession::new(pipeline).with_preview_text(settings.preview_text.clone());

        Fixture {
            session,
            store,
            mock,
            settings,
            temp_dir,
        }
    }

    #[allow(dead_code)]
    pub fn set_mock_behavior(&self, behavior: MockBehavior) {
        self.mock.set_behavior(behavior);
    }
}

#[allow(dead_code)]
pub fn installed_url(outcome: SlotOutcome) -> String {
    match outcome {
        SlotOutcome::Installed { url } => url,
        SlotOutcome::Superseded => panic!("expected the result to be installed"),
    }
}

#[allow(dead_code)]
pub fn run<F, Fut>(test_fn: F)
where
    F: FnOnce(Fixture) -> Fut,
    Fut: std::future::Future<Output = ()>,
{
    run_with_behavior(MockBehavior::default(), test_fn)
}

pub fn run_with_behavior<F, Fut>(behavior: MockBehavior, test_fn: F)
where
    F: FnOnce(Fixture) -> Fut,
    Fut: std::future::Future<Output = ()>,
{
    use tokio::time::{timeout, Duration};

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap();

    runtime.block_on(async {
        let fixture = Fixture::with_mock_behavior(behavior);
        timeout(Duration::from_secs(30), test_fn(fixture))
            .await
            .expect("Test timed out");
    });
}
