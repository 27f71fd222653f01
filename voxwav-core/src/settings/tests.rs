use crate::settings::manager::SettingsManager;
use crate::settings::Settings;
use crate::tts::VoiceName;
use std::collections::HashMap;
use tempfile::TempDir;

#[test]
fn test_creates_default_settings_file() {
    let temp_dir = TempDir::new().unwrap();
    let settings_path = temp_dir.path().join("nested").join("settings.toml");

    let manager = SettingsManager::from_path(settings_path.clone()).unwrap();

    assert!(settings_path.exists());
    assert_eq!(manager.settings(), Settings::default());
    assert_eq!(manager.settings().sample_rate, 24_000);
    assert_eq!(manager.settings().default_voice, VoiceName::Puck);
}

#[test]
fn test_partial_file_uses_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let settings_path = temp_dir.path().join("settings.toml");
    std::fs::write(&settings_path, "default_voice = \"Zephyr\"\nsample_rate = 16000\n").unwrap();

    let settings = SettingsManager::from_path(settings_path).unwrap().settings();

    assert_eq!(settings.default_voice, VoiceName::Zephyr);
    assert_eq!(settings.sample_rate, 16_000);
    assert_eq!(settings.model, "gemini-2.5-flash-preview-tts");
    assert_eq!(settings.request_timeout_secs, 300);
}

#[test]
fn test_corrupt_file_is_backed_up() {
    let temp_dir = TempDir::new().unwrap();
    let settings_path = temp_dir.path().join("settings.toml");
    std::fs::write(&settings_path, "this is = = not toml").unwrap();

    let manager = SettingsManager::from_path(settings_path.clone()).unwrap();

    assert_eq!(manager.settings(), Settings::default());
    let backup = temp_dir.path().join("settings.toml.backup");
    assert_eq!(
        std::fs::read_to_string(backup).unwrap(),
        "this is = = not toml"
    );
}

#[test]
fn test_update_is_in_memory_until_saved() {
    let temp_dir = TempDir::new().unwrap();
    let settings_path = temp_dir.path().join("settings.toml");
    let manager = SettingsManager::from_path(settings_path.clone()).unwrap();

    manager.update_setting(|settings| settings.default_voice = VoiceName::Charon);
    assert_eq!(manager.settings().default_voice, VoiceName::Charon);

    let reloaded = SettingsManager::from_path(settings_path.clone()).unwrap();
    assert_eq!(reloaded.settings().default_voice, VoiceName::Puck);

    manager.save().unwrap();
    let reloaded = SettingsManager::from_path(settings_path).unwrap();
    assert_eq!(reloaded.settings().default_voice, VoiceName::Charon);
}

#[test]
fn test_infer_profile_from_default_settings() {
    let temp_dir = TempDir::new().unwrap();
    let path = SettingsManager::profile_path(temp_dir.path(), None);
    let manager = SettingsManager::from_path(path).unwrap();
    assert_eq!(manager.current_profile(), None);
}

#[test]
fn test_infer_profile_from_named_settings() {
    let temp_dir = TempDir::new().unwrap();
    let path = SettingsManager::profile_path(temp_dir.path(), Some("dev"));
    assert_eq!(path, temp_dir.path().join("settings_dev.toml"));

    let manager = SettingsManager::from_path(path).unwrap();
    assert_eq!(manager.current_profile(), Some("dev"));
}

#[test]
fn test_infer_profile_edge_names() {
    let temp_dir = TempDir::new().unwrap();
    for (file_name, expected) in [
        ("settings_.toml", None),
        ("settings_dev.json", None),
        ("config_dev.toml", None),
        ("settings_production.toml", Some("production")),
    ] {
        let manager = SettingsManager::from_path(temp_dir.path().join(file_name)).unwrap();
        assert_eq!(manager.current_profile(), expected, "file: {file_name}");
    }
}

#[test]
fn test_api_key_resolution_order() {
    let env: HashMap<&str, &str> = HashMap::from([("API_KEY", "from-api-key")]);
    let lookup = |name: &str| env.get(name).map(|v| v.to_string());

    let mut settings = Settings::default();
    assert_eq!(
        settings.resolve_api_key_with(lookup).as_deref(),
        Some("from-api-key")
    );

    let env_both: HashMap<&str, &str> =
        HashMap::from([("API_KEY", "from-api-key"), ("GEMINI_API_KEY", "from-gemini")]);
    let lookup_both = |name: &str| env_both.get(name).map(|v| v.to_string());
    assert_eq!(
        settings.resolve_api_key_with(lookup_both).as_deref(),
        Some("from-gemini")
    );

    settings.api_key = Some("configured".to_string());
    assert_eq!(
        settings.resolve_api_key_with(lookup).as_deref(),
        Some("configured")
    );

    settings.api_key = Some("   ".to_string());
    assert_eq!(settings.resolve_api_key_with(|_| None), None);
}
