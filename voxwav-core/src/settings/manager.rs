use crate::settings::config::Settings;
use anyhow::{Context, Result};
use std::fs;
use std::ops::DerefMut;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::warn;

/// Settings for one process. In-memory updates stay local to the process
/// until saved; saved settings are picked up by later runs.
#[derive(Clone)]
pub struct SettingsManager {
    settings_path: PathBuf,
    inner: Arc<Mutex<Settings>>,
}

impl SettingsManager {
    /// Create a new settings manager with default settings location
    pub fn new() -> Result<Self> {
        Self::from_profile(None)
    }

    /// Load `~/.voxwav/settings_<profile>.toml`, or `settings.toml` when no
    /// profile is given.
    pub fn from_profile(profile: Option<&str>) -> Result<Self> {
        let dir = Self::default_settings_dir()?;
        Self::from_path(Self::profile_path(&dir, profile))
    }

    /// Create a settings manager from a specific path
    pub fn from_path(path: PathBuf) -> Result<Self> {
        // Ensure default settings file exists if it doesn't
        if !path.exists() {
            Self::write_settings(&path, &Settings::default())
                .context("Failed to write default settings")?;
        }

        let loaded = Self::load_from_file_with_backup(&path)?;

        Ok(Self {
            settings_path: path,
            inner: Arc::new(Mutex::new(loaded)),
        })
    }

    /// Get the default settings directory (~/.voxwav)
    pub fn default_settings_dir() -> Result<PathBuf> {
        let home = dirs::home_dir().context("Failed to get home directory")?;
        Ok(home.join(".voxwav"))
    }

    pub fn profile_path(dir: &Path, profile: Option<&str>) -> PathBuf {
        match profile.filter(|name| !name.is_empty()) {
            Some(name) => dir.join(format!("settings_{name}.toml")),
            None => dir.join("settings.toml"),
        }
    }

    /// Profile name inferred from a `settings_<name>.toml` file name
    pub fn current_profile(&self) -> Option<&str> {
        let file_name = self.settings_path.file_name()?.to_str()?;
        let name = file_name
            .strip_prefix("settings_")?
            .strip_suffix(".toml")?;
        (!name.is_empty()).then_some(name)
    }

    /// Load settings from a TOML file with backup on parse failure
    fn load_from_file_with_backup(path: &Path) -> Result<Settings> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings from {path:?}"))?;

        match toml::from_str(&contents) {
            Ok(settings) => Ok(settings),
            Err(e) => {
                // Move corrupted file to backup
                let backup_path = path.with_extension("toml.backup");
                warn!(?path, ?backup_path, error = %e, "Settings file is corrupt; restoring defaults");
                fs::rename(path, &backup_path).with_context(|| {
                    format!("Failed to backup corrupted settings to {backup_path:?}")
                })?;

                let default_settings = Settings::default();
                Self::write_settings(path, &default_settings)?;
                Ok(default_settings)
            }
        }
    }

    fn write_settings(path: &Path, settings: &Settings) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {parent:?}"))?;
        }

        let contents = toml::to_string_pretty(settings).context("Failed to serialize settings")?;
        fs::write(path, contents).with_context(|| format!("Failed to write settings to {path:?}"))
    }

    fn lock(&self) -> MutexGuard<'_, Settings> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Get the in-memory settings
    pub fn settings(&self) -> Settings {
        self.lock().clone()
    }

    /// Update in-memory settings with a closure. Note: settings are not saved to disk
    pub fn update_setting<F>(&self, updater: F)
    where
        F: FnOnce(&mut Settings),
    {
        let mut guard = self.lock();
        updater(guard.deref_mut());
    }

    /// Save provided settings
    pub fn save_settings(&self, settings: Settings) -> Result<()> {
        Self::write_settings(&self.settings_path, &settings)?;
        *self.lock() = settings;
        Ok(())
    }

    /// Explicitly persist in-memory settings to disk
    pub fn save(&self) -> Result<()> {
        self.save_settings(self.settings())
    }

    /// Get the settings file path
    pub fn path(&self) -> &Path {
        &self.settings_path
    }
}
