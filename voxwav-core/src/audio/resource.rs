//! In-memory registry of playable WAV resources addressed by `blob:` URLs.
//!
//! A [`WavResource`] is the only owner of its registration. Releasing or
//! dropping it revokes the URL, so the decoded audio is freed as soon as the
//! handle goes away.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tracing::debug;
use uuid::Uuid;

use super::wav::WavContainer;

const URL_PREFIX: &str = "blob:voxwav/";

#[derive(Clone, Default)]
pub struct AudioResourceStore {
    inner: Arc<Mutex<HashMap<String, Arc<WavContainer>>>>,
}

impl AudioResourceStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a container under a fresh URL.
    pub fn publish(&self, container: WavContainer, duration: Duration) -> WavResource {
        let url = format!("{URL_PREFIX}{}", Uuid::new_v4());
        let container = Arc::new(container);

        self.lock().insert(url.clone(), container.clone());
        debug!(url = %url, bytes = container.len(), "Published WAV resource");

        WavResource {
            url,
            container,
            duration,
            store: self.clone(),
        }
    }

    /// Look up a live resource. Revoked URLs resolve to `None`.
    pub fn resolve(&self, url: &str) -> Option<Arc<WavContainer>> {
        self.lock().get(url).cloned()
    }

    pub fn contains(&self, url: &str) -> bool {
        self.lock().contains_key(url)
    }

    /// Number of live resources
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn revoke(&self, url: &str) {
        if self.lock().remove(url).is_some() {
            debug!(url = %url, "Revoked WAV resource");
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, Arc<WavContainer>>> {
        // A panic while holding the lock cannot leave the map half-updated
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// Playable/downloadable WAV handle - dropping revokes it (RAII)
pub struct WavResource {
    url: String,
    container: Arc<WavContainer>,
    duration: Duration,
    store: AudioResourceStore,
}

impl WavResource {
    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn container(&self) -> &Arc<WavContainer> {
        &self.container
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Revoke the URL now rather than at drop.
    pub fn release(self) {}
}

impl Drop for WavResource {
    fn drop(&mut self) {
        self.store.revoke(&self.url);
    }
}

impl std::fmt::Debug for WavResource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WavResource")
            .field("url", &self.url)
            .field("bytes", &self.container.len())
            .field("duration", &self.duration)
            .finish()
    }
}
