//! Settings store for the selected location
//!
//! The single source of truth for which location downstream fetchers act on.
//! There is no ambient global: the store is created at startup and handed to
//! the handlers through axum state. Writers are the geo-seeding step (once,
//! when no city is chosen yet) and the location-picker flow; every write
//! advances an epoch counter that lets fetch results from superseded
//! locations be recognized and discarded.

use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::RwLock;

use crate::models::{Geo, Settings};

/// Shared settings state with a change epoch
#[derive(Debug, Default)]
pub struct SettingsStore {
    inner: RwLock<Settings>,
    epoch: AtomicU64,
}

impl SettingsStore {
    /// Create a store with empty settings (no city chosen)
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current epoch; advances on every settings replacement
    pub fn epoch(&self) -> u64 {
        self.epoch.load(Ordering::Acquire)
    }

    /// Snapshot the settings together with the epoch they were read at
    pub async fn snapshot(&self) -> (Settings, u64) {
        let guard = self.inner.read().await;
        (guard.clone(), self.epoch.load(Ordering::Acquire))
    }

    /// Seed the settings from coarse geo data if no city is chosen yet.
    ///
    /// Returns whether the seed was applied. A store that already holds a
    /// city is left untouched, so a reload never overrides a picked location.
    pub async fn seed_from_geo(&self, geo: Geo) -> bool {
        if geo.city.is_empty() {
            return false;
        }
        let mut guard = self.inner.write().await;
        if guard.has_city() {
            return false;
        }
        *guard = Settings::from_geo(geo);
        self.epoch.fetch_add(1, Ordering::AcqRel);
        tracing::info!("Seeded location from geo: {}", guard.city);
        true
    }

    /// Replace the settings wholesale; the location-picker write path
    pub async fn select_location(&self, settings: Settings) {
        let mut guard = self.inner.write().await;
        *guard = settings;
        self.epoch.fetch_add(1, Ordering::AcqRel);
        tracing::info!(
            "Selected location: {} ({})",
            guard.city,
            guard.timezone.as_deref().unwrap_or("timezone unresolved")
        );
    }
}
