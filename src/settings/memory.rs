//! In-memory settings store.

use std::sync::{PoisonError, RwLock};

use super::{LoadResult, SettingsError, SettingsStore};

/// Keeps the webhook URL in memory only.
///
/// Used when saving is disabled and in tests. It can be seeded with the
/// result of loading another store so reads still see persisted values.
#[derive(Debug, Default)]
pub struct MemorySettingsStore {
    url: RwLock<Option<String>>,
}

impl MemorySettingsStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store that already holds `url`.
    #[must_use]
    pub fn with_url(url: impl Into<String>) -> Self {
        Self {
            url: RwLock::new(Some(url.into())),
        }
    }

    /// Creates a store holding whatever `loaded` carried, if anything.
    #[must_use]
    pub fn seeded(loaded: LoadResult) -> Self {
        Self {
            url: RwLock::new(loaded.into_url()),
        }
    }

    /// Returns the currently held URL.
    #[must_use]
    pub fn url(&self) -> Option<String> {
        self.url
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl SettingsStore for MemorySettingsStore {
    fn load(&self) -> LoadResult {
        self.url().map_or(LoadResult::NotFound, LoadResult::Loaded)
    }

    async fn save(&self, url: &str) -> Result<(), SettingsError> {
        *self.url.write().unwrap_or_else(PoisonError::into_inner) = Some(url.to_string());
        Ok(())
    }
}
