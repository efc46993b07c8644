//! Persistence of the webhook URL between runs.
//!
//! The session talks to storage only through [`SettingsStore`], so it can be
//! exercised with [`MemorySettingsStore`] instead of the real file.

mod file;
mod memory;

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;

pub use file::FileSettingsStore;
pub use memory::MemorySettingsStore;

use std::io;

use thiserror::Error;

/// Result of loading the saved webhook URL.
///
/// Explicitly models all valid states:
/// - A URL was saved previously
/// - Nothing is saved (first run)
/// - Settings exist but could not be read
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadResult {
    /// A previously saved webhook URL.
    Loaded(String),

    /// No URL has been saved yet.
    NotFound,

    /// Settings exist but could not be parsed.
    /// The next successful save overwrites them.
    Corrupted {
        /// Reason for corruption (for logging).
        reason: String,
    },
}

impl LoadResult {
    /// Returns the saved URL, or `None` for `NotFound`/`Corrupted`.
    #[must_use]
    pub fn into_url(self) -> Option<String> {
        match self {
            Self::Loaded(url) => Some(url),
            Self::NotFound | Self::Corrupted { .. } => None,
        }
    }

    /// Returns `true` if a URL was loaded.
    #[must_use]
    pub const fn is_loaded(&self) -> bool {
        matches!(self, Self::Loaded(_))
    }
}

/// Errors that can occur while saving settings.
///
/// Read-side problems are [`LoadResult`] variants instead.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// Failed to write the settings file.
    #[error("Failed to write settings file: {0}")]
    Write(#[source] io::Error),

    /// Failed to serialize the settings.
    #[error("Failed to serialize settings: {0}")]
    Serialize(#[source] toml::ser::Error),
}

/// Key-value storage for the webhook URL.
pub trait SettingsStore: Send + Sync {
    /// Loads the saved webhook URL.
    fn load(&self) -> LoadResult;

    /// Saves the webhook URL, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the value cannot be written.
    fn save(
        &self,
        url: &str,
    ) -> impl std::future::Future<Output = Result<(), SettingsError>> + Send;
}

impl<T: SettingsStore> SettingsStore for std::sync::Arc<T> {
    fn load(&self) -> LoadResult {
        (**self).load()
    }

    fn save(
        &self,
        url: &str,
    ) -> impl std::future::Future<Output = Result<(), SettingsError>> + Send {
        (**self).save(url)
    }
}
