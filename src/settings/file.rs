//! File-based settings persistence.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::{LoadResult, SettingsError, SettingsStore};

/// On-disk layout: a single `webhook_url` key under `[Settings]`.
#[derive(Debug, Default, Serialize, Deserialize)]
struct SettingsFile {
    #[serde(rename = "Settings", default)]
    settings: SettingsSection,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct SettingsSection {
    #[serde(skip_serializing_if = "Option::is_none")]
    webhook_url: Option<String>,
}

/// File-based implementation of [`SettingsStore`].
///
/// Stores the URL in a small TOML file:
///
/// ```toml
/// [Settings]
/// webhook_url = "https://discord.com/api/webhooks/..."
/// ```
///
/// # Atomic Writes
///
/// Writes go to `{path}.tmp` first and are then renamed over `{path}`, so a
/// crash mid-write never leaves a truncated file behind.
#[derive(Debug, Clone)]
pub struct FileSettingsStore {
    path: PathBuf,
}

impl FileSettingsStore {
    /// Creates a store backed by the file at `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the path to the settings file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn save_blocking(path: &Path, url: String) -> Result<(), SettingsError> {
        let file = SettingsFile {
            settings: SettingsSection {
                webhook_url: Some(url),
            },
        };
        let content = toml::to_string(&file).map_err(SettingsError::Serialize)?;

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(SettingsError::Write)?;
            }
        }

        // settings.toml -> settings.toml.tmp
        let temp_path = PathBuf::from(format!("{}.tmp", path.display()));

        std::fs::write(&temp_path, content).map_err(SettingsError::Write)?;
        std::fs::rename(&temp_path, path).map_err(SettingsError::Write)?;

        Ok(())
    }
}

impl SettingsStore for FileSettingsStore {
    fn load(&self) -> LoadResult {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(e) if e.kind() == ErrorKind::NotFound => return LoadResult::NotFound,
            Err(e) => {
                return LoadResult::Corrupted {
                    reason: format!("Failed to read file: {e}"),
                };
            }
        };

        match toml::from_str::<SettingsFile>(&content) {
            Ok(file) => file
                .settings
                .webhook_url
                .map_or(LoadResult::NotFound, LoadResult::Loaded),
            Err(e) => LoadResult::Corrupted {
                reason: format!("Invalid settings file: {e}"),
            },
        }
    }

    async fn save(&self, url: &str) -> Result<(), SettingsError> {
        let path = self.path.clone();
        let url = url.to_string();

        tokio::task::spawn_blocking(move || Self::save_blocking(&path, url))
            .await
            .map_err(|e| SettingsError::Write(std::io::Error::other(e)))?
    }
}
