//! Default values for configuration options.

use std::path::PathBuf;

/// Default timeout for the probe and each send, in seconds.
pub const TIMEOUT_SECS: u64 = 5;

/// Default number of history entries shown by `/history`.
pub const HISTORY_DISPLAY: usize = 5;

/// Probe the webhook before accepting it, unless disabled.
pub const PROBE: bool = true;

/// Save the verified webhook URL, unless disabled.
pub const SAVE: bool = true;

/// Directory under the platform config dir holding the settings file.
pub const SETTINGS_DIR: &str = "hooksend";

/// File name of the settings file.
pub const SETTINGS_FILE: &str = "settings.toml";

/// Default settings file path, e.g. `~/.config/hooksend/settings.toml`.
///
/// `None` on platforms without a config directory.
#[must_use]
pub fn settings_file() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(SETTINGS_DIR).join(SETTINGS_FILE))
}
