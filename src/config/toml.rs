//! TOML configuration file parsing.

use std::path::Path;

use serde::Deserialize;

use super::ConfigError;

/// Root configuration structure from TOML file.
///
/// All fields are optional so a partial file can be merged with CLI
/// arguments.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TomlConfig {
    /// Webhook configuration section
    #[serde(default)]
    pub webhook: WebhookSection,

    /// Settings file configuration section
    #[serde(default)]
    pub settings: SettingsSection,

    /// History display configuration section
    #[serde(default)]
    pub history: HistorySection,
}

/// Webhook configuration section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WebhookSection {
    /// Discord webhook URL
    pub url: Option<String>,

    /// Network timeout in seconds
    pub timeout: Option<u64>,

    /// Probe the URL before accepting it
    pub probe: Option<bool>,
}

/// Settings file configuration section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SettingsSection {
    /// Path to the settings file (`~` is expanded)
    pub file: Option<String>,

    /// Save the verified URL
    pub save: Option<bool>,
}

/// History display configuration section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HistorySection {
    /// Number of recent messages to display
    pub display: Option<usize>,
}

impl TomlConfig {
    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;

        Self::parse(&content)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(ConfigError::from)
    }
}

/// Generates a default configuration file with comments.
#[must_use]
pub fn default_config_template() -> String {
    r#"# hooksend configuration file

[webhook]
# Discord webhook URL (Server Settings > Integrations > Webhooks > Copy Webhook URL)
# When unset, the URL saved by the last successful verification is used.
# url = "https://discord.com/api/webhooks/ID/TOKEN"

# Network timeout in seconds for the probe and each send (default: 5)
timeout = 5

# Send a GET to the webhook before accepting it (default: true)
# probe = true

[settings]
# Where the last verified webhook URL is remembered
# (default: <config dir>/hooksend/settings.toml)
# file = "~/.config/hooksend/settings.toml"

# Remember the verified URL (default: true)
# save = true

[history]
# Number of recent messages shown by /history (default: 5)
display = 5
"#
    .to_string()
}
