//! Validated configuration after merging CLI and TOML sources.

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::discord::{WebhookEndpoint, validate_format};

use super::cli::Cli;
use super::defaults;
use super::error::{ConfigError, field};
use super::toml::TomlConfig;

/// Fully validated configuration ready for use by the application.
///
/// # Construction
///
/// Use [`ValidatedConfig::from_raw`] to create from CLI args and optional TOML config.
#[derive(Debug)]
pub struct ValidatedConfig {
    /// Webhook URL given on the command line or in the config file
    pub url: Option<WebhookEndpoint>,

    /// Timeout for the probe and each send
    pub timeout: Duration,

    /// Whether to probe the URL before accepting it
    pub probe: bool,

    /// Settings file location. `None` when no location could be determined.
    pub settings_file: Option<PathBuf>,

    /// Whether to write the verified URL to the settings file
    pub save: bool,

    /// Number of history entries shown by `/history`
    pub history_display: usize,

    /// Verbose logging enabled
    pub verbose: bool,
}

impl fmt::Display for ValidatedConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let url_str = self
            .url
            .as_ref()
            .map_or_else(|| "saved".to_string(), WebhookEndpoint::redacted);
        let settings_str = self
            .settings_file
            .as_ref()
            .map_or_else(|| "none".to_string(), |p| p.display().to_string());

        write!(
            f,
            "Config {{ url: {url_str}, timeout: {}s, probe: {}, settings_file: {settings_str}, \
             save: {}, history: {} }}",
            self.timeout.as_secs(),
            self.probe,
            self.save,
            self.history_display,
        )
    }
}

impl ValidatedConfig {
    /// Creates a validated configuration from CLI arguments and optional TOML config.
    ///
    /// CLI arguments take precedence over TOML config values.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The webhook URL is not a Discord webhook URL
    /// - The timeout is zero
    /// - The history display count is zero
    pub fn from_raw(cli: &Cli, toml: Option<&TomlConfig>) -> Result<Self, ConfigError> {
        let url = Self::resolve_url(cli, toml)?;
        let timeout = Self::resolve_timeout(cli, toml)?;
        let history_display = Self::resolve_history_display(cli, toml)?;

        // Disable flags win from either source
        let probe = !cli.no_probe && toml.and_then(|t| t.webhook.probe).unwrap_or(defaults::PROBE);
        let save = !cli.no_save && toml.and_then(|t| t.settings.save).unwrap_or(defaults::SAVE);

        Ok(Self {
            url,
            timeout,
            probe,
            settings_file: Self::resolve_settings_file(cli, toml),
            save,
            history_display,
            verbose: cli.verbose,
        })
    }

    /// Loads and merges configuration from CLI and optional config file.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The config file cannot be read or parsed
    /// - The merged configuration is invalid
    pub fn load(cli: &Cli) -> Result<Self, ConfigError> {
        let toml = if let Some(ref path) = cli.config {
            Some(TomlConfig::load(path)?)
        } else {
            None
        };

        Self::from_raw(cli, toml.as_ref())
    }

    fn resolve_url(
        cli: &Cli,
        toml: Option<&TomlConfig>,
    ) -> Result<Option<WebhookEndpoint>, ConfigError> {
        cli.url
            .as_deref()
            .or_else(|| toml.and_then(|t| t.webhook.url.as_deref()))
            .map(validate_format)
            .transpose()
            .map_err(ConfigError::from)
    }

    fn resolve_timeout(cli: &Cli, toml: Option<&TomlConfig>) -> Result<Duration, ConfigError> {
        let seconds = cli
            .timeout
            .or_else(|| toml.and_then(|t| t.webhook.timeout))
            .unwrap_or(defaults::TIMEOUT_SECS);

        if seconds == 0 {
            return Err(ConfigError::InvalidDuration {
                field: field::TIMEOUT,
                reason: "must be greater than 0".to_string(),
            });
        }

        Ok(Duration::from_secs(seconds))
    }

    fn resolve_history_display(
        cli: &Cli,
        toml: Option<&TomlConfig>,
    ) -> Result<usize, ConfigError> {
        let display = cli
            .history
            .or_else(|| toml.and_then(|t| t.history.display))
            .unwrap_or(defaults::HISTORY_DISPLAY);

        if display == 0 {
            return Err(ConfigError::InvalidValue {
                field: field::HISTORY_DISPLAY,
                reason: "must be greater than 0".to_string(),
            });
        }

        Ok(display)
    }

    fn resolve_settings_file(cli: &Cli, toml: Option<&TomlConfig>) -> Option<PathBuf> {
        if let Some(ref path) = cli.settings_file {
            return Some(path.clone());
        }

        toml.and_then(|t| t.settings.file.as_deref())
            .map(expand_tilde)
            .or_else(defaults::settings_file)
    }
}

/// Writes the default configuration template to a file.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn write_default_config(path: &Path) -> Result<(), ConfigError> {
    let template = super::toml::default_config_template();
    std::fs::write(path, template).map_err(|e| ConfigError::FileWrite {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Expands a leading `~/` to the home directory.
fn expand_tilde(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    PathBuf::from(path)
}
