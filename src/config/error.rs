//! Error types for configuration parsing and validation.

use std::path::PathBuf;

use thiserror::Error;

use crate::discord::FormatError;

/// Error type for configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read the configuration file.
    #[error("Failed to read config file '{}': {source}", path.display())]
    FileRead {
        /// Path to the config file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse the TOML configuration.
    #[error("Failed to parse TOML config: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// Failed to write configuration file (for init command).
    #[error("Failed to write config file '{}': {source}", path.display())]
    FileWrite {
        /// Path to the config file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The configured webhook URL is not a Discord webhook URL.
    #[error("Invalid webhook URL: {0}")]
    InvalidWebhookUrl(#[from] FormatError),

    /// Invalid duration value (zero).
    #[error("Invalid duration for {field}: {reason}")]
    InvalidDuration {
        /// Name of the field
        field: &'static str,
        /// Reason for invalidity
        reason: String,
    },

    /// Invalid numeric value.
    #[error("Invalid value for {field}: {reason}")]
    InvalidValue {
        /// Name of the field
        field: &'static str,
        /// Reason for invalidity
        reason: String,
    },
}

/// Well-known field names used in errors.
pub mod field {
    /// The network timeout.
    pub const TIMEOUT: &str = "timeout";
    /// The number of history entries to display.
    pub const HISTORY_DISPLAY: &str = "history.display";
}
