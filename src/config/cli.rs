//! CLI argument parsing using clap.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// hooksend: post messages to a Discord channel through a webhook
///
/// Without a subcommand, starts an interactive prompt.
#[derive(Debug, Parser)]
#[command(name = "hooksend")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Discord webhook URL (overrides the config and saved settings)
    #[arg(long, global = true)]
    pub url: Option<String>,

    /// Path to configuration file
    #[arg(long, short, global = true)]
    pub config: Option<PathBuf>,

    /// Path to the settings file that remembers the last verified URL
    #[arg(long = "settings-file", global = true)]
    pub settings_file: Option<PathBuf>,

    /// Network timeout in seconds for the probe and each send
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    /// Accept the webhook URL without probing it
    #[arg(long = "no-probe", global = true)]
    pub no_probe: bool,

    /// Do not write the verified URL to the settings file
    #[arg(long = "no-save", global = true)]
    pub no_save: bool,

    /// Number of recent messages shown by /history
    #[arg(long = "history", value_name = "N", global = true)]
    pub history: Option<usize>,

    /// Enable verbose logging
    #[arg(long, short, global = true)]
    pub verbose: bool,
}

/// Subcommands for hooksend
#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Generate a default configuration file
    Init {
        /// Output path for the configuration file
        #[arg(long, short, default_value = "hooksend.toml")]
        output: PathBuf,
    },

    /// Validate and probe the webhook URL, then save it
    Verify,

    /// Send each argument as a separate message, in order
    Send {
        /// Message text
        #[arg(required = true, value_name = "MESSAGE")]
        messages: Vec<String>,
    },

    /// Read messages from standard input, one per line (the default)
    Interactive,
}

impl Cli {
    /// Parses CLI arguments from the command line.
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Parses CLI arguments from an iterator (useful for testing).
    pub fn parse_from_iter<I, T>(iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Self::parse_from(iter)
    }

    /// Returns the subcommand to run, defaulting to [`Command::Interactive`].
    #[must_use]
    pub fn command(&self) -> Command {
        self.command.clone().unwrap_or(Command::Interactive)
    }
}
