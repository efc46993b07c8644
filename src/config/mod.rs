//! Configuration layer for hooksend.
//!
//! This module provides:
//! - CLI argument parsing ([`Cli`], [`Command`])
//! - TOML configuration file parsing ([`TomlConfig`])
//! - Validated configuration ([`ValidatedConfig`])
//! - Configuration file generation ([`write_default_config`])
//! - Default values ([`defaults`])
//!
//! # Priority
//!
//! Configuration values are resolved with the following priority (highest to lowest):
//!
//! 1. **Explicit CLI arguments**
//! 2. **TOML config file** (`--config`)
//! 3. **Built-in defaults**
//!
//! The webhook URL has no default. When neither source provides one, the
//! URL saved in the settings file by an earlier run is used, and interactive
//! mode prompts for one.
//!
//! # Boolean Flag Semantics
//!
//! `--no-probe` and `--no-save` only disable. If either the CLI flag is set
//! or the file sets `webhook.probe = false` / `settings.save = false`, the
//! feature is off.
//!
//! # Config File vs Settings File
//!
//! The config file is written by the user and never modified. The settings
//! file holds the last verified webhook URL and is rewritten by the program
//! (see [`crate::settings`]).

mod cli;
pub mod defaults;
mod error;
mod toml;
mod validated;


pub use cli::{Cli, Command};
pub use error::ConfigError;
pub use toml::{TomlConfig, default_config_template};
pub use validated::{ValidatedConfig, write_default_config};
