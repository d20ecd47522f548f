//! Configuration layer for shopify-rest.
//!
//! This module provides:
//! - CLI argument parsing ([`Cli`], [`Command`], [`WebhookCommand`])
//! - TOML configuration file parsing ([`TomlConfig`])
//! - Validated configuration ([`ValidatedConfig`])
//! - Configuration file generation ([`write_default_config`])
//! - Default values ([`defaults`])
//!
//! # Priority
//!
//! Configuration values are resolved with the following priority (highest to lowest):
//!
//! 1. **Explicit CLI arguments** - Values explicitly passed via command line
//! 2. **TOML config file** - `--config <path>`, or the default file when it exists
//! 3. **Built-in defaults** - Hardcoded default values
//!
//! The shop name and credentials have no defaults and must come from one of
//! the first two sources.
//!
//! # Credentials
//!
//! Credentials are taken from a single source: if any of `--access-token`,
//! `--api-key` or `--password` is given, the file's credentials are ignored.
//! Within that source exactly one style must be present, either an access
//! token or an API key with its password.

mod cli;
pub mod defaults;
mod error;
mod toml;
mod validated;

#[cfg(test)]
mod validated_tests;

pub use cli::{Cli, Command, WebhookCommand, WebhookFields, WebhookFilterArgs};
pub use error::{ConfigError, field};
pub use toml::{HttpSection, ShopSection, TomlConfig, default_config_template};
pub use validated::{ValidatedConfig, write_default_config};
