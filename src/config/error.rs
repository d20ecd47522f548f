//! Error types for configuration parsing and validation.

use std::path::PathBuf;

use thiserror::Error;

/// Error type for configuration operations.
///
/// Covers errors from parsing, validation, and file operations.
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

    /// Missing required field that must be provided by CLI or config file.
    #[error("Missing required field: {field}. {hint}")]
    MissingRequired {
        /// Name of the missing field
        field: &'static str,
        /// Hint for how to provide the value
        hint: &'static str,
    },

    /// The shop name cannot be resolved to a URL.
    #[error("Invalid shop '{name}': {reason}")]
    InvalidShop {
        /// The shop name as given
        name: String,
        /// Reason for invalidity
        reason: String,
    },

    /// The API version is malformed.
    #[error("Invalid API version '{value}': expected YYYY-MM or 'unstable'")]
    InvalidApiVersion {
        /// The invalid value provided
        value: String,
    },

    /// Both an access token and an API key/password pair were given.
    #[error(
        "Conflicting credentials: use either an access token or an API key and password, not both"
    )]
    ConflictingCredentials,

    /// Invalid duration value (zero or too large).
    #[error("Invalid duration for {field}: {reason}")]
    InvalidDuration {
        /// Name of the field
        field: &'static str,
        /// Reason for invalidity
        reason: String,
    },

    /// Invalid header value.
    #[error("Invalid header value for '{name}': {reason}")]
    InvalidHeaderValue {
        /// The header name
        name: String,
        /// Reason for invalidity
        reason: String,
    },
}

/// Well-known field names for `MissingRequired` errors.
///
/// Use these constants for compile-time safety when matching field names.
pub mod field {
    /// The shop name field.
    pub const SHOP: &str = "shop";
    /// Either credential style.
    pub const CREDENTIALS: &str = "credentials";
    /// The private app API key.
    pub const API_KEY: &str = "api_key";
    /// The private app password.
    pub const PASSWORD: &str = "password";
}

impl ConfigError {
    /// Creates a `MissingRequired` error for a required field.
    #[must_use]
    pub const fn missing(field: &'static str, hint: &'static str) -> Self {
        Self::MissingRequired { field, hint }
    }
}
