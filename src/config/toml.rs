//! TOML configuration file parsing.
//!
//! Defines the structure of the configuration file with serde.

use std::path::Path;

use serde::Deserialize;

use super::ConfigError;

/// Root configuration structure from TOML file.
///
/// All fields are optional to allow partial configuration
/// that can be merged with CLI arguments.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TomlConfig {
    /// Shop and credentials section
    #[serde(default)]
    pub shop: ShopSection,

    /// HTTP client section
    #[serde(default)]
    pub http: HttpSection,
}

/// Shop configuration section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ShopSection {
    /// Shop name or domain
    pub name: Option<String>,

    /// API version, `YYYY-MM` or `unstable`
    pub api_version: Option<String>,

    /// App access token
    pub access_token: Option<String>,

    /// Private app API key
    pub api_key: Option<String>,

    /// Private app password
    pub password: Option<String>,
}

/// HTTP client configuration section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HttpSection {
    /// Request timeout in seconds
    pub timeout: Option<u64>,

    /// `User-Agent` header
    pub user_agent: Option<String>,
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
    r#"# shopify-rest configuration file
#
# Explicit command-line flags override these values.

[shop]
# Shop name or domain (required)
# name = "fooshop"

# API version: "YYYY-MM" or "unstable".
# Leave unset to use the unversioned /admin paths.
# api_version = "2024-01"

# Credentials (required): either an app access token...
# access_token = "shpat_..."

# ...or a private app API key and password
# api_key = "..."
# password = "..."

[http]
# Request timeout in seconds (default: 30)
timeout = 30

# User-Agent header (default: shopify-rest/<version>)
# user_agent = "my-app/1.0"
"#
    .to_string()
}
