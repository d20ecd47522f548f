//! Validated configuration after merging CLI and TOML sources.
//!
//! This module contains the final, validated configuration that is used
//! by the application. All validation is performed during construction.

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use http::header::HeaderValue;
use url::Url;

use crate::client::{ApiVersion, ClientError, Credentials, shop_base_url};

use super::cli::Cli;
use super::defaults;
use super::error::{ConfigError, field};
use super::toml::TomlConfig;

/// Fully validated configuration ready for use by the application.
///
/// # Construction
///
/// Use [`ValidatedConfig::from_raw`] to create from CLI args and optional TOML config.
/// The function validates all inputs and returns errors for invalid configurations.
#[derive(Debug)]
pub struct ValidatedConfig {
    /// Resolved shop base URL (required)
    pub shop_url: Url,

    /// Pinned API version; unversioned paths when `None`
    pub api_version: Option<ApiVersion>,

    /// Request credentials (required)
    pub credentials: Credentials,

    /// Per-request timeout
    pub timeout: Duration,

    /// `User-Agent` header
    pub user_agent: String,

    /// Verbose logging enabled
    pub verbose: bool,
}

impl fmt::Display for ValidatedConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let version = self.api_version.as_ref().map_or("unversioned", ApiVersion::as_str);

        write!(
            f,
            "Config {{ shop: {}, api_version: {}, credentials: {}, timeout: {}s, user_agent: {} }}",
            self.shop_url,
            version,
            self.credentials.kind(),
            self.timeout.as_secs(),
            self.user_agent,
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
    /// - Required fields are missing (`shop`, credentials)
    /// - The shop name or API version is malformed
    /// - Both credential styles are given, or only half of a key/password pair
    /// - The timeout is zero
    /// - The user agent is not a valid header value
    pub fn from_raw(cli: &Cli, toml: Option<&TomlConfig>) -> Result<Self, ConfigError> {
        let shop_url = Self::resolve_shop(cli, toml)?;
        let api_version = Self::resolve_api_version(cli, toml)?;
        let credentials = Self::resolve_credentials(cli, toml)?;
        let timeout = Self::resolve_timeout(cli, toml)?;
        let user_agent = Self::resolve_user_agent(toml)?;

        Ok(Self {
            shop_url,
            api_version,
            credentials,
            timeout,
            user_agent,
            verbose: cli.verbose,
        })
    }

    /// Loads and merges configuration from CLI and optional config file.
    ///
    /// If `cli.config` is set, loads the TOML file from that path (a leading
    /// `~` is expanded). Otherwise the default config file is used when it
    /// exists.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The config file cannot be read or parsed
    /// - The merged configuration is invalid
    pub fn load(cli: &Cli) -> Result<Self, ConfigError> {
        let path = match cli.config {
            Some(ref path) => Some(expand_tilde(path)),
            None => defaults::config_path().filter(|p| p.is_file()),
        };

        let toml = match path {
            Some(path) => {
                tracing::debug!("Loading config file {}", path.display());
                Some(TomlConfig::load(&path)?)
            }
            None => None,
        };

        Self::from_raw(cli, toml.as_ref())
    }

    fn resolve_shop(cli: &Cli, toml: Option<&TomlConfig>) -> Result<Url, ConfigError> {
        // CLI takes precedence
        let name = cli
            .shop
            .as_deref()
            .or_else(|| toml.and_then(|t| t.shop.name.as_deref()))
            .ok_or_else(|| {
                ConfigError::missing(field::SHOP, "Use --shop or set shop.name in config file")
            })?;

        shop_base_url(name).map_err(|e| match e {
            ClientError::InvalidShop { name, reason } => ConfigError::InvalidShop { name, reason },
            other => ConfigError::InvalidShop {
                name: name.to_string(),
                reason: other.to_string(),
            },
        })
    }

    fn resolve_api_version(
        cli: &Cli,
        toml: Option<&TomlConfig>,
    ) -> Result<Option<ApiVersion>, ConfigError> {
        let value = cli
            .api_version
            .as_deref()
            .or_else(|| toml.and_then(|t| t.shop.api_version.as_deref()));

        value
            .map(|v| {
                v.parse::<ApiVersion>()
                    .map_err(|_| ConfigError::InvalidApiVersion {
                        value: v.to_string(),
                    })
            })
            .transpose()
    }

    fn resolve_credentials(cli: &Cli, toml: Option<&TomlConfig>) -> Result<Credentials, ConfigError> {
        // Credentials come from one source as a unit: any credential flag
        // on the command line replaces the file's credentials entirely.
        let cli_given =
            cli.access_token.is_some() || cli.api_key.is_some() || cli.password.is_some();

        let (token, api_key, password) = if cli_given {
            (
                cli.access_token.as_deref(),
                cli.api_key.as_deref(),
                cli.password.as_deref(),
            )
        } else if let Some(toml) = toml {
            (
                toml.shop.access_token.as_deref(),
                toml.shop.api_key.as_deref(),
                toml.shop.password.as_deref(),
            )
        } else {
            (None, None, None)
        };

        match (token, api_key, password) {
            (Some(_), Some(_), _) | (Some(_), _, Some(_)) => {
                Err(ConfigError::ConflictingCredentials)
            }
            (Some(token), None, None) => Ok(Credentials::access_token(token)),
            (None, Some(key), Some(password)) => Ok(Credentials::basic(key, password)),
            (None, Some(_), None) => Err(ConfigError::missing(
                field::PASSWORD,
                "An API key needs --password or shop.password in config file",
            )),
            (None, None, Some(_)) => Err(ConfigError::missing(
                field::API_KEY,
                "A password needs --api-key or shop.api_key in config file",
            )),
            (None, None, None) => Err(ConfigError::missing(
                field::CREDENTIALS,
                "Use --access-token (or --api-key and --password) or set them in the [shop] section",
            )),
        }
    }

    fn resolve_timeout(cli: &Cli, toml: Option<&TomlConfig>) -> Result<Duration, ConfigError> {
        // Priority: CLI explicit > TOML > default
        let seconds = cli
            .timeout
            .or_else(|| toml.and_then(|t| t.http.timeout))
            .unwrap_or(defaults::TIMEOUT_SECS);

        if seconds == 0 {
            return Err(ConfigError::InvalidDuration {
                field: "timeout",
                reason: "must be greater than 0".to_string(),
            });
        }

        Ok(Duration::from_secs(seconds))
    }

    fn resolve_user_agent(toml: Option<&TomlConfig>) -> Result<String, ConfigError> {
        let user_agent = toml
            .and_then(|t| t.http.user_agent.as_deref())
            .unwrap_or_else(|| defaults::user_agent());

        HeaderValue::from_str(user_agent).map_err(|e| ConfigError::InvalidHeaderValue {
            name: "User-Agent".to_string(),
            reason: e.to_string(),
        })?;

        Ok(user_agent.to_string())
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

// Helper functions

fn expand_tilde(path: &Path) -> PathBuf {
    match (path.strip_prefix("~"), dirs::home_dir()) {
        (Ok(rest), Some(home)) => home.join(rest),
        _ => path.to_path_buf(),
    }
}
