//! Default values for configuration options.
//!
//! Centralized constants to avoid magic numbers scattered across the codebase.

use std::path::PathBuf;
use std::time::Duration;

/// Default request timeout in seconds.
pub const TIMEOUT_SECS: u64 = 30;

/// Application directory under the platform config dir.
pub const APP_DIR: &str = "shopify-rest";

/// Config file name inside [`APP_DIR`].
pub const CONFIG_FILE: &str = "config.toml";

/// Default request timeout as Duration.
#[must_use]
pub const fn timeout() -> Duration {
    Duration::from_secs(TIMEOUT_SECS)
}

/// Default `User-Agent` header.
#[must_use]
pub const fn user_agent() -> &'static str {
    crate::client::DEFAULT_USER_AGENT
}

/// Default config file location, e.g. `~/.config/shopify-rest/config.toml`.
///
/// Returns `None` if the platform has no config directory.
#[must_use]
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR).join(CONFIG_FILE))
}
