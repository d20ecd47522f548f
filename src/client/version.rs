//! Admin API version tags.

use std::fmt;
use std::str::FromStr;

use super::ClientError;

/// A validated Admin API version, e.g. `2024-01` or `unstable`.
///
/// The version selects the path prefix `admin/api/{version}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ApiVersion(String);

impl ApiVersion {
    const UNSTABLE: &'static str = "unstable";

    /// Returns the `unstable` version.
    #[must_use]
    pub fn unstable() -> Self {
        Self(Self::UNSTABLE.to_string())
    }

    /// Returns the version string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn is_valid(s: &str) -> bool {
        if s == Self::UNSTABLE {
            return true;
        }

        let Some((year, month)) = s.split_once('-') else {
            return false;
        };

        year.len() == 4
            && month.len() == 2
            && year.bytes().all(|b| b.is_ascii_digit())
            && month.bytes().all(|b| b.is_ascii_digit())
            && month
                .parse::<u8>()
                .is_ok_and(|m| (1..=12).contains(&m))
    }
}

impl FromStr for ApiVersion {
    type Err = ClientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if Self::is_valid(s) {
            Ok(Self(s.to_string()))
        } else {
            Err(ClientError::InvalidApiVersion(s.to_string()))
        }
    }
}

impl fmt::Display for ApiVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
