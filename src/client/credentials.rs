//! Authentication for Admin API requests.

use std::fmt;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use http::header::{AUTHORIZATION, HeaderName, HeaderValue};

use super::ClientError;

/// Header carrying an app access token.
pub const ACCESS_TOKEN_HEADER: &str = "X-Shopify-Access-Token";

/// Credentials attached to every request.
///
/// `Debug` never prints secrets.
#[derive(Clone, PartialEq, Eq)]
pub enum Credentials {
    /// An app access token, sent as `X-Shopify-Access-Token`.
    AccessToken(String),
    /// Private-app API key and password, sent as HTTP basic auth.
    Basic {
        /// API key (basic auth user name)
        api_key: String,
        /// API password
        password: String,
    },
}

impl Credentials {
    /// Creates access-token credentials.
    #[must_use]
    pub fn access_token(token: impl Into<String>) -> Self {
        Self::AccessToken(token.into())
    }

    /// Creates private-app basic auth credentials.
    #[must_use]
    pub fn basic(api_key: impl Into<String>, password: impl Into<String>) -> Self {
        Self::Basic {
            api_key: api_key.into(),
            password: password.into(),
        }
    }

    /// Returns a short label for the credential kind, safe to log.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::AccessToken(_) => "access-token",
            Self::Basic { .. } => "basic",
        }
    }

    /// Builds the header that authenticates a request.
    ///
    /// The returned value is marked sensitive.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidHeader`] if the secret contains bytes
    /// that are not allowed in a header value.
    pub fn header(&self) -> Result<(HeaderName, HeaderValue), ClientError> {
        let (name, raw, label) = match self {
            Self::AccessToken(token) => (
                HeaderName::from_static("x-shopify-access-token"),
                token.clone(),
                ACCESS_TOKEN_HEADER,
            ),
            Self::Basic { api_key, password } => {
                let encoded = STANDARD.encode(format!("{api_key}:{password}"));
                (AUTHORIZATION, format!("Basic {encoded}"), "Authorization")
            }
        };

        let mut value =
            HeaderValue::from_str(&raw).map_err(|_| ClientError::InvalidHeader { name: label })?;
        value.set_sensitive(true);
        Ok((name, value))
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AccessToken(_) => f.debug_tuple("AccessToken").field(&"<redacted>").finish(),
            Self::Basic { api_key, .. } => f
                .debug_struct("Basic")
                .field("api_key", api_key)
                .field("password", &"<redacted>")
                .finish(),
        }
    }
}
