//! Error types for shop client operations.

use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

use crate::transport::{HttpError, HttpResponse};

/// The resource operation a request was made for.
///
/// Carried by errors so a failure can be traced back to the call site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// Fetch a collection.
    List,
    /// Fetch a single record.
    Get,
    /// Fetch a record count.
    Count,
    /// Create a record.
    Create,
    /// Update a record.
    Update,
    /// Delete a record.
    Delete,
}

impl Operation {
    /// Returns the lowercase operation name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::List => "list",
            Self::Get => "get",
            Self::Count => "count",
            Self::Create => "create",
            Self::Update => "update",
            Self::Delete => "delete",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error type for shop client operations.
#[derive(Debug, Error)]
pub enum ClientError {
    /// No response was received (network failure, timeout, cancellation).
    #[error("{operation} {resource}: {source}")]
    Transport {
        /// Operation being performed
        operation: Operation,
        /// Resource name
        resource: &'static str,
        /// Underlying transport error
        #[source]
        source: HttpError,
    },

    /// A 2xx response body did not have the expected shape.
    #[error("{operation} {resource}: unexpected response body: {source}")]
    Decode {
        /// Operation being performed
        operation: Operation,
        /// Resource name
        resource: &'static str,
        /// Underlying JSON error
        #[source]
        source: serde_json::Error,
    },

    /// The request payload could not be serialized.
    #[error("encoding {resource} payload: {source}")]
    Encode {
        /// Resource name
        resource: &'static str,
        /// Underlying JSON error
        #[source]
        source: serde_json::Error,
    },

    /// The API answered with a non-2xx status.
    #[error("{operation} {resource}: {source}")]
    Api {
        /// Operation being performed
        operation: Operation,
        /// Resource name
        resource: &'static str,
        /// Status and upstream error payload
        #[source]
        source: ApiError,
    },

    /// An update was attempted on a record without an identifier.
    #[error("{resource} update requires a record id")]
    MissingId {
        /// Resource name
        resource: &'static str,
    },

    /// The shop name cannot be turned into a base URL.
    #[error("Invalid shop name '{name}': {reason}")]
    InvalidShop {
        /// The shop name as given
        name: String,
        /// Reason for invalidity
        reason: String,
    },

    /// The API version is not `YYYY-MM` or `unstable`.
    #[error("Invalid API version '{0}': expected YYYY-MM or 'unstable'")]
    InvalidApiVersion(String),

    /// A credential or user agent cannot be sent as an HTTP header.
    #[error("Invalid header value for '{name}'")]
    InvalidHeader {
        /// Header name
        name: &'static str,
    },
}

impl ClientError {
    /// Returns the API error, if the server answered with a non-2xx status.
    #[must_use]
    pub const fn api_error(&self) -> Option<&ApiError> {
        match self {
            Self::Api { source, .. } => Some(source),
            _ => None,
        }
    }

    /// Returns true for a 404 response.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        self.api_error().is_some_and(ApiError::is_not_found)
    }

    /// Returns true if the call was aborted by its context.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Transport { source, .. } if source.is_cancellation())
    }
}

/// A non-2xx response from the Admin API.
///
/// `message` is a single human-readable line; `errors` holds the individual
/// messages when the body lists several (field errors are rendered as
/// `"field: message"`).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("API error {status}: {message}")]
pub struct ApiError {
    /// HTTP status code
    pub status: http::StatusCode,
    /// Summary message
    pub message: String,
    /// Individual error messages from the body
    pub errors: Vec<String>,
    /// `Retry-After` from a 429 response; informational only
    pub retry_after: Option<Duration>,
}

/// Error body shapes returned by the Admin API.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    errors: Option<serde_json::Value>,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    error_description: Option<String>,
}

impl ApiError {
    /// Builds an API error from a non-2xx response.
    #[must_use]
    pub fn from_response(response: &HttpResponse) -> Self {
        let status = response.status;
        let body = serde_json::from_slice::<ErrorBody>(&response.body).ok();
        let is_json = body.is_some();
        let errors = body.map(ErrorBody::into_messages).unwrap_or_default();

        let message = if !errors.is_empty() {
            errors.join(", ")
        } else if is_json {
            canonical_reason(response.status)
        } else {
            fallback_message(response)
        };

        let retry_after = if status == http::StatusCode::TOO_MANY_REQUESTS {
            response
                .header_str(http::header::RETRY_AFTER)
                .and_then(parse_retry_after)
        } else {
            None
        };

        Self {
            status,
            message,
            errors,
            retry_after,
        }
    }

    /// Returns true for a 404 response.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        self.status == http::StatusCode::NOT_FOUND
    }

    /// Returns true for a 429 response.
    #[must_use]
    pub fn is_rate_limited(&self) -> bool {
        self.status == http::StatusCode::TOO_MANY_REQUESTS
    }
}

impl ErrorBody {
    fn into_messages(self) -> Vec<String> {
        if let Some(errors) = self.errors {
            return flatten_errors(errors);
        }

        match (self.error, self.error_description) {
            (Some(error), Some(description)) => vec![format!("{error}: {description}")],
            (Some(error), None) => vec![error],
            (None, Some(description)) => vec![description],
            (None, None) => Vec::new(),
        }
    }
}

fn flatten_errors(errors: serde_json::Value) -> Vec<String> {
    use serde_json::Value;

    match errors {
        Value::String(s) => vec![s],
        Value::Array(items) => items.into_iter().map(value_text).collect(),
        Value::Object(fields) => {
            // Sorted by field name so messages are stable.
            let fields: BTreeMap<String, Value> = fields.into_iter().collect();
            fields
                .into_iter()
                .flat_map(|(field, value)| {
                    let messages: Vec<String> = match value {
                        Value::Array(items) => items.into_iter().map(value_text).collect(),
                        other => vec![value_text(other)],
                    };
                    messages
                        .into_iter()
                        .map(move |message| format!("{field}: {message}"))
                })
                .collect()
        }
        Value::Null => Vec::new(),
        other => vec![other.to_string()],
    }
}

fn value_text(value: serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s,
        other => other.to_string(),
    }
}

fn fallback_message(response: &HttpResponse) -> String {
    match response.body_text().map(str::trim) {
        Some(text) if !text.is_empty() => text.to_string(),
        _ => canonical_reason(response.status),
    }
}

fn canonical_reason(status: http::StatusCode) -> String {
    status
        .canonical_reason()
        .unwrap_or("unknown error")
        .to_string()
}

fn parse_retry_after(value: &str) -> Option<Duration> {
    let secs: f64 = value.trim().parse().ok()?;
    Duration::try_from_secs_f64(secs).ok()
}
