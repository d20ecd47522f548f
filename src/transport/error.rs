//! Error types for HTTP operations.

use thiserror::Error;

/// Error type for transport-level failures.
///
/// Covers everything that prevents a response from being received at all.
/// A response with a non-2xx status is *not* a transport error; it is
/// surfaced by the shop client as an API error instead.
#[derive(Debug, Error)]
pub enum HttpError {
    /// Network connection failed.
    ///
    /// This includes DNS resolution failures, connection refused,
    /// TLS failures, and errors while reading the response body.
    #[error("Connection error: {0}")]
    Connection(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Request timed out inside the HTTP library.
    #[error("Request timed out")]
    Timeout,

    /// The provided URL is invalid.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// The call's [`Context`](super::Context) was cancelled before a response arrived.
    #[error("Request cancelled")]
    Cancelled,

    /// The call's [`Context`](super::Context) deadline passed before a response arrived.
    #[error("Request deadline exceeded")]
    DeadlineExceeded,
}

impl HttpError {
    /// Returns true if the call was aborted by its context rather than by the network.
    #[must_use]
    pub const fn is_cancellation(&self) -> bool {
        matches!(self, Self::Cancelled | Self::DeadlineExceeded)
    }
}
