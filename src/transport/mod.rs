//! Transport layer for talking to the Shopify Admin API over HTTP.
//!
//! This module provides types and traits for:
//! - Building HTTP requests ([`HttpRequest`])
//! - Handling HTTP responses ([`HttpResponse`])
//! - Abstracting HTTP clients ([`HttpClient`])
//! - Production HTTP client implementation ([`ReqwestClient`])
//! - Per-call cancellation and deadlines ([`Context`], [`CancelHandle`])

mod context;
mod error;
mod request;
mod reqwest_client;

#[cfg(test)]
mod context_tests;
#[cfg(test)]
mod reqwest_client_tests;

pub use context::{CancelHandle, Context};
pub use error::HttpError;
pub use request::{HttpClient, HttpRequest, HttpResponse};
pub use reqwest_client::ReqwestClient;
