//! shopify-rest: typed async client for the Shopify Admin REST API
//!
//! - [`transport`]: HTTP request/response values, the [`HttpClient`](transport::HttpClient)
//!   seam and cancellable call [`Context`](transport::Context)s
//! - [`client`]: the shop-scoped [`ShopClient`](client::ShopClient), credentials and errors
//! - [`resource`]: the generic CRUD service over any [`Resource`](resource::Resource)
//! - [`webhook`]: the webhook subscription resource and delivery verification
//! - [`config`]: command-line and TOML configuration for the `shopify-rest` binary

pub mod client;
pub mod config;
pub mod resource;
pub mod transport;
pub mod webhook;

#[cfg(test)]
mod testing;
