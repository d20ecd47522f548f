//! Tests for `ReqwestClient`.
//!
//! These cover construction only; request behaviour is exercised through
//! the mock transport in the client and resource tests.

use std::time::Duration;

use super::*;

#[test]
fn new_and_default_construct() {
    let a = ReqwestClient::new();
    let b = ReqwestClient::default();

    assert!(format!("{a:?}").contains("ReqwestClient"));
    assert!(format!("{b:?}").contains("ReqwestClient"));
}

#[test]
fn with_timeout_builds_client() {
    let client = ReqwestClient::with_timeout(Duration::from_secs(5));

    assert!(client.is_ok());
}

#[test]
fn from_client_accepts_custom_client() {
    let custom = reqwest::Client::builder()
        .timeout(Duration::from_secs(30))
        .build()
        .unwrap();
    let client = ReqwestClient::from_client(custom);

    let _ = format!("{client:?}");
}

#[test]
fn client_is_send_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ReqwestClient>();
}

#[tokio::test]
async fn request_to_invalid_host_returns_error_or_proxy_response() {
    let client = ReqwestClient::new();
    let url = url::Url::parse("http://invalid.invalid.invalid/").unwrap();

    let result = client.request(HttpRequest::get(url)).await;

    // Behind a proxy the failure can come back as an HTTP error response.
    match result {
        Err(HttpError::Connection(_)) => {}
        Ok(resp) if !resp.is_success() => {}
        other => panic!("Expected connection error or proxy error response, got {other:?}"),
    }
}
