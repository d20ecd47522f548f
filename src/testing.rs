//! Shared test support: a routing mock transport and fixture loading.

use std::path::Path;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::client::{ApiVersion, Credentials, ShopClient};
use crate::transport::{HttpClient, HttpError, HttpRequest, HttpResponse};

/// Base URL every test client resolves to.
pub const SHOP_URL: &str = "https://fooshop.myshopify.com";

/// API version used by [`test_client`].
pub const API_VERSION: &str = "2024-01";

/// Loads a JSON fixture from `fixtures/`.
pub fn fixture(name: &str) -> Vec<u8> {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("fixtures")
        .join(name);
    std::fs::read(&path).unwrap_or_else(|e| panic!("fixture {}: {e}", path.display()))
}

/// Returns `path` under the test client's API prefix as an absolute URL string.
pub fn api_url(path: &str) -> String {
    format!("{SHOP_URL}/admin/api/{API_VERSION}/{path}")
}

/// A registered canned response.
#[derive(Debug)]
struct Route {
    method: http::Method,
    path: String,
    query: Option<Vec<(String, String)>>,
    response: HttpResponse,
}

/// Mock transport that answers by method, path and exact query.
///
/// A route registered with a query only matches requests carrying exactly
/// those pairs (order-insensitive). A route without a query is the fallback
/// for its method and path. Unmatched requests fail with a connection error.
#[derive(Debug, Default)]
pub struct MockTransport {
    routes: Mutex<Vec<Route>>,
    requests: Mutex<Vec<HttpRequest>>,
    calls: AtomicUsize,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a response for `method` and the absolute `url` (no query).
    pub fn respond(
        &self,
        method: http::Method,
        url: &str,
        status: u16,
        body: impl Into<Vec<u8>>,
    ) -> &Self {
        self.register(method, url, None, response(status, http::HeaderMap::new(), body))
    }

    /// Registers a response that only matches the exact query pairs.
    pub fn respond_with_query(
        &self,
        method: http::Method,
        url: &str,
        query: &[(&str, &str)],
        status: u16,
        body: impl Into<Vec<u8>>,
    ) -> &Self {
        let query = query
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        self.register(
            method,
            url,
            Some(query),
            response(status, http::HeaderMap::new(), body),
        )
    }

    /// Registers a response with headers.
    pub fn respond_with_headers(
        &self,
        method: http::Method,
        url: &str,
        status: u16,
        headers: http::HeaderMap,
        body: impl Into<Vec<u8>>,
    ) -> &Self {
        self.register(method, url, None, response(status, headers, body))
    }

    fn register(
        &self,
        method: http::Method,
        url: &str,
        query: Option<Vec<(String, String)>>,
        response: HttpResponse,
    ) -> &Self {
        let path = url::Url::parse(url).unwrap().path().to_string();
        self.routes.lock().unwrap().push(Route {
            method,
            path,
            query: query.map(sorted),
            response,
        });
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn last_request(&self) -> HttpRequest {
        self.requests().pop().expect("no request was sent")
    }

    fn find(&self, req: &HttpRequest) -> Option<HttpResponse> {
        let routes = self.routes.lock().unwrap();
        let query = sorted(req.query_pairs());

        matching(&routes, req)
            .find(|r| r.query.as_ref() == Some(&query))
            .or_else(|| matching(&routes, req).find(|r| r.query.is_none()))
            .map(|r| r.response.clone())
    }
}

impl HttpClient for MockTransport {
    async fn request(&self, req: HttpRequest) -> Result<HttpResponse, HttpError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let found = self.find(&req);
        let description = format!("{} {}", req.method, req.url);
        self.requests.lock().unwrap().push(req);

        found.ok_or_else(|| {
            HttpError::Connection(format!("no responder found for {description}").into())
        })
    }
}

/// Transport whose requests never complete.
#[derive(Debug, Default)]
pub struct HangingTransport;

impl HttpClient for HangingTransport {
    async fn request(&self, _req: HttpRequest) -> Result<HttpResponse, HttpError> {
        std::future::pending().await
    }
}

/// A `fooshop` client pinned to [`API_VERSION`] with an access token.
pub fn test_client() -> ShopClient<MockTransport> {
    client_with(MockTransport::new())
}

/// A `fooshop` client over an arbitrary transport.
pub fn client_with<H>(http: H) -> ShopClient<H> {
    ShopClient::new(http, "fooshop")
        .unwrap()
        .with_api_version(API_VERSION.parse::<ApiVersion>().unwrap())
        .with_credentials(&Credentials::access_token("shpat_test"))
        .unwrap()
}

fn response(status: u16, headers: http::HeaderMap, body: impl Into<Vec<u8>>) -> HttpResponse {
    HttpResponse::new(
        http::StatusCode::from_u16(status).unwrap(),
        headers,
        body.into(),
    )
}

fn matching<'a>(routes: &'a [Route], req: &'a HttpRequest) -> impl Iterator<Item = &'a Route> {
    routes
        .iter()
        .filter(move |r| r.method == req.method && r.path == req.url.path())
}

fn sorted(mut pairs: Vec<(String, String)>) -> Vec<(String, String)> {
    pairs.sort();
    pairs
}
