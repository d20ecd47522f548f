//! Shop-scoped Admin API client.

use http::header::{ACCEPT, CONTENT_TYPE, HeaderName, HeaderValue, USER_AGENT};
use url::Url;

use crate::resource::{Resource, ResourceService};
use crate::transport::{Context, HttpClient, HttpRequest, HttpResponse, ReqwestClient};
use crate::webhook::Webhook;

use super::{ApiError, ApiVersion, ClientError, Credentials, Operation};

/// Domain suffix appended to bare shop names.
pub const SHOP_DOMAIN_SUFFIX: &str = "myshopify.com";

/// Default `User-Agent` header.
pub const DEFAULT_USER_AGENT: &str = concat!("shopify-rest/", env!("CARGO_PKG_VERSION"));

const JSON: &str = "application/json";

/// Resolves a shop name to its base URL.
///
/// `fooshop`, `fooshop.myshopify.com` and `https://fooshop.myshopify.com/`
/// all resolve to `https://fooshop.myshopify.com/`. Names that already
/// contain a dot are treated as full domains.
///
/// # Errors
///
/// Returns [`ClientError::InvalidShop`] for empty names or names that do not
/// form a valid host.
pub fn shop_base_url(name: &str) -> Result<Url, ClientError> {
    let invalid = |reason: &str| ClientError::InvalidShop {
        name: name.to_string(),
        reason: reason.to_string(),
    };

    let trimmed = name.trim();
    let host = trimmed
        .strip_prefix("https://")
        .or_else(|| trimmed.strip_prefix("http://"))
        .unwrap_or(trimmed)
        .trim_end_matches('/')
        .trim_matches('.');

    if host.is_empty() {
        return Err(invalid("shop name is empty"));
    }
    if host.contains(['/', '?', '#', '@', ' ']) {
        return Err(invalid("expected a shop name or domain, not a URL path"));
    }

    let domain = if host.contains('.') {
        host.to_string()
    } else {
        format!("{host}.{SHOP_DOMAIN_SUFFIX}")
    };

    Url::parse(&format!("https://{domain}/")).map_err(|e| invalid(&e.to_string()))
}

/// A request against one of the shop's Admin API endpoints.
///
/// `path` is relative to the API prefix, e.g. `webhooks/4759306.json`.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    /// Operation being performed, for error context
    pub operation: Operation,
    /// Resource name, for error context
    pub resource: &'static str,
    /// HTTP method
    pub method: http::Method,
    /// Path relative to the API prefix
    pub path: String,
    /// Query parameters, in order
    pub query: Vec<(&'static str, String)>,
    /// JSON request body
    pub body: Option<Vec<u8>>,
}

impl ApiRequest {
    /// Creates a request without query or body.
    #[must_use]
    pub fn new(
        operation: Operation,
        resource: &'static str,
        method: http::Method,
        path: impl Into<String>,
    ) -> Self {
        Self {
            operation,
            resource,
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
        }
    }

    /// Sets the query parameters.
    #[must_use]
    pub fn with_query(mut self, query: Vec<(&'static str, String)>) -> Self {
        self.query = query;
        self
    }

    /// Sets the JSON body.
    #[must_use]
    pub fn with_body(mut self, body: Vec<u8>) -> Self {
        self.body = Some(body);
        self
    }
}

/// Client for a single shop's Admin API.
///
/// Holds no per-call state, so one instance can serve concurrent calls from
/// many tasks.
///
/// # Type Parameters
///
/// - `H`: The HTTP client implementation (defaults to [`ReqwestClient`])
///
/// # Example
///
/// ```no_run
/// use shopify_rest::client::{Credentials, ShopClient};
/// use shopify_rest::transport::{Context, ReqwestClient};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = ShopClient::new(ReqwestClient::new(), "fooshop")?
///     .with_api_version("2024-01".parse()?)
///     .with_credentials(&Credentials::access_token("shpat_..."))?;
///
/// let webhooks = client.webhooks().list(&Context::background(), None).await?;
/// println!("{} webhooks", webhooks.len());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ShopClient<H = ReqwestClient> {
    http: H,
    base_url: Url,
    api_version: Option<ApiVersion>,
    path_prefix: String,
    auth: Option<(HeaderName, HeaderValue)>,
    user_agent: HeaderValue,
}

impl<H> ShopClient<H> {
    /// Creates a client for the named shop.
    ///
    /// Without an API version the unversioned `admin` prefix is used.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidShop`] if the name cannot be resolved.
    pub fn new(http: H, shop_name: &str) -> Result<Self, ClientError> {
        Ok(Self::with_base_url(http, shop_base_url(shop_name)?))
    }

    /// Creates a client against an explicit base URL (proxies, test servers).
    ///
    /// The API prefix is resolved below the URL's path.
    #[must_use]
    pub fn with_base_url(http: H, mut base_url: Url) -> Self {
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        Self {
            http,
            base_url,
            api_version: None,
            path_prefix: "admin".to_string(),
            auth: None,
            user_agent: HeaderValue::from_static(DEFAULT_USER_AGENT),
        }
    }

    /// Pins the API version and switches to the `admin/api/{version}` prefix.
    #[must_use]
    pub fn with_api_version(mut self, version: ApiVersion) -> Self {
        self.path_prefix = format!("admin/api/{version}");
        self.api_version = Some(version);
        self
    }

    /// Sets the credentials sent with every request.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidHeader`] if the secret is not a valid header value.
    pub fn with_credentials(mut self, credentials: &Credentials) -> Result<Self, ClientError> {
        self.auth = Some(credentials.header()?);
        Ok(self)
    }

    /// Sets the `User-Agent` header.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidHeader`] if the value is not a valid header value.
    pub fn with_user_agent(mut self, user_agent: &str) -> Result<Self, ClientError> {
        self.user_agent = HeaderValue::from_str(user_agent)
            .map_err(|_| ClientError::InvalidHeader { name: "User-Agent" })?;
        Ok(self)
    }

    /// Returns the shop base URL.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Returns the pinned API version, if any.
    #[must_use]
    pub const fn api_version(&self) -> Option<&ApiVersion> {
        self.api_version.as_ref()
    }

    /// Returns the path prefix, e.g. `admin/api/2024-01`.
    #[must_use]
    pub fn path_prefix(&self) -> &str {
        &self.path_prefix
    }

    /// Returns the underlying HTTP client.
    #[must_use]
    pub const fn http(&self) -> &H {
        &self.http
    }

    /// Builds the absolute URL for a path relative to the API prefix.
    ///
    /// Query pairs are appended in order; an empty list adds no `?`.
    ///
    /// # Errors
    ///
    /// Returns [`url::ParseError`] if the path does not form a valid URL.
    pub fn endpoint(
        &self,
        path: &str,
        query: &[(&'static str, String)],
    ) -> Result<Url, url::ParseError> {
        let mut url = self.base_url.join(&format!("{}/{path}", self.path_prefix))?;
        if !query.is_empty() {
            url.query_pairs_mut()
                .extend_pairs(query.iter().map(|(k, v)| (*k, v.as_str())));
        }
        Ok(url)
    }

    /// Returns the CRUD service for a resource type.
    #[must_use]
    pub const fn resource<R: Resource>(&self) -> ResourceService<'_, R, H> {
        ResourceService::new(self)
    }

    /// Returns the webhook service.
    #[must_use]
    pub const fn webhooks(&self) -> ResourceService<'_, Webhook, H> {
        self.resource()
    }

    fn build_request(&self, request: ApiRequest) -> Result<HttpRequest, ClientError> {
        let url = self
            .endpoint(&request.path, &request.query)
            .map_err(|e| ClientError::Transport {
                operation: request.operation,
                resource: request.resource,
                source: crate::transport::HttpError::InvalidUrl(e.to_string()),
            })?;

        let mut http_request = HttpRequest::new(request.method, url)
            .with_header(ACCEPT, HeaderValue::from_static(JSON))
            .with_header(USER_AGENT, self.user_agent.clone());

        if let Some((name, value)) = &self.auth {
            http_request = http_request.with_header(name.clone(), value.clone());
        }

        if let Some(body) = request.body {
            http_request = http_request
                .with_header(CONTENT_TYPE, HeaderValue::from_static(JSON))
                .with_body(body);
        }

        Ok(http_request)
    }
}

impl<H: HttpClient> ShopClient<H> {
    /// Sends a request under `ctx` and returns the 2xx response.
    ///
    /// # Errors
    ///
    /// - [`ClientError::Transport`] if no response arrived or `ctx` finished first
    /// - [`ClientError::Api`] for any non-2xx status
    pub async fn execute(
        &self,
        ctx: &Context,
        request: ApiRequest,
    ) -> Result<HttpResponse, ClientError> {
        let operation = request.operation;
        let resource = request.resource;
        let http_request = self.build_request(request)?;

        tracing::debug!(
            method = %http_request.method,
            url = %http_request.url,
            "{operation} {resource}"
        );

        let response = ctx
            .run(self.http.request(http_request))
            .await
            .map_err(|source| ClientError::Transport {
                operation,
                resource,
                source,
            })?;

        tracing::debug!(status = %response.status, "{operation} {resource} responded");

        if response.is_success() {
            return Ok(response);
        }

        let error = ApiError::from_response(&response);
        tracing::warn!(
            status = %error.status,
            message = %error.message,
            "{operation} {resource} failed"
        );
        Err(ClientError::Api {
            operation,
            resource,
            source: error,
        })
    }
}
