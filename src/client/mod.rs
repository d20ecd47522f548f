//! Shop-scoped Admin API client.
//!
//! [`ShopClient`] owns the transport, resolves the shop's base URL and API
//! path prefix, attaches credentials, and turns non-2xx responses into
//! [`ApiError`]s. Resource operations are layered on top by
//! [`ResourceService`](crate::resource::ResourceService).

mod credentials;
mod error;
mod shop;
mod version;


pub use credentials::{ACCESS_TOKEN_HEADER, Credentials};
pub use error::{ApiError, ClientError, Operation};
pub use shop::{ApiRequest, DEFAULT_USER_AGENT, SHOP_DOMAIN_SUFFIX, ShopClient, shop_base_url};
pub use version::ApiVersion;
