//! The webhook subscription resource.
//!
//! - [`Webhook`]: the subscription record
//! - [`WebhookOptions`]: list/get/count filters
//! - HMAC verification of delivered payloads ([`verify_webhook_hmac`])
//!
//! Operations come from the generic resource service; use
//! [`ShopClient::webhooks`](crate::client::ShopClient::webhooks).

mod model;
mod options;
mod verify;


pub use model::Webhook;
pub use options::WebhookOptions;
pub use verify::{HMAC_HEADER, sign_webhook_body, verify_webhook_hmac, verify_webhook_request};
