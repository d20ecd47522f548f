//! Generic CRUD contract for Admin API resources.
//!
//! A record type describes where it lives and how it is wrapped by
//! implementing [`Resource`]; [`ResourceService`] then provides list, get,
//! count, create, update and delete for it. Adding a resource means adding a
//! record type, not another client.
//!
//! # Wire shape
//!
//! For a resource with singular key `webhook` and plural key `webhooks`:
//!
//! | Operation | Request                          | Response envelope      |
//! |-----------|----------------------------------|------------------------|
//! | list      | `GET webhooks.json`              | `{"webhooks": [...]}`  |
//! | get       | `GET webhooks/{id}.json`         | `{"webhook": {...}}`   |
//! | count     | `GET webhooks/count.json`        | `{"count": N}`         |
//! | create    | `POST webhooks.json`             | `{"webhook": {...}}`   |
//! | update    | `PUT webhooks/{id}.json`         | `{"webhook": {...}}`   |
//! | delete    | `DELETE webhooks/{id}.json`      | ignored                |

mod envelope;
mod service;


use serde::Serialize;
use serde::de::DeserializeOwned;

pub use envelope::{decode_envelope, encode_envelope};
pub use service::ResourceService;

/// A record type exposed as an Admin API resource.
pub trait Resource: Serialize + DeserializeOwned + Send + Sync {
    /// Envelope key wrapping a single record, e.g. `webhook`.
    const SINGULAR: &'static str;

    /// Envelope key wrapping a collection, e.g. `webhooks`.
    const PLURAL: &'static str;

    /// Collection path relative to the API prefix, without `.json`.
    const PATH: &'static str = Self::PLURAL;

    /// Query options accepted by list, get and count.
    type Options: QueryOptions + Sync;

    /// Returns the server-assigned identifier, if the record has one.
    fn id(&self) -> Option<u64>;
}

/// Options that render to query-string pairs.
///
/// Only options that are set produce pairs, so an empty options value and
/// no options at all put the same (empty) query on the wire.
pub trait QueryOptions {
    /// Returns the query pairs in a stable order.
    fn query_pairs(&self) -> Vec<(&'static str, String)>;
}
