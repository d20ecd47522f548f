//! The webhook subscription record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::resource::Resource;

use super::WebhookOptions;

/// A webhook subscription: deliver events for `topic` to `address`.
///
/// Timestamps are normalized to UTC whatever offset the API reports. List
/// fields keep the order the API returned them in; a JSON `null` list
/// decodes as empty.
///
/// Empty and absent fields are left out when the record is sent, so a record
/// carrying only `id` and `address` is a partial update. An empty list means
/// "unchanged" on update, so `fields` and the namespace lists cannot be
/// cleared through this record; delete and recreate the subscription instead.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Webhook {
    /// Server-assigned identifier; absent before creation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,

    /// Delivery URI (`https://...`, or an event bus ARN / pub-sub URI)
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub address: String,

    /// Event topic, e.g. `orders/create`
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub topic: String,

    /// Payload format, `json` or `xml`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,

    /// Top-level payload fields to include; empty means all
    #[serde(
        default,
        deserialize_with = "null_as_empty",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub fields: Vec<String>,

    /// Metafield namespaces included in the payload
    #[serde(
        default,
        deserialize_with = "null_as_empty",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub metafield_namespaces: Vec<String>,

    /// Private metafield namespaces included in the payload
    #[serde(
        default,
        deserialize_with = "null_as_empty",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub private_metafield_namespaces: Vec<String>,

    /// API version the payloads are serialized with
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_version: Option<String>,
}

impl Webhook {
    /// Creates an unsaved subscription.
    #[must_use]
    pub fn new(topic: impl Into<String>, address: impl Into<String>) -> Self {
        Self {
            topic: topic.into(),
            address: address.into(),
            ..Self::default()
        }
    }

    /// Sets the identifier, e.g. to target an update.
    #[must_use]
    pub const fn with_id(mut self, id: u64) -> Self {
        self.id = Some(id);
        self
    }

    /// Sets the payload format.
    #[must_use]
    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.format = Some(format.into());
        self
    }

    /// Restricts the payload to the given fields.
    #[must_use]
    pub fn with_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fields = fields.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the metafield namespaces included in the payload.
    #[must_use]
    pub fn with_metafield_namespaces<I, S>(mut self, namespaces: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.metafield_namespaces = namespaces.into_iter().map(Into::into).collect();
        self
    }
}

impl Resource for Webhook {
    const SINGULAR: &'static str = "webhook";
    const PLURAL: &'static str = "webhooks";
    type Options = WebhookOptions;

    fn id(&self) -> Option<u64> {
        self.id
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<Vec<String>>::deserialize(deserializer).map(Option::unwrap_or_default)
}
