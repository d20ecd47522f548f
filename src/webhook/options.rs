//! Query options for listing, fetching and counting webhooks.

use chrono::{DateTime, SecondsFormat, Utc};

use crate::resource::QueryOptions;

/// Filters recognized by the webhook endpoints.
///
/// Unset fields are not sent. `fields` only affects list and get responses.
///
/// # Example
///
/// ```
/// use shopify_rest::resource::QueryOptions;
/// use shopify_rest::webhook::WebhookOptions;
///
/// let options = WebhookOptions::new().with_topic("orders/paid");
/// assert_eq!(options.query_pairs(), vec![("topic", "orders/paid".to_string())]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WebhookOptions {
    /// Only subscriptions delivering to this address
    pub address: Option<String>,
    /// Only subscriptions for this topic
    pub topic: Option<String>,
    /// Maximum number of results (the API caps this at 250)
    pub limit: Option<u32>,
    /// Only subscriptions with an id greater than this
    pub since_id: Option<u64>,
    pub created_at_min: Option<DateTime<Utc>>,
    pub created_at_max: Option<DateTime<Utc>>,
    pub updated_at_min: Option<DateTime<Utc>>,
    pub updated_at_max: Option<DateTime<Utc>>,
    /// Only return these record fields
    pub fields: Vec<String>,
}

impl WebhookOptions {
    /// Creates options with no filters set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Filters by delivery address.
    #[must_use]
    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }

    /// Filters by topic.
    #[must_use]
    pub fn with_topic(mut self, topic: impl Into<String>) -> Self {
        self.topic = Some(topic.into());
        self
    }

    /// Limits the number of results.
    #[must_use]
    pub const fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Returns only records after this id.
    #[must_use]
    pub const fn with_since_id(mut self, since_id: u64) -> Self {
        self.since_id = Some(since_id);
        self
    }

    /// Returns only records created within the range (either bound optional).
    #[must_use]
    pub const fn with_created_between(
        mut self,
        min: Option<DateTime<Utc>>,
        max: Option<DateTime<Utc>>,
    ) -> Self {
        self.created_at_min = min;
        self.created_at_max = max;
        self
    }

    /// Returns only records updated within the range (either bound optional).
    #[must_use]
    pub const fn with_updated_between(
        mut self,
        min: Option<DateTime<Utc>>,
        max: Option<DateTime<Utc>>,
    ) -> Self {
        self.updated_at_min = min;
        self.updated_at_max = max;
        self
    }

    /// Restricts the returned record fields.
    #[must_use]
    pub fn with_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fields = fields.into_iter().map(Into::into).collect();
        self
    }

    /// Returns true if no filter is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.query_pairs().is_empty()
    }
}

impl QueryOptions for WebhookOptions {
    fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();

        if let Some(address) = &self.address {
            pairs.push(("address", address.clone()));
        }
        if let Some(topic) = &self.topic {
            pairs.push(("topic", topic.clone()));
        }
        if let Some(limit) = self.limit {
            pairs.push(("limit", limit.to_string()));
        }
        if let Some(since_id) = self.since_id {
            pairs.push(("since_id", since_id.to_string()));
        }

        let timestamps = [
            ("created_at_min", self.created_at_min),
            ("created_at_max", self.created_at_max),
            ("updated_at_min", self.updated_at_min),
            ("updated_at_max", self.updated_at_max),
        ];
        for (key, value) in timestamps {
            if let Some(at) = value {
                pairs.push((key, at.to_rfc3339_opts(SecondsFormat::Secs, true)));
            }
        }

        if !self.fields.is_empty() {
            pairs.push(("fields", self.fields.join(",")));
        }

        pairs
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn default_options_emit_nothing() {
        let options = WebhookOptions::new();

        assert!(options.query_pairs().is_empty());
        assert!(options.is_empty());
    }

    #[test]
    fn topic_only() {
        let options = WebhookOptions::new().with_topic("orders/paid");

        assert_eq!(
            options.query_pairs(),
            vec![("topic", "orders/paid".to_string())]
        );
        assert!(!options.is_empty());
    }

    #[test]
    fn all_filters_in_stable_order() {
        let min = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let max = Utc.with_ymd_and_hms(2024, 2, 1, 12, 30, 0).unwrap();
        let options = WebhookOptions::new()
            .with_address("https://example.com/hook")
            .with_topic("orders/create")
            .with_limit(50)
            .with_since_id(901_431_826)
            .with_created_between(Some(min), None)
            .with_updated_between(None, Some(max))
            .with_fields(["id", "address"]);

        let keys: Vec<_> = options.query_pairs().into_iter().map(|(k, _)| k).collect();
        assert_eq!(
            keys,
            [
                "address",
                "topic",
                "limit",
                "since_id",
                "created_at_min",
                "updated_at_max",
                "fields"
            ]
        );
    }

    #[test]
    fn timestamps_render_as_utc_rfc3339() {
        let at = Utc.with_ymd_and_hms(2016, 6, 1, 14, 10, 44).unwrap();
        let options = WebhookOptions::new().with_created_between(Some(at), Some(at));

        assert_eq!(
            options.query_pairs(),
            vec![
                ("created_at_min", "2016-06-01T14:10:44Z".to_string()),
                ("created_at_max", "2016-06-01T14:10:44Z".to_string()),
            ]
        );
    }

    #[test]
    fn fields_are_comma_joined_in_order() {
        let options = WebhookOptions::new().with_fields(["updated_at", "id"]);

        assert_eq!(
            options.query_pairs(),
            vec![("fields", "updated_at,id".to_string())]
        );
    }
}
