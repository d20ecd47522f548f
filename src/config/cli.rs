//! CLI argument parsing using clap.
//!
//! Defines the command-line interface with all options and subcommands.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use clap::{Args, Parser, Subcommand};

use crate::webhook::{Webhook, WebhookOptions};

/// shopify-rest: Shopify Admin REST API client
///
/// Manages a shop's webhook subscriptions and prints the results as JSON.
#[derive(Debug, Parser)]
#[command(name = "shopify-rest")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,

    /// Shop name or domain (e.g. `fooshop` or `fooshop.myshopify.com`)
    #[arg(long, global = true)]
    pub shop: Option<String>,

    /// App access token
    #[arg(long = "access-token", global = true)]
    pub access_token: Option<String>,

    /// Private app API key (use with --password)
    #[arg(long = "api-key", global = true)]
    pub api_key: Option<String>,

    /// Private app password (use with --api-key)
    #[arg(long, global = true)]
    pub password: Option<String>,

    /// API version (`YYYY-MM` or `unstable`); unversioned paths if omitted
    #[arg(long = "api-version", global = true)]
    pub api_version: Option<String>,

    /// Request timeout in seconds
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    /// Path to configuration file
    #[arg(long, short, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(long, short, global = true)]
    pub verbose: bool,
}

/// Subcommands for shopify-rest
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Generate a default configuration file
    Init {
        /// Output path for the configuration file
        #[arg(long, short, default_value = "shopify-rest.toml")]
        output: PathBuf,
    },

    /// Manage webhook subscriptions
    #[command(subcommand)]
    Webhooks(WebhookCommand),
}

/// Webhook operations.
#[derive(Debug, Subcommand)]
pub enum WebhookCommand {
    /// List webhook subscriptions
    List(WebhookFilterArgs),

    /// Count webhook subscriptions
    Count(WebhookFilterArgs),

    /// Fetch a single webhook subscription
    Get {
        /// Webhook id
        id: u64,

        /// Only return these fields (comma-separated)
        #[arg(long, value_delimiter = ',')]
        fields: Vec<String>,
    },

    /// Create a webhook subscription
    Create(WebhookFields),

    /// Update a webhook subscription (only the given fields change)
    Update {
        /// Webhook id
        id: u64,

        #[command(flatten)]
        fields: WebhookFields,
    },

    /// Delete a webhook subscription
    Delete {
        /// Webhook id
        id: u64,
    },
}

/// Filters shared by `list` and `count`.
#[derive(Debug, Default, Args)]
pub struct WebhookFilterArgs {
    /// Only subscriptions delivering to this address
    #[arg(long)]
    pub address: Option<String>,

    /// Only subscriptions for this topic (e.g. `orders/create`)
    #[arg(long)]
    pub topic: Option<String>,

    /// Maximum number of results
    #[arg(long)]
    pub limit: Option<u32>,

    /// Only subscriptions with a greater id
    #[arg(long = "since-id")]
    pub since_id: Option<u64>,

    /// Created at or after (RFC 3339)
    #[arg(long = "created-at-min")]
    pub created_at_min: Option<DateTime<Utc>>,

    /// Created at or before (RFC 3339)
    #[arg(long = "created-at-max")]
    pub created_at_max: Option<DateTime<Utc>>,

    /// Updated at or after (RFC 3339)
    #[arg(long = "updated-at-min")]
    pub updated_at_min: Option<DateTime<Utc>>,

    /// Updated at or before (RFC 3339)
    #[arg(long = "updated-at-max")]
    pub updated_at_max: Option<DateTime<Utc>>,

    /// Only return these fields (comma-separated)
    #[arg(long, value_delimiter = ',')]
    pub fields: Vec<String>,
}

impl WebhookFilterArgs {
    /// Converts the flags into query options; `None` when no filter is set.
    #[must_use]
    pub fn to_options(&self) -> Option<WebhookOptions> {
        let options = WebhookOptions {
            address: self.address.clone(),
            topic: self.topic.clone(),
            limit: self.limit,
            since_id: self.since_id,
            created_at_min: self.created_at_min,
            created_at_max: self.created_at_max,
            updated_at_min: self.updated_at_min,
            updated_at_max: self.updated_at_max,
            fields: self.fields.clone(),
        };

        (!options.is_empty()).then_some(options)
    }
}

/// Writable webhook fields for `create` and `update`.
#[derive(Debug, Default, Args)]
pub struct WebhookFields {
    /// Event topic (e.g. `orders/create`)
    #[arg(long)]
    pub topic: Option<String>,

    /// Delivery address
    #[arg(long)]
    pub address: Option<String>,

    /// Payload format: `json` or `xml`
    #[arg(long)]
    pub format: Option<String>,

    /// Payload fields to include (comma-separated)
    #[arg(long, value_delimiter = ',')]
    pub fields: Vec<String>,

    /// Metafield namespaces to include (comma-separated)
    #[arg(long = "metafield-namespaces", value_delimiter = ',')]
    pub metafield_namespaces: Vec<String>,
}

impl WebhookFields {
    /// Builds the record to send; unset flags are left out of the payload.
    #[must_use]
    pub fn to_webhook(&self, id: Option<u64>) -> Webhook {
        Webhook {
            id,
            topic: self.topic.clone().unwrap_or_default(),
            address: self.address.clone().unwrap_or_default(),
            format: self.format.clone(),
            fields: self.fields.clone(),
            metafield_namespaces: self.metafield_namespaces.clone(),
            ..Webhook::default()
        }
    }
}

impl Cli {
    /// Parses CLI arguments from the command line.
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Parses CLI arguments from an iterator (useful for testing).
    pub fn parse_from_iter<I, T>(iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Self::parse_from(iter)
    }

    /// Returns true if this is the init command.
    #[must_use]
    pub const fn is_init(&self) -> bool {
        matches!(self.command, Command::Init { .. })
    }
}
