//! Application execution logic.
//!
//! This module builds the shop client from the validated configuration,
//! runs one webhook command under a cancellable context and prints the
//! result as JSON.

use serde::Serialize;
use serde_json::json;
use thiserror::Error;
use tokio::signal;

use shopify_rest::client::{ClientError, ShopClient};
use shopify_rest::config::{ValidatedConfig, WebhookCommand};
use shopify_rest::transport::{Context, HttpClient, HttpError, ReqwestClient};
use shopify_rest::webhook::WebhookOptions;

#[cfg(test)]
#[path = "run_tests.rs"]
mod tests;

/// Error type for runtime execution failures.
#[derive(Debug, Error)]
pub enum RunError {
    /// Failed to create the HTTP client.
    #[error("Failed to create HTTP client: {0}")]
    HttpSetup(#[source] HttpError),

    /// The API call failed.
    #[error(transparent)]
    Client(#[from] ClientError),

    /// The result could not be rendered as JSON.
    #[error("Failed to encode output: {0}")]
    Output(#[source] serde_json::Error),
}

impl RunError {
    /// Returns true if the command was interrupted by a shutdown signal.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Client(e) if e.is_cancelled())
    }
}

/// Executes one webhook command and prints its result to stdout.
///
/// Ctrl+C (or SIGTERM on Unix) cancels the in-flight request.
///
/// # Errors
///
/// Returns an error if:
/// - The HTTP client cannot be created
/// - The API call fails or is cancelled
///
/// # Coverage Note
///
/// This function is excluded from coverage because it requires network
/// access and OS signal handling.
#[cfg(not(tarpaulin_include))]
pub async fn execute(config: ValidatedConfig, command: &WebhookCommand) -> Result<(), RunError> {
    let http = ReqwestClient::with_timeout(config.timeout).map_err(RunError::HttpSetup)?;
    let client = build_client(http, &config)?;

    let (ctx, cancel) = Context::cancellable();
    let watcher = tokio::spawn(async move {
        shutdown_signal().await;
        tracing::info!("Shutdown signal received, cancelling request...");
        cancel.cancel();
    });

    let result = run_webhook_command(&client, &ctx, command).await;
    watcher.abort();

    let output = serde_json::to_string_pretty(&result?).map_err(RunError::Output)?;
    println!("{output}");
    Ok(())
}

/// Builds a shop client over `http` from the validated configuration.
fn build_client<H>(http: H, config: &ValidatedConfig) -> Result<ShopClient<H>, ClientError> {
    let mut client = ShopClient::with_base_url(http, config.shop_url.clone())
        .with_credentials(&config.credentials)?
        .with_user_agent(&config.user_agent)?;

    if let Some(version) = &config.api_version {
        client = client.with_api_version(version.clone());
    }

    Ok(client)
}

/// Runs a webhook command and returns the JSON to print.
async fn run_webhook_command<H: HttpClient>(
    client: &ShopClient<H>,
    ctx: &Context,
    command: &WebhookCommand,
) -> Result<serde_json::Value, RunError> {
    let webhooks = client.webhooks();

    match command {
        WebhookCommand::List(filters) => {
            let options = filters.to_options();
            let list = webhooks.list(ctx, options.as_ref()).await?;
            tracing::debug!("Listed {} webhook(s)", list.len());
            to_json(&list)
        }
        WebhookCommand::Count(filters) => {
            let options = filters.to_options();
            let count = webhooks.count(ctx, options.as_ref()).await?;
            Ok(json!({ "count": count }))
        }
        WebhookCommand::Get { id, fields } => {
            let options =
                (!fields.is_empty()).then(|| WebhookOptions::new().with_fields(fields.iter().cloned()));
            to_json(&webhooks.get(ctx, *id, options.as_ref()).await?)
        }
        WebhookCommand::Create(fields) => {
            let created = webhooks.create(ctx, &fields.to_webhook(None)).await?;
            tracing::info!(
                "Created webhook {} for {}",
                created.id.unwrap_or_default(),
                created.topic
            );
            to_json(&created)
        }
        WebhookCommand::Update { id, fields } => {
            let updated = webhooks.update(ctx, &fields.to_webhook(Some(*id))).await?;
            tracing::info!("Updated webhook {id}");
            to_json(&updated)
        }
        WebhookCommand::Delete { id } => {
            webhooks.delete(ctx, *id).await?;
            tracing::info!("Deleted webhook {id}");
            Ok(json!({ "deleted": id }))
        }
    }
}

fn to_json<T: Serialize>(value: &T) -> Result<serde_json::Value, RunError> {
    serde_json::to_value(value).map_err(RunError::Output)
}

/// Returns a future that completes when a shutdown signal is received.
///
/// If a handler cannot be installed, that signal is never observed.
///
/// Excluded from coverage - requires OS signal handling.
#[cfg(not(tarpaulin_include))]
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::warn!("Failed to install Ctrl+C handler: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::warn!("Failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {}
        () = terminate => {}
    }
}
