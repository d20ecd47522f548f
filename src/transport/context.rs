//! Per-call cancellation and deadlines.
//!
//! Every API operation takes a [`Context`]. The context is raced against the
//! in-flight request; whichever finishes first wins. A cancelled or expired
//! context never yields a partial result.
//!
//! Dropping an operation's future also aborts the request. A context is for
//! the cases where the caller cannot simply drop the future, e.g. when a
//! shutdown signal must reach calls already running on other tasks.

use std::future::{Future, pending};
use std::time::Duration;

use tokio::sync::watch;
use tokio::time::Instant;

use super::HttpError;

/// Cancellation signal and optional deadline for one or more API calls.
///
/// Cloning a context is cheap and the clones share the same cancel signal.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use shopify_rest::transport::Context;
///
/// // No cancellation, no deadline.
/// let ctx = Context::background();
/// assert!(ctx.deadline().is_none());
///
/// // Cancellable, with a 10 second deadline.
/// let (ctx, handle) = Context::cancellable();
/// let ctx = ctx.with_timeout(Duration::from_secs(10));
/// handle.cancel();
/// assert!(ctx.is_cancelled());
/// ```
#[derive(Debug, Clone, Default)]
pub struct Context {
    cancel: Option<watch::Receiver<bool>>,
    deadline: Option<Instant>,
}

/// Cancels every call running under the [`Context`] it was created with.
///
/// Dropping the handle without calling [`cancel`](Self::cancel) leaves the
/// context uncancelled.
#[derive(Debug)]
pub struct CancelHandle {
    tx: watch::Sender<bool>,
}

impl CancelHandle {
    /// Signals cancellation. Calling this more than once has no further effect.
    pub fn cancel(&self) {
        self.tx.send_replace(true);
    }
}

impl Context {
    /// Returns a context that is never cancelled and has no deadline.
    #[must_use]
    pub fn background() -> Self {
        Self::default()
    }

    /// Returns a context together with the handle that cancels it.
    #[must_use]
    pub fn cancellable() -> (Self, CancelHandle) {
        let (tx, rx) = watch::channel(false);
        let ctx = Self {
            cancel: Some(rx),
            deadline: None,
        };
        (ctx, CancelHandle { tx })
    }

    /// Sets a deadline `timeout` from now.
    ///
    /// An earlier deadline already on the context is kept.
    #[must_use]
    pub fn with_timeout(self, timeout: Duration) -> Self {
        self.with_deadline(Instant::now() + timeout)
    }

    /// Sets an absolute deadline.
    ///
    /// An earlier deadline already on the context is kept.
    #[must_use]
    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(self.deadline.map_or(deadline, |d| d.min(deadline)));
        self
    }

    /// Returns the deadline, if any.
    #[must_use]
    pub const fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Returns true if the cancel handle has fired.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancel.as_ref().is_some_and(|rx| *rx.borrow())
    }

    /// Checks the context without waiting.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Cancelled`] or [`HttpError::DeadlineExceeded`]
    /// if the context is already done.
    pub fn check(&self) -> Result<(), HttpError> {
        if self.is_cancelled() {
            return Err(HttpError::Cancelled);
        }
        if self.deadline.is_some_and(|d| d <= Instant::now()) {
            return Err(HttpError::DeadlineExceeded);
        }
        Ok(())
    }

    /// Runs `fut` until it completes or the context is done, whichever is first.
    ///
    /// # Errors
    ///
    /// Returns the future's own error, or [`HttpError::Cancelled`] /
    /// [`HttpError::DeadlineExceeded`] if the context finished first. When
    /// both are ready at once, the context wins.
    pub async fn run<F, T>(&self, fut: F) -> Result<T, HttpError>
    where
        F: Future<Output = Result<T, HttpError>>,
    {
        self.check()?;

        tokio::select! {
            biased;
            () = wait_cancelled(self.cancel.clone()) => Err(HttpError::Cancelled),
            () = wait_deadline(self.deadline) => Err(HttpError::DeadlineExceeded),
            result = fut => result,
        }
    }
}

async fn wait_cancelled(cancel: Option<watch::Receiver<bool>>) {
    let Some(mut rx) = cancel else {
        return pending().await;
    };

    // A dropped handle can no longer cancel.
    if rx.wait_for(|cancelled| *cancelled).await.is_err() {
        pending::<()>().await;
    }
}

async fn wait_deadline(deadline: Option<Instant>) {
    match deadline {
        Some(at) => tokio::time::sleep_until(at).await,
        None => pending().await,
    }
}
