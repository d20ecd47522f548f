//! Tests for `Context` cancellation and deadlines.

use std::future::pending;
use std::time::Duration;

use tokio::time::Instant;

use super::{Context, HttpError};

async fn never() -> Result<u32, HttpError> {
    pending().await
}

async fn ready(value: u32) -> Result<u32, HttpError> {
    Ok(value)
}

mod construction {
    use super::*;

    #[test]
    fn background_has_no_deadline_and_is_not_cancelled() {
        let ctx = Context::background();

        assert!(ctx.deadline().is_none());
        assert!(!ctx.is_cancelled());
        assert!(ctx.check().is_ok());
    }

    #[test]
    fn cancel_handle_marks_context_and_clones() {
        let (ctx, handle) = Context::cancellable();
        let clone = ctx.clone();

        handle.cancel();
        handle.cancel();

        assert!(ctx.is_cancelled());
        assert!(clone.is_cancelled());
        assert!(matches!(ctx.check(), Err(HttpError::Cancelled)));
    }

    #[test]
    fn dropped_handle_does_not_cancel() {
        let (ctx, handle) = Context::cancellable();
        drop(handle);

        assert!(!ctx.is_cancelled());
    }

    #[tokio::test(start_paused = true)]
    async fn earlier_deadline_is_kept() {
        let now = Instant::now();
        let ctx = Context::background()
            .with_deadline(now + Duration::from_secs(5))
            .with_timeout(Duration::from_secs(60));

        assert_eq!(ctx.deadline(), Some(now + Duration::from_secs(5)));
    }

    #[tokio::test(start_paused = true)]
    async fn later_call_can_shorten_deadline() {
        let now = Instant::now();
        let ctx = Context::background()
            .with_timeout(Duration::from_secs(60))
            .with_deadline(now + Duration::from_secs(1));

        assert_eq!(ctx.deadline(), Some(now + Duration::from_secs(1)));
    }
}

mod run {
    use super::*;

    #[tokio::test]
    async fn returns_future_result_when_not_done() {
        let ctx = Context::background();

        assert_eq!(ctx.run(ready(7)).await.unwrap(), 7);
    }

    #[tokio::test]
    async fn passes_through_future_error() {
        let ctx = Context::background();

        let result = ctx.run(async { Err::<u32, _>(HttpError::Timeout) }).await;

        assert!(matches!(result, Err(HttpError::Timeout)));
    }

    #[tokio::test]
    async fn already_cancelled_context_short_circuits() {
        let (ctx, handle) = Context::cancellable();
        handle.cancel();

        let result = ctx.run(ready(1)).await;

        assert!(matches!(result, Err(HttpError::Cancelled)));
    }

    #[tokio::test]
    async fn cancel_aborts_in_flight_future() {
        let (ctx, handle) = Context::cancellable();

        let task = tokio::spawn(async move { ctx.run(never()).await });
        tokio::task::yield_now().await;
        handle.cancel();

        let result = task.await.unwrap();
        assert!(matches!(result, Err(HttpError::Cancelled)));
    }

    #[tokio::test(start_paused = true)]
    async fn deadline_aborts_in_flight_future() {
        let ctx = Context::background().with_timeout(Duration::from_secs(5));

        let result = ctx.run(never()).await;

        assert!(matches!(result, Err(HttpError::DeadlineExceeded)));
    }

    #[tokio::test(start_paused = true)]
    async fn expired_deadline_short_circuits() {
        let ctx = Context::background().with_timeout(Duration::from_secs(1));
        tokio::time::advance(Duration::from_secs(2)).await;

        let result = ctx.run(ready(1)).await;

        assert!(matches!(result, Err(HttpError::DeadlineExceeded)));
    }

    #[tokio::test(start_paused = true)]
    async fn dropped_handle_lets_future_finish() {
        let (ctx, handle) = Context::cancellable();
        drop(handle);

        let result = ctx
            .run(async {
                tokio::time::sleep(Duration::from_millis(10)).await;
                Ok(3)
            })
            .await;

        assert_eq!(result.unwrap(), 3);
    }
}
