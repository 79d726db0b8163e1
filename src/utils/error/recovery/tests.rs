//! Tests for the retry policy

#[cfg(test)]
mod tests {
    use super::super::{BackoffSchedule, RetryPolicy};
    use std::sync::Arc;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::time::{Duration, Instant};
    use tokio_util::sync::CancellationToken;

    fn fast_schedule(max_retries: u32) -> BackoffSchedule {
        BackoffSchedule::new(
            vec![Duration::from_millis(1), Duration::from_millis(2)],
            Duration::from_millis(1),
            max_retries,
        )
    }

    #[tokio::test]
    async fn test_retry_policy_eventual_success() {
        let policy = RetryPolicy::new(fast_schedule(3));

        let counter = Arc::new(AtomicU32::new(0));
        let counter_clone = counter.clone();

        let result = policy
            .call(|| {
                let counter = counter_clone.clone();
                async move {
                    let count = counter.fetch_add(1, Ordering::Relaxed);
                    if count < 2 { Err("not yet") } else { Ok(42) }
                }
            })
            .await;

        assert_eq!(result, Ok(42));
        assert_eq!(counter.load(Ordering::Relaxed), 3);
    }

    #[tokio::test]
    async fn test_retry_policy_gives_up_at_ceiling() {
        let policy = RetryPolicy::new(fast_schedule(3));
        let counter = Arc::new(AtomicU32::new(0));
        let counter_clone = counter.clone();

        let result: Result<(), &str> = policy
            .call(|| {
                let counter = counter_clone.clone();
                async move {
                    counter.fetch_add(1, Ordering::Relaxed);
                    Err("always")
                }
            })
            .await;

        assert_eq!(result, Err("always"));
        // first attempt plus three retries
        assert_eq!(counter.load(Ordering::Relaxed), 4);
    }

    #[tokio::test]
    async fn test_retry_policy_no_retries() {
        let policy = RetryPolicy::new(BackoffSchedule::none());
        let counter = Arc::new(AtomicU32::new(0));
        let counter_clone = counter.clone();

        let result: Result<(), &str> = policy
            .call(|| {
                let counter = counter_clone.clone();
                async move {
                    counter.fetch_add(1, Ordering::Relaxed);
                    Err("fail")
                }
            })
            .await;

        assert!(result.is_err());
        assert_eq!(counter.load(Ordering::Relaxed), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_retry_policy_follows_schedule() {
        let policy = RetryPolicy::new(BackoffSchedule::default());
        let started = Instant::now();
        let start = tokio::time::Instant::now();

        let result: Result<(), &str> = policy.call(|| async { Err("down") }).await;

        assert!(result.is_err());
        // 1s + 3s + 5s of virtual time
        assert_eq!(start.elapsed(), Duration::from_secs(9));
        assert!(started.elapsed() < Duration::from_secs(5));
    }

    #[tokio::test]
    async fn test_retry_policy_cancelled_during_backoff() {
        let token = CancellationToken::new();
        let policy = RetryPolicy::new(BackoffSchedule::new(
            vec![Duration::from_secs(60)],
            Duration::from_secs(60),
            3,
        ))
        .with_cancellation(token.clone());

        let counter = Arc::new(AtomicU32::new(0));
        let counter_clone = counter.clone();

        let handle = tokio::spawn(async move {
            policy
                .call(|| {
                    let counter = counter_clone.clone();
                    async move {
                        counter.fetch_add(1, Ordering::Relaxed);
                        Err::<(), _>("down")
                    }
                })
                .await
        });

        tokio::time::sleep(Duration::from_millis(20)).await;
        token.cancel();

        let result = tokio::time::timeout(Duration::from_secs(5), handle)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(result, Err("down"));
        assert_eq!(counter.load(Ordering::Relaxed), 1);
    }
}
