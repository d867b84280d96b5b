//! Bounded retry with exponential backoff and jitter.

use std::future::Future;
use std::time::Duration;

use rand::Rng;

use crate::client::error::ClientError;
use crate::observability::metrics;

/// Per-call-site retry policy: attempt bound, base delay, delay cap.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    max_retries: u32,
    base_delay_ms: u64,
    max_delay_ms: u64,
}

impl RetryPolicy {
    pub fn new(max_retries: u32, base_delay_ms: u64, max_delay_ms: u64) -> Self {
        Self {
            max_retries,
            base_delay_ms,
            max_delay_ms,
        }
    }

    /// Only upstream server errors are worth another attempt. Timeouts,
    /// client errors and decode failures propagate as-is.
    pub fn should_retry(&self, err: &ClientError) -> bool {
        matches!(err, ClientError::UpstreamServer { .. })
    }

    /// Delay before retry `attempt` (1-based): exponential in the attempt
    /// number, capped, with 0-10% added jitter.
    pub fn backoff_delay(&self, attempt: u32) -> Duration {
        if attempt == 0 {
            return Duration::ZERO;
        }

        let exponent = 2u64.saturating_pow(attempt - 1);
        let delay_ms = self
            .base_delay_ms
            .saturating_mul(exponent)
            .min(self.max_delay_ms);

        let jitter_range = delay_ms / 10;
        let jitter = if jitter_range > 0 {
            rand::thread_rng().gen_range(0..jitter_range)
        } else {
            0
        };

        Duration::from_millis(delay_ms.saturating_add(jitter))
    }
}

/// Run `call` until it succeeds, fails with a non-retryable error, or the
/// retry budget is spent.
///
/// Exhaustion replaces the last server error with
/// [`ClientError::RetryExhausted`]; the original error is logged here and is
/// not visible to the caller. The sleep between attempts suspends only this
/// call's future, so concurrent calls are unaffected.
pub async fn with_retry<T, F, Fut>(
    policy: &RetryPolicy,
    operation: &'static str,
    mut call: F,
) -> Result<T, ClientError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, ClientError>>,
{
    let mut attempt: u32 = 0;
    loop {
        match call().await {
            Ok(value) => {
                if attempt > 0 {
                    tracing::info!(
                        operation,
                        attempts = attempt + 1,
                        "Upstream call recovered after retry"
                    );
                }
                return Ok(value);
            }
            Err(err) if policy.should_retry(&err) => {
                attempt += 1;
                if attempt > policy.max_retries {
                    tracing::error!(
                        operation,
                        attempts = attempt,
                        error = %err,
                        "Upstream retries exhausted"
                    );
                    return Err(ClientError::RetryExhausted);
                }

                let delay = policy.backoff_delay(attempt);
                tracing::warn!(
                    operation,
                    attempt,
                    delay_ms = delay.as_millis() as u64,
                    error = %err,
                    "Retrying upstream call"
                );
                metrics::record_retry(operation);
                tokio::time::sleep(delay).await;
            }
            Err(err) => {
                tracing::error!(operation, error = %err, "Upstream call failed");
                return Err(err);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[test]
    fn backoff_grows_exponentially_and_respects_cap() {
        let policy = RetryPolicy::new(3, 100, 2000);
        assert!(policy.backoff_delay(1).as_millis() >= 100);
        assert!(policy.backoff_delay(2).as_millis() >= 200);
        assert!(policy.backoff_delay(3).as_millis() >= 400);

        let capped = RetryPolicy::new(3, 100, 1000);
        let delay = capped.backoff_delay(10);
        assert!(delay.as_millis() >= 1000);
        assert!(delay.as_millis() < 1100);
    }

    #[test]
    fn only_server_errors_are_retryable() {
        let policy = RetryPolicy::new(3, 100, 2000);
        assert!(policy.should_retry(&ClientError::UpstreamServer { status: 503 }));
        assert!(!policy.should_retry(&ClientError::UpstreamClient { status: 404 }));
        assert!(!policy.should_retry(&ClientError::UnexpectedStatus { status: 500 }));
        assert!(!policy.should_retry(&ClientError::RetryExhausted));
    }

    #[tokio::test]
    async fn exhaustion_replaces_the_original_error() {
        let policy = RetryPolicy::new(3, 1, 10);
        let calls = AtomicU32::new(0);

        let result: Result<(), ClientError> = with_retry(&policy, "test_op", || {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Err(ClientError::UpstreamServer { status: 500 }) }
        })
        .await;

        assert!(matches!(result, Err(ClientError::RetryExhausted)));
        assert_eq!(calls.load(Ordering::SeqCst), 4);
    }

    #[tokio::test]
    async fn non_retryable_errors_propagate_immediately() {
        let policy = RetryPolicy::new(3, 1, 10);
        let calls = AtomicU32::new(0);

        let result: Result<(), ClientError> = with_retry(&policy, "test_op", || {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Err(ClientError::UpstreamClient { status: 404 }) }
        })
        .await;

        assert!(matches!(
            result,
            Err(ClientError::UpstreamClient { status: 404 })
        ));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn success_after_retry_returns_the_value() {
        let policy = RetryPolicy::new(3, 1, 10);
        let calls = AtomicU32::new(0);

        let result = with_retry(&policy, "test_op", || {
            let n = calls.fetch_add(1, Ordering::SeqCst);
            async move {
                if n < 2 {
                    Err(ClientError::UpstreamServer { status: 503 })
                } else {
                    Ok(42)
                }
            }
        })
        .await;

        assert_eq!(result.unwrap(), 42);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }
}
