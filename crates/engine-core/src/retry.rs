use connectors::error::CatalogError;
use std::{future::Future, time::Duration};
use tokio::time::sleep;
use tracing::warn;

/// Whether a failed catalog call may be attempted again.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryDisposition {
    Retry,
    Stop,
}

impl RetryDisposition {
    /// Only transport failures are transient; every other catalog error is a
    /// definitive answer from the store.
    pub fn for_catalog(err: &CatalogError) -> Self {
        match err {
            CatalogError::Transport(_) => RetryDisposition::Retry,
            _ => RetryDisposition::Stop,
        }
    }
}

#[derive(Debug)]
pub enum RetryError<E> {
    /// The error was not retryable.
    Fatal(E),
    /// The error was retryable, but the attempts ran out.
    AttemptsExceeded(E),
}

impl<E> RetryError<E> {
    pub fn into_inner(self) -> E {
        match self {
            RetryError::Fatal(err) | RetryError::AttemptsExceeded(err) => err,
        }
    }
}

/// Exponential backoff for catalog requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: usize,
    pub base_delay: Duration,
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_millis(200),
            max_delay: Duration::from_secs(5),
        }
    }
}

impl RetryPolicy {
    pub fn new(max_attempts: usize, base_delay: Duration, max_delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            base_delay,
            max_delay: max_delay.max(base_delay),
        }
    }

    /// A single attempt, no retries.
    pub fn none() -> Self {
        Self::new(1, Duration::ZERO, Duration::ZERO)
    }

    /// Runs `op` until it succeeds, fails fatally, or the attempts run out.
    /// `on_retry` sees every error that is about to be retried.
    pub async fn run<F, Fut, T, E, Classify, OnRetry>(
        &self,
        mut op: F,
        classify: Classify,
        mut on_retry: OnRetry,
    ) -> Result<T, RetryError<E>>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        Classify: Fn(&E) -> RetryDisposition,
        OnRetry: FnMut(&E, usize),
    {
        let mut attempt = 0;

        loop {
            let err = match op().await {
                Ok(result) => return Ok(result),
                Err(err) => err,
            };

            if classify(&err) == RetryDisposition::Stop {
                return Err(RetryError::Fatal(err));
            }
            if attempt + 1 >= self.max_attempts {
                return Err(RetryError::AttemptsExceeded(err));
            }

            on_retry(&err, attempt + 1);
            sleep(self.backoff_delay(attempt)).await;
            attempt += 1;
        }
    }

    fn backoff_delay(&self, attempt: usize) -> Duration {
        if self.base_delay.is_zero() {
            return Duration::ZERO;
        }

        let factor = 1u32 << attempt.min(6);
        self.base_delay.saturating_mul(factor).min(self.max_delay)
    }
}

/// Logs a catalog error that is about to be retried.
pub(crate) fn log_retry(operation: &'static str, err: &CatalogError, attempt: usize) {
    warn!(operation, attempt, error = %err, "Catalog request failed; retrying");
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn fast(max_attempts: usize) -> RetryPolicy {
        RetryPolicy::new(max_attempts, Duration::from_millis(1), Duration::from_millis(2))
    }

    #[tokio::test]
    async fn retries_transport_errors_until_success() {
        let calls = &AtomicUsize::new(0);
        let mut retried = Vec::new();

        let result = fast(3)
            .run(
                move || async move {
                    if calls.fetch_add(1, Ordering::SeqCst) == 0 {
                        Err(CatalogError::transport("connection reset"))
                    } else {
                        Ok(7)
                    }
                },
                RetryDisposition::for_catalog,
                |_, attempt| retried.push(attempt),
            )
            .await;

        assert_eq!(result.unwrap(), 7);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(retried, vec![1]);
    }

    #[tokio::test]
    async fn stops_on_definitive_errors() {
        let calls = &AtomicUsize::new(0);
        let result: Result<(), _> = fast(5)
            .run(
                move || async move {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Err(CatalogError::Rejected("bad body".into()))
                },
                RetryDisposition::for_catalog,
                |_, _| {},
            )
            .await;

        assert!(matches!(result, Err(RetryError::Fatal(CatalogError::Rejected(_)))));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn gives_up_after_max_attempts() {
        let calls = &AtomicUsize::new(0);
        let result: Result<(), _> = fast(3)
            .run(
                move || async move {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Err(CatalogError::transport("timeout"))
                },
                RetryDisposition::for_catalog,
                |_, _| {},
            )
            .await;

        assert!(matches!(result, Err(RetryError::AttemptsExceeded(_))));
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn backoff_doubles_and_caps() {
        let policy = RetryPolicy::new(10, Duration::from_millis(100), Duration::from_millis(350));
        assert_eq!(policy.backoff_delay(0), Duration::from_millis(100));
        assert_eq!(policy.backoff_delay(1), Duration::from_millis(200));
        assert_eq!(policy.backoff_delay(2), Duration::from_millis(350));
        assert_eq!(RetryPolicy::none().backoff_delay(3), Duration::ZERO);
    }
}
