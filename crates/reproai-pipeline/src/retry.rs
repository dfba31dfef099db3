//! Per-call retry with capped exponential backoff.

use std::future::Future;

use reproai_config::RetryConfig;
use reproai_core::enums::DataSource;
use reproai_sources::SourceError;

/// Run `op` until it succeeds, fails with a non-retryable error, or
/// `policy.max_attempts` is reached.
///
/// Rate-limited responses wait for the server's `Retry-After`, capped at
/// `policy.max_backoff_ms`; other retryable failures use the doubling backoff.
pub async fn with_retry<T, F, Fut>(
    policy: &RetryConfig,
    service: DataSource,
    mut op: F,
) -> Result<T, SourceError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, SourceError>>,
{
    let mut attempt: u32 = 1;
    loop {
        match op().await {
            Ok(value) => return Ok(value),
            Err(e) if e.is_retryable() && attempt < policy.max_attempts => {
                let wait = e
                    .retry_after()
                    .map_or_else(|| policy.backoff(attempt), |hint| policy.cap(hint));
                tracing::warn!(%service, attempt, ?wait, %e, "request failed, retrying");
                tokio::time::sleep(wait).await;
                attempt += 1;
            }
            Err(e) => return Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU32, Ordering};

    use super::*;

    fn fast_policy(max_attempts: u32) -> RetryConfig {
        RetryConfig {
            max_attempts,
            backoff_ms: 1,
            max_backoff_ms: 5,
        }
    }

    fn server_error() -> SourceError {
        SourceError::Api {
            service: DataSource::Github,
            status: 503,
            message: "unavailable".into(),
        }
    }

    #[tokio::test]
    async fn retries_server_errors_until_success() {
        let counter = AtomicU32::new(0);
        let calls = &counter;
        let result = with_retry(&fast_policy(3), DataSource::Github, move || async move {
            if calls.fetch_add(1, Ordering::SeqCst) < 2 {
                Err(server_error())
            } else {
                Ok(42)
            }
        })
        .await;
        assert_eq!(result.unwrap(), 42);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn stops_at_max_attempts() {
        let counter = AtomicU32::new(0);
        let calls = &counter;
        let result: Result<(), _> = with_retry(&fast_policy(2), DataSource::Github, move || async move {
            calls.fetch_add(1, Ordering::SeqCst);
            Err(server_error())
        })
        .await;
        assert!(result.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn never_retries_client_errors() {
        let counter = AtomicU32::new(0);
        let calls = &counter;
        let result: Result<(), _> = with_retry(&fast_policy(5), DataSource::Openalex, move || async move {
            calls.fetch_add(1, Ordering::SeqCst);
            Err(SourceError::Api {
                service: DataSource::Openalex,
                status: 404,
                message: String::new(),
            })
        })
        .await;
        assert!(result.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn rate_limit_wait_is_capped() {
        let counter = AtomicU32::new(0);
        let calls = &counter;
        let started = std::time::Instant::now();
        let result = with_retry(&fast_policy(2), DataSource::Huggingface, move || async move {
            if calls.fetch_add(1, Ordering::SeqCst) == 0 {
                Err(SourceError::RateLimited {
                    service: DataSource::Huggingface,
                    retry_after_secs: 60,
                })
            } else {
                Ok("ok")
            }
        })
        .await;
        assert_eq!(result.unwrap(), "ok");
        assert!(started.elapsed() < std::time::Duration::from_secs(5));
    }
}
