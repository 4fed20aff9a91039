//! Async bridge for the blocking accessibility API
//!
//! Every accessibility call blocks until the remote application answers.
//! [`BlockingExecutor`] moves such calls onto tokio's blocking pool and
//! optionally bounds how long the caller waits.
//!
//! A timed-out call is not cancelled: the blocking thread keeps running until
//! the OS returns, and its result is dropped.

use std::time::Duration;

use axbridge_domain::{AxError, AxResult, TransportConfig};

/// Runs blocking accessibility work off the async executor.
#[derive(Debug, Clone, Copy, Default)]
pub struct BlockingExecutor {
    timeout: Option<Duration>,
}

impl BlockingExecutor {
    pub fn new(timeout: Option<Duration>) -> Self {
        Self { timeout }
    }

    pub fn from_config(config: &TransportConfig) -> Self {
        Self::new(config.call_timeout_ms.map(Duration::from_millis))
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Run `op` on the blocking pool.
    ///
    /// # Errors
    /// Whatever `op` returns, or `AxError::CannotComplete` if the timeout
    /// elapses first or the task panics.
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// let app = Arc::clone(&app);
    /// let title = executor.run(move || app.get(&keys::TITLE)).await?;
    /// ```
    pub async fn run<T, F>(&self, op: F) -> AxResult<T>
    where
        F: FnOnce() -> AxResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let task = tokio::task::spawn_blocking(op);

        let joined = match self.timeout {
            Some(limit) => match tokio::time::timeout(limit, task).await {
                Ok(joined) => joined,
                Err(_) => {
                    tracing::warn!(
                        timeout_ms = u64::try_from(limit.as_millis()).unwrap_or(u64::MAX),
                        "Accessibility call timed out"
                    );
                    return Err(AxError::CannotComplete);
                }
            },
            None => task.await,
        };

        joined.map_err(map_join_error)?
    }
}

/// Map a `tokio::task::JoinError` from `spawn_blocking` into the closed
/// accessibility error set.
#[inline]
pub(crate) fn map_join_error(err: tokio::task::JoinError) -> AxError {
    if err.is_cancelled() {
        tracing::warn!("Accessibility task cancelled");
    } else {
        tracing::error!(error = %err, "Accessibility task panicked");
    }
    AxError::CannotComplete
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_run_returns_value() {
        let executor = BlockingExecutor::default();
        let value = executor.run(|| Ok(21 * 2)).await.unwrap();
        assert_eq!(value, 42);
    }

    #[tokio::test]
    async fn test_run_passes_errors_through() {
        let executor = BlockingExecutor::default();
        let err = executor.run::<(), _>(|| Err(AxError::ActionUnsupported)).await.unwrap_err();
        assert_eq!(err, AxError::ActionUnsupported);
    }

    #[tokio::test]
    async fn test_timeout_maps_to_cannot_complete() {
        let executor = BlockingExecutor::new(Some(Duration::from_millis(20)));
        let err = executor
            .run(|| {
                std::thread::sleep(Duration::from_millis(300));
                Ok(())
            })
            .await
            .unwrap_err();
        assert_eq!(err, AxError::CannotComplete);
    }

    #[tokio::test]
    async fn test_panic_maps_to_cannot_complete() {
        let executor = BlockingExecutor::default();
        let err = executor.run::<(), _>(|| panic!("remote call blew up")).await.unwrap_err();
        assert_eq!(err, AxError::CannotComplete);
    }

    #[test]
    fn test_from_config() {
        let config = TransportConfig { messaging_timeout_secs: None, call_timeout_ms: Some(250) };
        assert_eq!(BlockingExecutor::from_config(&config).timeout(), Some(Duration::from_millis(250)));
        assert_eq!(BlockingExecutor::from_config(&TransportConfig::default()).timeout(), None);
    }
}
