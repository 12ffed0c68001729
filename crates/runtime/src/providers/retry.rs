//! Bounded retry with exponential backoff around provider fetches.

use std::time::Duration;

use guess_core::CharacterName;

use crate::api::{CharacterProvider, Result, RuntimeError};

/// How hard the runtime tries before giving up on starting a round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total fetch attempts, including the first. At least 1.
    pub max_attempts: u32,
    /// Delay before the first retry; doubled after each failure.
    pub initial_backoff: Duration,
    pub max_backoff: Duration,
}

impl RetryPolicy {
    pub const DEFAULT_MAX_ATTEMPTS: u32 = 5;
    pub const DEFAULT_INITIAL_BACKOFF: Duration = Duration::from_millis(250);
    pub const DEFAULT_MAX_BACKOFF: Duration = Duration::from_secs(5);

    pub fn new(max_attempts: u32, initial_backoff: Duration, max_backoff: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            initial_backoff,
            max_backoff,
        }
    }

    /// No backoff between attempts.
    pub fn immediate(max_attempts: u32) -> Self {
        Self::new(max_attempts, Duration::ZERO, Duration::ZERO)
    }

    /// Delay slept after the `failures`-th failed attempt (1-based).
    pub fn backoff_after(&self, failures: u32) -> Duration {
        let factor = 2u32.saturating_pow(failures.saturating_sub(1));
        self.initial_backoff
            .saturating_mul(factor)
            .min(self.max_backoff)
    }

    /// Fetches from `provider`, retrying transient failures.
    ///
    /// Permanent failures stop immediately. Either way the last error is
    /// returned as [`RuntimeError::RoundStartFailed`].
    pub async fn fetch<P>(&self, provider: &P) -> Result<CharacterName>
    where
        P: CharacterProvider + ?Sized,
    {
        let mut attempt = 0;
        loop {
            attempt += 1;
            match provider.fetch().await {
                Ok(name) => return Ok(name),
                Err(err) if err.is_transient() && attempt < self.max_attempts => {
                    let delay = self.backoff_after(attempt);
                    tracing::warn!(
                        attempt,
                        max_attempts = self.max_attempts,
                        ?delay,
                        "character fetch failed, retrying: {}",
                        err
                    );
                    tokio::time::sleep(delay).await;
                }
                Err(err) => {
                    tracing::error!(attempt, "character fetch gave up: {}", err);
                    return Err(RuntimeError::RoundStartFailed {
                        attempts: attempt,
                        source: err,
                    });
                }
            }
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(
            Self::DEFAULT_MAX_ATTEMPTS,
            Self::DEFAULT_INITIAL_BACKOFF,
            Self::DEFAULT_MAX_BACKOFF,
        )
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU32, Ordering};

    use async_trait::async_trait;

    use super::*;
    use crate::api::ProviderError;

    /// Fails with a 503 for the first `failures` calls.
    struct FlakyProvider {
        failures: u32,
        calls: AtomicU32,
    }

    impl FlakyProvider {
        fn new(failures: u32) -> Self {
            Self {
                failures,
                calls: AtomicU32::new(0),
            }
        }
    }

    #[async_trait]
    impl CharacterProvider for FlakyProvider {
        async fn fetch(&self) -> std::result::Result<CharacterName, ProviderError> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
            if call <= self.failures {
                Err(ProviderError::Status(503))
            } else {
                Ok(CharacterName::new("Hinata Hyuga").unwrap())
            }
        }
    }

    struct EmptyProvider;

    #[async_trait]
    impl CharacterProvider for EmptyProvider {
        async fn fetch(&self) -> std::result::Result<CharacterName, ProviderError> {
            Err(ProviderError::EmptyCatalog)
        }
    }

    #[test]
    fn test_backoff_doubles_and_caps() {
        let policy = RetryPolicy::new(
            10,
            Duration::from_millis(100),
            Duration::from_millis(500),
        );

        assert_eq!(policy.backoff_after(1), Duration::from_millis(100));
        assert_eq!(policy.backoff_after(2), Duration::from_millis(200));
        assert_eq!(policy.backoff_after(3), Duration::from_millis(400));
        assert_eq!(policy.backoff_after(4), Duration::from_millis(500));
        assert_eq!(policy.backoff_after(40), Duration::from_millis(500));
    }

    #[test]
    fn test_at_least_one_attempt() {
        assert_eq!(RetryPolicy::immediate(0).max_attempts, 1);
    }

    #[tokio::test]
    async fn test_recovers_after_transient_failures() {
        let provider = FlakyProvider::new(2);
        let name = RetryPolicy::immediate(3).fetch(&provider).await.unwrap();

        assert_eq!(name.display(), "Hinata Hyuga");
        assert_eq!(provider.calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_gives_up_after_max_attempts() {
        let provider = FlakyProvider::new(u32::MAX);
        let err = RetryPolicy::immediate(4).fetch(&provider).await.unwrap_err();

        assert!(matches!(
            err,
            RuntimeError::RoundStartFailed {
                attempts: 4,
                source: ProviderError::Status(503)
            }
        ));
        assert_eq!(provider.calls.load(Ordering::SeqCst), 4);
    }

    #[tokio::test]
    async fn test_permanent_error_not_retried() {
        let err = RetryPolicy::immediate(5)
            .fetch(&EmptyProvider)
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            RuntimeError::RoundStartFailed {
                attempts: 1,
                source: ProviderError::EmptyCatalog
            }
        ));
    }
}
