//! Retry logic with exponential backoff
//!
//! Retries an async operation on transient failures:
//! - Every failure is classified before the retry decision
//! - Delays grow geometrically and are capped
//! - Attempts never overlap
//!
//! # Example
//!
//! ```rust,no_run
//! use spinovo_core::error::{AppError, ErrorClassifier};
//! use spinovo_core::retry::{RetryConfig, RetryPolicy};
//!
//! # async fn example() -> Result<(), AppError> {
//! let policy = RetryPolicy::new(RetryConfig::default())
//!     .when(|err| err.is_retryable() && !err.is_authentication());
//!
//! let value = policy
//!     .run(&ErrorClassifier::default(), "example", || async {
//!         Ok::<_, AppError>("success")
//!     })
//!     .await?;
//! # Ok(())
//! # }
//! ```

use crate::error::{AppError, ErrorClassifier, Failure};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, warn};

/// Retry configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryConfig {
    /// Maximum number of invocations, including the first
    pub max_attempts: u32,
    /// Delay after the first failed attempt
    #[serde(with = "duration_ms", rename = "initial_delay_ms")]
    pub initial_delay: Duration,
    /// Multiplier for exponential backoff
    pub backoff_multiplier: f64,
    /// Upper bound for any single delay
    #[serde(with = "duration_ms", rename = "max_delay_ms")]
    pub max_delay: Duration,
}

mod duration_ms {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        u64::try_from(duration.as_millis())
            .unwrap_or(u64::MAX)
            .serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let millis = u64::deserialize(deserializer)?;
        Ok(Duration::from_millis(millis))
    }
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_delay: Duration::from_millis(1000),
            backoff_multiplier: 2.0,
            max_delay: Duration::from_millis(10_000),
        }
    }
}

impl RetryConfig {
    /// Short delays, for local development
    pub fn quick() -> Self {
        Self {
            max_attempts: 3,
            initial_delay: Duration::from_millis(50),
            backoff_multiplier: 2.0,
            max_delay: Duration::from_millis(500),
        }
    }

    /// A single attempt
    pub fn no_retry() -> Self {
        Self {
            max_attempts: 1,
            initial_delay: Duration::ZERO,
            backoff_multiplier: 1.0,
            max_delay: Duration::ZERO,
        }
    }

    /// Attempts actually made; zero is treated as one
    pub fn effective_attempts(&self) -> u32 {
        self.max_attempts.max(1)
    }

    /// Delay to wait after the given (1-based) failed attempt
    ///
    /// `min(initial_delay * backoff_multiplier^(attempt - 1), max_delay)`
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        if attempt == 0 {
            return Duration::ZERO;
        }

        let exponent = i32::try_from(attempt - 1).unwrap_or(i32::MAX);
        let base_delay = self.initial_delay.as_secs_f64() * self.backoff_multiplier.powi(exponent);
        let delay_secs = base_delay.min(self.max_delay.as_secs_f64());

        if delay_secs.is_finite() && delay_secs > 0.0 {
            Duration::from_secs_f64(delay_secs)
        } else {
            Duration::ZERO
        }
    }
}

type RetryPredicate = Arc<dyn Fn(&AppError) -> bool + Send + Sync>;

/// Retry policy: configuration plus a retryability predicate
#[derive(Clone)]
pub struct RetryPolicy {
    config: RetryConfig,
    should_retry: RetryPredicate,
}

impl fmt::Debug for RetryPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RetryPolicy")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(RetryConfig::default())
    }
}

impl RetryPolicy {
    /// Create a policy that retries on [`AppError::is_retryable`]
    pub fn new(config: RetryConfig) -> Self {
        Self {
            config,
            should_retry: Arc::new(AppError::is_retryable),
        }
    }

    /// Replace the retryability predicate
    #[must_use]
    pub fn when<P>(mut self, predicate: P) -> Self
    where
        P: Fn(&AppError) -> bool + Send + Sync + 'static,
    {
        self.should_retry = Arc::new(predicate);
        self
    }

    /// The configuration in use
    pub fn config(&self) -> &RetryConfig {
        &self.config
    }

    /// Run `operation` until it succeeds, fails terminally, or attempts run out
    ///
    /// The operation is invoked at most `max_attempts` times. The last
    /// classified error is returned without a trailing delay.
    pub async fn run<T, E, F, Fut>(
        &self,
        classifier: &ErrorClassifier,
        context: &str,
        mut operation: F,
    ) -> Result<T, AppError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: Into<Failure>,
    {
        let max_attempts = self.config.effective_attempts();
        let mut attempt = 1;

        loop {
            debug!(context, attempt, max_attempts, "Attempt {attempt}/{max_attempts}");

            let err = match operation().await {
                Ok(value) => return Ok(value),
                Err(e) => classifier.classify(e, Some(context)),
            };

            if attempt >= max_attempts || !(self.should_retry)(&err) {
                error!(
                    context,
                    attempts = attempt,
                    code = err.code(),
                    error = %err,
                    "Operation failed after {attempt} attempts"
                );
                return Err(err);
            }

            let delay = self.config.delay_for_attempt(attempt);
            warn!(
                context,
                attempt,
                delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                error = %err,
                "Attempt {attempt} failed, retrying in {}ms",
                delay.as_millis()
            );
            tokio::time::sleep(delay).await;
            attempt += 1;
        }
    }
}
