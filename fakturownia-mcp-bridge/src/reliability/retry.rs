//! Exponential backoff retry logic for transient failures.
//!
//! This module provides the bounded retry loop used by the request executor.
//! Each attempt reports an explicit [`AttemptOutcome`]; only
//! [`AttemptOutcome::Retryable`] consumes a retry slot.

use std::{fmt, time::Duration};

use rand::Rng;

use crate::BridgeError;

/// Configuration for retry behavior.
///
/// The delay before retry `n` (1-based) is `base_delay * 2^(n-1)` plus a uniform
/// random jitter in `[0, max_jitter)`.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
///
/// use fakturownia_mcp_bridge::reliability::RetryPolicy;
///
/// // Default policy: 3 retries (4 attempts), 1s base delay, up to 500ms jitter
/// let policy = RetryPolicy::default();
/// assert_eq!(policy.total_attempts(), 4);
///
/// // Fast policy for tests
/// let fast = RetryPolicy {
///     max_retries: 2,
///     base_delay: Duration::from_millis(10),
///     max_jitter: Duration::ZERO,
/// };
/// assert_eq!(fast.total_attempts(), 3);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Retries allowed after the first attempt (default: 3)
    pub max_retries: u32,
    /// Delay before the first retry (default: 1s)
    pub base_delay: Duration,
    /// Upper bound (exclusive) of the random jitter added to each delay (default: 500ms)
    pub max_jitter: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            base_delay: Duration::from_secs(1),
            max_jitter: Duration::from_millis(500),
        }
    }
}

impl RetryPolicy {
    /// Creates a policy with custom maximum retries and default delays.
    ///
    /// # Examples
    ///
    /// ```
    /// use fakturownia_mcp_bridge::reliability::RetryPolicy;
    ///
    /// let policy = RetryPolicy::with_max_retries(0);
    /// assert_eq!(policy.total_attempts(), 1);
    /// ```
    #[must_use]
    pub fn with_max_retries(max_retries: u32) -> Self {
        Self { max_retries, ..Self::default() }
    }

    /// Total attempts a logical call may make.
    #[must_use]
    pub const fn total_attempts(&self) -> u32 {
        self.max_retries.saturating_add(1)
    }

    /// Deterministic part of the delay before `attempt` (0-based attempt index).
    ///
    /// The first attempt never waits.
    #[must_use]
    pub fn base_delay_for_attempt(&self, attempt: u32) -> Duration {
        if attempt == 0 {
            return Duration::ZERO;
        }
        let factor = 2u32.saturating_pow(attempt - 1);
        self.base_delay.saturating_mul(factor)
    }

    /// Full delay before `attempt`, jitter included.
    #[must_use]
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        let base = self.base_delay_for_attempt(attempt);
        if attempt == 0 || self.max_jitter.is_zero() {
            return base;
        }
        let jitter = rand::thread_rng().gen_range(Duration::ZERO..self.max_jitter);
        base.saturating_add(jitter)
    }
}

/// Outcome of a single attempt.
#[derive(Debug)]
pub enum AttemptOutcome<T, E> {
    /// The attempt produced a value; the call is done.
    Success(T),
    /// Transient failure; the loop moves on if attempts remain.
    Retryable(E),
    /// Permanent failure; the call ends immediately.
    Fatal(E),
}

/// Terminal failure of a retried call.
#[derive(Debug)]
pub enum RetryFailure<E> {
    /// An attempt failed permanently.
    Fatal(E),
    /// Every allowed attempt failed transiently.
    Exhausted {
        /// Attempts made.
        attempts: u32,
        /// Error of the final attempt.
        last: E,
    },
}

impl<E: fmt::Display> fmt::Display for RetryFailure<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fatal(error) => write!(f, "{error}"),
            Self::Exhausted { attempts, last } => {
                write!(f, "gave up after {attempts} attempts: {last}")
            }
        }
    }
}

/// Executes operation with exponential backoff retry.
///
/// The operation receives the 0-based attempt index and is invoked at most
/// [`RetryPolicy::total_attempts`] times, strictly one after another. Sleeping
/// between attempts suspends only the calling task.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
///
/// use fakturownia_mcp_bridge::reliability::{AttemptOutcome, RetryPolicy, retry_with_backoff};
///
/// # async fn example() {
/// let policy =
///     RetryPolicy { max_retries: 3, base_delay: Duration::from_millis(1), max_jitter: Duration::ZERO };
///
/// let result = retry_with_backoff(&policy, |attempt| async move {
///     if attempt < 2 {
///         AttemptOutcome::Retryable("temporary failure".to_owned())
///     } else {
///         AttemptOutcome::Success(attempt)
///     }
/// })
/// .await;
///
/// assert_eq!(result.unwrap(), 2);
/// # }
/// ```
///
/// # Errors
///
/// Returns [`RetryFailure::Fatal`] as soon as an attempt fails permanently, or
/// [`RetryFailure::Exhausted`] with the last error once every attempt failed
/// transiently.
pub async fn retry_with_backoff<F, Fut, T, E>(
    policy: &RetryPolicy,
    mut operation: F,
) -> Result<T, RetryFailure<E>>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = AttemptOutcome<T, E>>,
    E: fmt::Display,
{
    let total_attempts = policy.total_attempts();
    let mut attempt = 0;

    loop {
        if attempt > 0 {
            let delay = policy.delay_for_attempt(attempt);
            tracing::debug!(delay_ms = delay.as_millis(), attempt = attempt + 1, "Sleeping before retry");
            tokio::time::sleep(delay).await;
        }

        match operation(attempt).await {
            AttemptOutcome::Success(value) => {
                if attempt > 0 {
                    tracing::info!(attempt = attempt + 1, "Operation succeeded after retry");
                }
                return Ok(value);
            }
            AttemptOutcome::Fatal(error) => {
                tracing::debug!(attempt = attempt + 1, error = %error, "Operation failed permanently");
                return Err(RetryFailure::Fatal(error));
            }
            AttemptOutcome::Retryable(error) => {
                tracing::warn!(
                    attempt = attempt + 1,
                    max_attempts = total_attempts,
                    error = %error,
                    "Operation failed, will retry if attempts remain"
                );

                attempt += 1;
                if attempt >= total_attempts {
                    return Err(RetryFailure::Exhausted { attempts: attempt, last: error });
                }
            }
        }
    }
}

/// Determines if an error is transient.
///
/// Returns `true` for failures the executor retries: timeouts, and 429/5xx
/// responses that exhausted their attempts (retrying at a higher level later
/// may succeed).
///
/// # Examples
///
/// ```
/// use fakturownia_mcp_bridge::{BridgeError, endpoint::HttpMethod, reliability::is_retryable};
///
/// let error = BridgeError::Api {
///     method: HttpMethod::Get,
///     path: "/invoices/1.json".to_owned(),
///     status: 404,
///     body: "Not Found".to_owned(),
/// };
/// assert!(!is_retryable(&error));
///
/// let error = BridgeError::InvalidInput("bad payload".to_owned());
/// assert!(!is_retryable(&error));
/// ```
#[must_use]
pub fn is_retryable(error: &BridgeError) -> bool {
    match error {
        BridgeError::RetriesExhausted { .. } | BridgeError::Timeout { .. } => true,
        BridgeError::Api { status, .. } => is_retryable_status(*status),
        BridgeError::HttpError(e) => e.is_timeout(),
        BridgeError::InvalidResponse { .. }
        | BridgeError::InvalidInput(_)
        | BridgeError::ConfigError(_)
        | BridgeError::UnknownOperation(_) => false,
    }
}

/// Whether a response status is transient: 429 or any 5xx.
#[must_use]
pub const fn is_retryable_status(status: u16) -> bool {
    matches!(status, 429 | 500..=599)
}
