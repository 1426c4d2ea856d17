//! Reliability patterns for Fakturownia API calls.
//!
//! Provides the bounded, jittered exponential backoff used to ride out rate
//! limiting and transient server failures.

mod retry;


pub use retry::{
    AttemptOutcome, RetryFailure, RetryPolicy, is_retryable, is_retryable_status,
    retry_with_backoff,
};
