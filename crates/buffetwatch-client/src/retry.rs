//! Retry with linear backoff for the buffet pricing client.
//!
//! [`retry_linear`] wraps a fallible async operation and retries on transient
//! errors (network failures, non-2xx statuses). A 200 whose body fails to
//! deserialize is returned immediately: retrying cannot fix a malformed body.

use std::future::Future;
use std::time::Duration;

use crate::error::ClientError;

/// Returns `true` for errors that are worth retrying after a backoff delay.
///
/// **Retriable:**
/// - [`ClientError::Http`] — network-level failure: timeout, connection reset.
/// - [`ClientError::UnexpectedStatus`] — the upstream answered with a non-200
///   status; observed to clear up on a later attempt.
///
/// **Not retriable (hard stop):**
/// - [`ClientError::Deserialize`] — malformed response body; retrying won't fix it.
/// - [`ClientError::InvalidBaseUrl`] — construction-time config error.
pub(crate) fn is_retriable(err: &ClientError) -> bool {
    matches!(
        err,
        ClientError::Http(_) | ClientError::UnexpectedStatus { .. }
    )
}

/// Runs `operation` up to `max_attempts` total times, sleeping between
/// attempts on transient errors.
///
/// The delay grows linearly with the attempt number: the sleep after the n-th
/// failed attempt is `backoff_base_ms * n`.
///
/// # Backoff schedule (example with `backoff_base_ms = 2_000`)
///
/// | Attempt | Sleep before next attempt |
/// |---------|---------------------------|
/// | 1       | 2 000 ms                  |
/// | 2       | 4 000 ms                  |
/// | 3       | — (budget exhausted)      |
///
/// `max_attempts` below 1 is treated as 1. Non-retriable errors are returned
/// immediately; once the budget is exhausted the last error is returned.
pub(crate) async fn retry_linear<T, F, Fut>(
    max_attempts: u32,
    backoff_base_ms: u64,
    mut operation: F,
) -> Result<T, ClientError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, ClientError>>,
{
    let max_attempts = max_attempts.max(1);
    let mut attempt = 1u32;

    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(err) => {
                if !is_retriable(&err) || attempt >= max_attempts {
                    return Err(err);
                }
                let delay_ms = backoff_base_ms.saturating_mul(u64::from(attempt));
                tracing::warn!(
                    attempt,
                    max_attempts,
                    delay_ms,
                    error = %err,
                    "transient upstream error — retrying after backoff"
                );
                tokio::time::sleep(Duration::from_millis(delay_ms)).await;
                attempt += 1;
            }
        }
    }
}
