//! Retry policy for quote requests.
//!
//! [`retry_with_backoff`] wraps one fallible async attempt and repeats it on
//! transient errors only (per-attempt timeouts and transport failures).
//! Everything the provider actually answered, including failing statuses and
//! payload-level errors, is returned immediately.

use std::future::Future;
use std::time::Duration;

use innfare_core::BackoffKind;

use crate::error::QuoteError;

/// Upper bound on any single backoff sleep.
const MAX_DELAY_MS: u64 = 60_000;

/// How many times to retry and how long to wait in between.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Additional attempts after the first failure.
    pub max_retries: u32,
    /// Base delay in milliseconds.
    pub backoff_ms: u64,
    pub kind: BackoffKind,
}

impl Default for RetryPolicy {
    /// One retry after a fixed one-second pause.
    fn default() -> Self {
        Self {
            max_retries: 1,
            backoff_ms: 1_000,
            kind: BackoffKind::Fixed,
        }
    }
}

impl RetryPolicy {
    /// No retries at all.
    #[must_use]
    pub fn none() -> Self {
        Self {
            max_retries: 0,
            ..Self::default()
        }
    }

    /// Sleep before retry number `retry` (1-based).
    ///
    /// | Kind          | Delay                                  |
    /// |---------------|----------------------------------------|
    /// | `Fixed`       | `backoff_ms`                           |
    /// | `Exponential` | `backoff_ms × 2^(retry-1)` ± 25 % jitter |
    ///
    /// Both are capped at 60 s.
    #[must_use]
    pub fn delay_for(&self, retry: u32) -> Duration {
        let capped = match self.kind {
            BackoffKind::Fixed => self.backoff_ms.min(MAX_DELAY_MS),
            BackoffKind::Exponential => {
                let exp = retry.saturating_sub(1).min(10);
                let computed = self.backoff_ms.saturating_mul(1u64 << exp);
                let capped = computed.min(MAX_DELAY_MS);
                #[allow(
                    clippy::cast_possible_truncation,
                    clippy::cast_sign_loss,
                    clippy::cast_precision_loss
                )]
                let jittered = (capped as f64 * (rand::random::<f64>() * 0.5 + 0.75)) as u64;
                jittered.min(MAX_DELAY_MS)
            }
        };
        Duration::from_millis(capped)
    }
}

/// Returns `true` for errors that are worth another attempt.
///
/// **Retriable:** [`QuoteError::Timeout`] and [`QuoteError::Http`]
/// (connection refused/reset, TLS, body read failures).
///
/// **Not retriable:** anything the provider answered deliberately
/// ([`QuoteError::UnexpectedStatus`], [`QuoteError::Upstream`]), malformed
/// bodies, and configuration problems.
pub(crate) fn is_retriable(err: &QuoteError) -> bool {
    match err {
        QuoteError::Timeout { .. } | QuoteError::Http(_) => true,
        QuoteError::MissingApiKey
        | QuoteError::InvalidBaseUrl { .. }
        | QuoteError::UnexpectedStatus { .. }
        | QuoteError::Upstream(_)
        | QuoteError::Deserialize { .. }
        | QuoteError::NotAnObject => false,
    }
}

/// Runs `operation` with up to `policy.max_retries` additional attempts on
/// transient errors. The last error is returned once retries are exhausted.
pub(crate) async fn retry_with_backoff<T, F, Fut>(
    policy: RetryPolicy,
    mut operation: F,
) -> Result<T, QuoteError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, QuoteError>>,
{
    let mut attempt = 0u32;
    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(err) => {
                if !is_retriable(&err) || attempt >= policy.max_retries {
                    return Err(err);
                }
                attempt += 1;
                let delay = policy.delay_for(attempt);
                tracing::warn!(
                    attempt,
                    max_retries = policy.max_retries,
                    delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                    error = %err,
                    "transient quote error, retrying after backoff"
                );
                tokio::time::sleep(delay).await;
            }
        }
    }
}
