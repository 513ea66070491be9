//! Rate limit errors.

use std::time::Duration;

use reqwest::header::{HeaderMap, RETRY_AFTER};
use thiserror::Error;

/// Wait time assumed when a 429 response carries no usable `Retry-After`.
pub const DEFAULT_RETRY_AFTER: Duration = Duration::from_secs(60);

/// The server rate limited the caller (HTTP 429).
///
/// The client does not wait or retry on its own; callers decide whether to
/// re-issue the request after [`retry_after`](Self::retry_after).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Rate limited. Retry after {} seconds", .retry_after.as_secs())]
pub struct RateLimitError {
    retry_after: Duration,
}

impl RateLimitError {
    /// Creates a rate limit error with an explicit wait time.
    pub fn new(retry_after: Duration) -> Self {
        Self { retry_after }
    }

    /// Reads the wait time from the `Retry-After` response header.
    ///
    /// Only the integer-seconds form is understood; a missing or unparseable
    /// header yields [`DEFAULT_RETRY_AFTER`].
    pub(crate) fn from_headers(headers: &HeaderMap) -> Self {
        let retry_after = headers
            .get(RETRY_AFTER)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.trim().parse::<u64>().ok())
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_RETRY_AFTER);
        Self { retry_after }
    }

    /// How long to wait before retrying.
    pub fn retry_after(&self) -> Duration {
        self.retry_after
    }
}
