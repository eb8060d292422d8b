//! Throttling port for sign-in attempts.

use async_trait::async_trait;
use std::time::Duration;

/// Per-client attempt limiter.
#[async_trait]
pub trait RateLimiter: Send + Sync {
    /// Record one attempt by `client` and decide whether it may proceed.
    async fn check(&self, client: &str) -> Result<RateLimitDecision, RateLimitError>;
}

/// Outcome of recording an attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateLimitDecision {
    Allowed,
    /// Rejected; the client may retry after the given delay.
    Limited { retry_after: Duration },
}

#[derive(Debug, thiserror::Error)]
pub enum RateLimitError {
    #[error("Rate limiter unavailable: {0}")]
    Backend(String),
}
