//! Timeout enforcement.
//!
//! # Responsibilities
//! - Wrap each backend attempt with its own deadline
//! - Cancel the attempt when the deadline elapses
//!
//! # Design Decisions
//! - Uses Tokio's timeout facilities
//! - The attempt future is dropped on expiry, which aborts the underlying
//!   connection instead of leaving it running in the background
//! - Timeout errors are distinct from other errors until the caller folds them

use std::future::Future;
use std::time::Duration;
use thiserror::Error;
use tokio::time;

/// An attempt ran past its deadline and was cancelled.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Request to {url} timed out after {}ms.", .limit.as_millis())]
pub struct DeadlineExceeded {
    pub url: String,
    pub limit: Duration,
}

/// Run `fut` with a deadline of `limit`.
///
/// Each call owns its own timer, so cancelling one attempt never affects
/// another in-flight request.
pub async fn with_deadline<F, T, E>(url: &str, limit: Duration, fut: F) -> Result<T, E>
where
    F: Future<Output = Result<T, E>>,
    E: From<DeadlineExceeded>,
{
    match time::timeout(limit, fut).await {
        Ok(result) => result,
        Err(_) => {
            tracing::warn!(url = %url, timeout_ms = limit.as_millis() as u64, "Backend request timed out");
            Err(DeadlineExceeded {
                url: url.to_string(),
                limit,
            }
            .into())
        }
    }
}
