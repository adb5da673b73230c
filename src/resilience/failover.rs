//! Ordered failover across candidate backends.
//!
//! # Responsibilities
//! - Try candidates strictly in order, one at a time
//! - Stop at the first success
//! - Keep the most recent failure when every candidate fails
//!
//! # Design Decisions
//! - Sequential, never parallel: a fallback is dispatched only after the
//!   previous attempt has definitively failed
//! - Exactly one attempt per candidate; no retries on top

use std::fmt;
use std::future::Future;

/// Ordering role of a candidate within one attempt sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttemptRole {
    Primary,
    Fallback,
}

impl AttemptRole {
    pub fn for_index(index: usize) -> Self {
        if index == 0 {
            AttemptRole::Primary
        } else {
            AttemptRole::Fallback
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AttemptRole::Primary => "primary",
            AttemptRole::Fallback => "fallback",
        }
    }

    /// Capitalised form used at the start of a sentence.
    pub fn title(&self) -> &'static str {
        match self {
            AttemptRole::Primary => "Primary",
            AttemptRole::Fallback => "Fallback",
        }
    }
}

impl fmt::Display for AttemptRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Every candidate was tried and none succeeded.
#[derive(Debug)]
pub struct Exhausted<E> {
    pub attempts: usize,
    pub last_error: Option<E>,
}

/// Successful attempt and the index of the candidate that served it.
#[derive(Debug)]
pub struct Served<T> {
    pub index: usize,
    pub value: T,
}

/// Run `attempt` against each candidate in order until one succeeds.
pub async fn first_success<K, T, E, F, Fut>(
    candidates: &[K],
    mut attempt: F,
) -> Result<Served<T>, Exhausted<E>>
where
    K: Clone + fmt::Display,
    E: fmt::Display,
    F: FnMut(AttemptRole, K) -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    let mut last_error = None;

    for (index, candidate) in candidates.iter().enumerate() {
        let role = AttemptRole::for_index(index);
        match attempt(role, candidate.clone()).await {
            Ok(value) => {
                if index > 0 {
                    tracing::info!(backend = %candidate, role = %role, "Fallback backend succeeded");
                }
                return Ok(Served { index, value });
            }
            Err(e) => {
                match candidates.get(index + 1) {
                    Some(next) => tracing::info!(
                        backend = %candidate,
                        next = %next,
                        error = %e,
                        "Backend attempt failed, trying next backend"
                    ),
                    None if candidates.len() == 1 => tracing::info!(
                        backend = %candidate,
                        error = %e,
                        "Backend attempt failed and no alternative is configured"
                    ),
                    None => {}
                }
                last_error = Some(e);
            }
        }
    }

    Err(Exhausted {
        attempts: candidates.len(),
        last_error,
    })
}
