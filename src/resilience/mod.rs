//! Resilience subsystem.
//!
//! # Data Flow
//! ```text
//! Request to backends:
//!     → failover.rs (ordered candidates, first success wins)
//!     → timeouts.rs (per-attempt deadline, cancel on expiry)
//!     → on failure: next candidate, or the most recent error
//! ```
//!
//! # Design Decisions
//! - Timeouts are non-negotiable; every external call has a deadline
//! - One attempt per candidate; no backoff, no retry budget
//! - Attempts are sequential to avoid duplicate backend work

pub mod failover;
pub mod timeouts;

pub use failover::{first_success, AttemptRole, Exhausted, Served};
pub use timeouts::{with_deadline, DeadlineExceeded};
