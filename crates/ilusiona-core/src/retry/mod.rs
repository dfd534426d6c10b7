//! Retry and backoff policy.
//!
//! A fixed-backoff policy plus an explicit attempt state machine, so attempt
//! counting and backoff placement can be tested without any I/O.

mod policy;
mod state;

pub use policy::{RetryDecision, RetryPolicy, DEFAULT_BACKOFF, DEFAULT_MAX_ATTEMPTS};
pub use state::RetryState;
