//! Attempt state machine: `Attempting -> (Backoff -> Attempting)* -> Succeeded | Exhausted`.

use super::policy::{RetryDecision, RetryPolicy};
use std::time::Duration;

/// Where a fetch is in its attempt budget. Attempt numbers are 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryState {
    /// About to perform attempt `n`.
    Attempting(u32),
    /// Attempt `attempt` failed; wait `delay` before the next one.
    Backoff { attempt: u32, delay: Duration },
    /// Attempt `n` succeeded.
    Succeeded(u32),
    /// Attempt `n` failed and no attempts remain.
    Exhausted(u32),
}

impl RetryState {
    pub fn start() -> Self {
        RetryState::Attempting(1)
    }

    /// Record that the current attempt succeeded.
    pub fn on_success(self) -> Self {
        match self {
            RetryState::Attempting(n) => RetryState::Succeeded(n),
            other => other,
        }
    }

    /// Record a transport failure for the current attempt.
    pub fn on_transport_error(self, policy: &RetryPolicy) -> Self {
        match self {
            RetryState::Attempting(n) => match policy.decide(n) {
                RetryDecision::NoRetry => RetryState::Exhausted(n),
                RetryDecision::RetryAfter(delay) => RetryState::Backoff { attempt: n, delay },
            },
            other => other,
        }
    }

    /// Leave the backoff pause and move to the next attempt.
    pub fn after_backoff(self) -> Self {
        match self {
            RetryState::Backoff { attempt, .. } => RetryState::Attempting(attempt + 1),
            other => other,
        }
    }

    /// Attempts started so far.
    pub fn attempts(&self) -> u32 {
        match *self {
            RetryState::Attempting(n) | RetryState::Succeeded(n) | RetryState::Exhausted(n) => n,
            RetryState::Backoff { attempt, .. } => attempt,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, RetryState::Succeeded(_) | RetryState::Exhausted(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy(max: u32) -> RetryPolicy {
        RetryPolicy::new(max, Duration::from_millis(500))
    }

    #[test]
    fn success_on_first_attempt() {
        let s = RetryState::start().on_success();
        assert_eq!(s, RetryState::Succeeded(1));
        assert!(s.is_terminal());
        assert_eq!(s.attempts(), 1);
    }

    #[test]
    fn failures_alternate_with_backoff_until_exhausted() {
        let p = policy(3);
        let mut s = RetryState::start();
        let mut trace = vec![s];
        while !s.is_terminal() {
            s = match s {
                RetryState::Attempting(_) => s.on_transport_error(&p),
                RetryState::Backoff { .. } => s.after_backoff(),
                _ => unreachable!(),
            };
            trace.push(s);
        }
        let d = Duration::from_millis(500);
        assert_eq!(
            trace,
            vec![
                RetryState::Attempting(1),
                RetryState::Backoff { attempt: 1, delay: d },
                RetryState::Attempting(2),
                RetryState::Backoff { attempt: 2, delay: d },
                RetryState::Attempting(3),
                RetryState::Exhausted(3),
            ]
        );
    }

    #[test]
    fn no_backoff_after_last_attempt() {
        let s = RetryState::start().on_transport_error(&policy(1));
        assert_eq!(s, RetryState::Exhausted(1));
    }

    #[test]
    fn recovers_after_failures() {
        let p = policy(3);
        let s = RetryState::start()
            .on_transport_error(&p)
            .after_backoff()
            .on_transport_error(&p)
            .after_backoff()
            .on_success();
        assert_eq!(s, RetryState::Succeeded(3));
    }

    #[test]
    fn terminal_states_ignore_events() {
        let p = policy(3);
        let done = RetryState::Succeeded(2);
        assert_eq!(done.on_transport_error(&p), done);
        assert_eq!(done.after_backoff(), done);
        let spent = RetryState::Exhausted(3);
        assert_eq!(spent.on_success(), spent);
    }
}
