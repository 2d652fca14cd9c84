//! Reconnection scheduling for the network target.
//!
//! The consumer thread must never sleep on behalf of one target, so instead
//! of blocking this state machine hands out the earliest instant at which
//! the next connection attempt is allowed.

use std::time::{Duration, Instant};

use rand::{Rng, SeedableRng, rngs::StdRng};

use super::config::BackoffPolicy;

const MIN_DELAY_MS: u64 = 10;

/// Tracks reconnection attempts and produces jittered deadlines.
pub struct BackoffState {
    policy: BackoffPolicy,
    current: Duration,
    retry_at: Option<Instant>,
    rng: StdRng,
}

impl BackoffState {
    pub fn new(policy: BackoffPolicy) -> Self {
        Self {
            current: policy.base,
            retry_at: None,
            rng: StdRng::from_entropy(),
            policy,
        }
    }

    /// Whether a connection attempt may be made at `now`.
    pub fn may_attempt(&self, now: Instant) -> bool {
        self.retry_at.is_none_or(|at| now >= at)
    }

    /// Clear the failure window after a successful connect or write.
    pub fn record_success(&mut self) {
        self.current = self.policy.base;
        self.retry_at = None;
    }

    /// Schedule the next attempt after a failure and return its delay.
    pub fn record_failure(&mut self, now: Instant) -> Duration {
        let max_ms = self.current.as_millis().min(u128::from(u64::MAX)) as u64;
        let delay_ms = match max_ms {
            0 => MIN_DELAY_MS,
            1..=MIN_DELAY_MS => max_ms,
            _ => self.rng.gen_range(MIN_DELAY_MS..=max_ms),
        };
        let delay = Duration::from_millis(delay_ms);
        self.retry_at = Some(now + delay);
        self.current = self.current.saturating_mul(2).min(self.policy.cap);
        delay
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy(base_ms: u64, cap_ms: u64) -> BackoffPolicy {
        BackoffPolicy {
            base: Duration::from_millis(base_ms),
            cap: Duration::from_millis(cap_ms),
        }
    }

    #[test]
    fn fresh_state_allows_attempts() {
        let state = BackoffState::new(BackoffPolicy::default());
        assert!(state.may_attempt(Instant::now()));
    }

    #[test]
    fn failure_defers_next_attempt() {
        let mut state = BackoffState::new(policy(100, 1_000));
        let now = Instant::now();
        let delay = state.record_failure(now);
        assert!(delay >= Duration::from_millis(MIN_DELAY_MS));
        assert!(delay <= Duration::from_millis(100));
        assert!(!state.may_attempt(now));
        assert!(state.may_attempt(now + delay));
    }

    #[test]
    fn delays_grow_up_to_the_cap() {
        let mut state = BackoffState::new(policy(100, 400));
        let now = Instant::now();
        for _ in 0..10 {
            let delay = state.record_failure(now);
            assert!(delay <= Duration::from_millis(400));
        }
        assert_eq!(state.current, Duration::from_millis(400));
    }

    #[test]
    fn success_resets_window() {
        let mut state = BackoffState::new(policy(100, 400));
        let now = Instant::now();
        state.record_failure(now);
        state.record_failure(now);
        state.record_success();
        assert!(state.may_attempt(now));
        assert_eq!(state.current, Duration::from_millis(100));
    }

    #[test]
    fn tiny_base_uses_exact_delay() {
        let mut state = BackoffState::new(policy(5, 5));
        assert_eq!(state.record_failure(Instant::now()), Duration::from_millis(5));
    }
}
