use std::time::{Duration, Instant};

use parking_lot::Mutex;

/// How often to emit warnings about failed deliveries by default.
pub const DEFAULT_WARN_INTERVAL: Duration = Duration::from_secs(5);

/// Helper that rate limits delivery-failure warnings.
///
/// The caller increments the counter via [`record`](Self::record). The next
/// call to [`warn_if_due`](Self::warn_if_due) emits a warning through the
/// provided callback if the configured interval has elapsed.
/// [`flush`](Self::flush) emits a warning immediately if anything was recorded
/// since the last emission.
#[derive(Debug)]
pub struct RateLimitedWarner {
    interval: Duration,
    state: Mutex<WarnState>,
}

#[derive(Debug, Default)]
struct WarnState {
    last_warn: Option<Instant>,
    pending: u64,
}

impl Default for RateLimitedWarner {
    fn default() -> Self {
        Self::new(DEFAULT_WARN_INTERVAL)
    }
}

impl RateLimitedWarner {
    /// Create a warner whose first warning can be emitted immediately.
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            state: Mutex::new(WarnState::default()),
        }
    }

    /// Increment the pending counter.
    pub fn record(&self) {
        self.state.lock().pending += 1;
    }

    /// Emit a warning if the rate limit interval has elapsed.
    pub fn warn_if_due(&self, warn: impl FnOnce(u64)) {
        let now = Instant::now();
        let mut state = self.state.lock();
        let due = state
            .last_warn
            .is_none_or(|last| now.duration_since(last) >= self.interval);
        if due && state.pending > 0 {
            let count = std::mem::take(&mut state.pending);
            state.last_warn = Some(now);
            drop(state);
            warn(count);
        }
    }

    /// Immediately warn about anything recorded since the last emission.
    pub fn flush(&self, warn: impl FnOnce(u64)) {
        let mut state = self.state.lock();
        if state.pending > 0 {
            let count = std::mem::take(&mut state.pending);
            state.last_warn = Some(Instant::now());
            drop(state);
            warn(count);
        }
    }
}
