use std::collections::HashMap;
use std::sync::{Mutex, OnceLock, PoisonError};
use std::time::{Duration, Instant};

#[derive(Debug)]
struct WindowState {
    window_started_at: Instant,
    suppressed: u64,
}

/// Per-key rate limiter for log lines emitted from hot paths.
#[derive(Debug, Default)]
pub struct LogThrottle {
    windows: Mutex<HashMap<String, WindowState>>,
}

impl LogThrottle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `Some(suppressed_count)` when a log for `key` should be emitted,
    /// otherwise `None` and the event is counted as suppressed for the active window.
    pub fn should_emit_at(&self, key: &str, interval: Duration, now: Instant) -> Option<u64> {
        let mut windows = self.windows.lock().unwrap_or_else(PoisonError::into_inner);

        match windows.get_mut(key) {
            Some(state) if now.duration_since(state.window_started_at) >= interval => {
                let suppressed = state.suppressed;
                state.window_started_at = now;
                state.suppressed = 0;
                Some(suppressed)
            }
            Some(state) => {
                state.suppressed += 1;
                None
            }
            None => {
                windows.insert(
                    key.to_string(),
                    WindowState {
                        window_started_at: now,
                        suppressed: 0,
                    },
                );
                Some(0)
            }
        }
    }
}

static GLOBAL_THROTTLE: OnceLock<LogThrottle> = OnceLock::new();

/// [`LogThrottle::should_emit_at`] on the process-wide throttle, at the current instant.
pub fn should_emit(key: &str, interval: Duration) -> Option<u64> {
    GLOBAL_THROTTLE
        .get_or_init(LogThrottle::new)
        .should_emit_at(key, interval, Instant::now())
}
