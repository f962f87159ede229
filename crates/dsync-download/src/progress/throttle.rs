//! Rate limiting for live transfer updates.

use std::time::{Duration, Instant};

/// Interval between live updates for one transfer.
pub const DEFAULT_UPDATE_INTERVAL: Duration = Duration::from_millis(100);

/// Decides when a running transfer reports its byte count.
///
/// Updates are spaced by at least `min_interval`, except the one that
/// reaches the file size, which always goes through.
#[derive(Debug)]
pub struct ProgressThrottle {
    min_interval: Duration,
    last_emit: Option<Instant>,
    completed: bool,
}

impl ProgressThrottle {
    /// Throttle spacing updates by at least `min_interval`.
    pub const fn new(min_interval: Duration) -> Self {
        Self {
            min_interval,
            last_emit: None,
            completed: false,
        }
    }

    /// Whether an update at `received` of `total` bytes should be emitted.
    pub fn admit(&mut self, received: u64, total: u64) -> bool {
        if self.completed {
            return false;
        }
        let now = Instant::now();
        if received >= total {
            self.completed = true;
            self.last_emit = Some(now);
            return true;
        }
        let due = self
            .last_emit
            .is_none_or(|last| now.duration_since(last) >= self.min_interval);
        if due {
            self.last_emit = Some(now);
        }
        due
    }
}

impl Default for ProgressThrottle {
    fn default() -> Self {
        Self::new(DEFAULT_UPDATE_INTERVAL)
    }
}
