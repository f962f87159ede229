//! Live byte counting for one running transfer.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use super::sink::{DispatchEvent, ProgressSink};
use super::throttle::ProgressThrottle;

/// Shared byte counter for one file.
///
/// Segment workers add to it concurrently. Updates reach the sink at most
/// once per throttle interval, plus one when the last byte arrives. This
/// never touches the batch aggregate.
pub struct TransferProgress {
    path: String,
    total: u64,
    received: AtomicU64,
    throttle: Mutex<ProgressThrottle>,
    sink: Arc<dyn ProgressSink>,
}

impl TransferProgress {
    /// Create a counter reporting to `sink`.
    pub fn new(path: impl Into<String>, total: u64, sink: Arc<dyn ProgressSink>) -> Self {
        Self::with_throttle(path, total, sink, ProgressThrottle::default())
    }

    /// Create a counter with a custom throttle.
    pub fn with_throttle(
        path: impl Into<String>,
        total: u64,
        sink: Arc<dyn ProgressSink>,
        throttle: ProgressThrottle,
    ) -> Self {
        Self {
            path: path.into(),
            total,
            received: AtomicU64::new(0),
            throttle: Mutex::new(throttle),
            sink,
        }
    }

    /// Record `bytes` more received bytes.
    pub fn add(&self, bytes: u64) {
        let received = self.received.fetch_add(bytes, Ordering::Relaxed) + bytes;

        let admitted = if received >= self.total {
            self.throttle
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .admit(received, self.total)
        } else {
            // Another worker holding the lock is about to emit anyway
            self.throttle
                .try_lock()
                .is_ok_and(|mut throttle| throttle.admit(received, self.total))
        };
        if admitted {
            self.sink.on_event(&DispatchEvent::TransferProgress {
                path: &self.path,
                received,
                total: self.total,
            });
        }
    }

    /// Bytes received so far.
    pub fn received(&self) -> u64 {
        self.received.load(Ordering::Relaxed)
    }
}
