//! Batch-wide progress accounting.

use std::cmp::Ordering;
use std::fmt;

use dsync_core::format_size;

/// Point-in-time view of batch progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressSnapshot {
    /// Bytes of fully completed files (skipped files included).
    pub completed_bytes: u64,
    /// Sum of every manifest entry's size.
    pub total_bytes: u64,
    /// Files completed so far.
    pub completed_count: usize,
    /// Files in the batch.
    pub total_count: usize,
}

impl ProgressSnapshot {
    /// Completion percentage rounded half to even; `100` for an empty byte
    /// total.
    pub fn percent(&self) -> u8 {
        if self.total_bytes == 0 {
            return 100;
        }
        let scaled = u128::from(self.completed_bytes.min(self.total_bytes)) * 100;
        let total = u128::from(self.total_bytes);
        let (quotient, remainder) = (scaled / total, scaled % total);
        let pct = match (remainder * 2).cmp(&total) {
            Ordering::Greater => quotient + 1,
            Ordering::Equal => quotient + (quotient % 2),
            Ordering::Less => quotient,
        };
        u8::try_from(pct).unwrap_or(100)
    }

    /// Render the fixed-format progress line.
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for ProgressSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Total progress: {}% [{}/{} files] {}/{}",
            self.percent(),
            self.completed_count,
            self.total_count,
            format_size(self.completed_bytes),
            format_size(self.total_bytes)
        )
    }
}

/// Tracks completed bytes across a batch.
///
/// Advanced exactly once per file, after that file is fully done, so the
/// counters only ever grow.
#[derive(Debug)]
pub struct ProgressAggregator {
    state: ProgressSnapshot,
}

impl ProgressAggregator {
    /// Start a batch with fixed totals.
    pub const fn new(total_bytes: u64, total_count: usize) -> Self {
        Self {
            state: ProgressSnapshot {
                completed_bytes: 0,
                total_bytes,
                completed_count: 0,
                total_count,
            },
        }
    }

    /// Record one finished file and return the updated snapshot.
    pub fn advance(&mut self, file_bytes: u64) -> ProgressSnapshot {
        self.state.completed_bytes = self.state.completed_bytes.saturating_add(file_bytes);
        self.state.completed_count += 1;
        self.state
    }

    /// Current snapshot without advancing.
    pub const fn snapshot(&self) -> ProgressSnapshot {
        self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_is_monotonic_over_batch() {
        let mut progress = ProgressAggregator::new(60, 3);

        let first = progress.advance(10);
        assert_eq!(first.completed_bytes, 10);
        assert_eq!(first.percent(), 17);

        let second = progress.advance(20);
        assert_eq!(second.completed_bytes, 30);
        assert_eq!(second.percent(), 50);

        let third = progress.advance(30);
        assert_eq!(third.completed_bytes, 60);
        assert_eq!(third.percent(), 100);

        assert!(first.percent() <= second.percent() && second.percent() <= third.percent());
    }

    #[test]
    fn test_zero_total_reports_full_progress() {
        let mut progress = ProgressAggregator::new(0, 1);
        assert_eq!(progress.snapshot().percent(), 100);
        let snap = progress.advance(0);
        assert_eq!(snap.percent(), 100);
        assert_eq!(snap.completed_count, 1);
    }

    #[test]
    fn test_rendered_line() {
        let mut progress = ProgressAggregator::new(3 * 1024, 2);
        let line = progress.advance(1024).render();
        assert_eq!(line, "Total progress: 33% [1/2 files] 1.00K/3.00K");
    }

    #[test]
    fn test_percent_never_exceeds_hundred() {
        let snap = ProgressSnapshot {
            completed_bytes: 500,
            total_bytes: 100,
            completed_count: 1,
            total_count: 1,
        };
        assert_eq!(snap.percent(), 100);
    }

    #[test]
    fn test_exact_halves_round_to_even() {
        let at = |done, total| {
            ProgressSnapshot {
                completed_bytes: done,
                total_bytes: total,
                completed_count: 1,
                total_count: 2,
            }
            .percent()
        };
        assert_eq!(at(1, 40), 2);
        assert_eq!(at(3, 40), 8);
        assert_eq!(at(1, 8), 12);
        assert_eq!(at(3, 8), 38);
        assert_eq!(at(26, 1000), 3);
    }

    #[test]
    fn test_percent_with_large_sizes() {
        let snap = ProgressSnapshot {
            completed_bytes: u64::MAX / 2,
            total_bytes: u64::MAX,
            completed_count: 1,
            total_count: 2,
        };
        assert_eq!(snap.percent(), 50);
    }
}
