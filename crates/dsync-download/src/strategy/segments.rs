//! Byte-range partitioning for segmented downloads.

use crate::transport::ByteRange;

/// One contiguous slice of a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment {
    /// Zero-based segment index.
    pub index: usize,
    /// Offset of the first byte.
    pub start: u64,
    /// Number of bytes; may be zero when the file is smaller than the
    /// segment count.
    pub len: u64,
}

impl Segment {
    /// Offset one past the last byte.
    pub const fn end_exclusive(&self) -> u64 {
        self.start + self.len
    }

    /// Whether the segment holds no bytes.
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Request range for this segment, `None` when empty.
    pub const fn range(&self, file_size: u64) -> Option<ByteRange> {
        if self.len == 0 {
            None
        } else {
            Some(ByteRange::new(self.start, self.len, file_size))
        }
    }
}

/// Split `[0, size)` into `count` contiguous segments.
///
/// Every segment gets `size / count` bytes and the last one also takes the
/// remainder. A `count` of zero is treated as one.
pub fn plan_segments(size: u64, count: usize) -> Vec<Segment> {
    let count = count.max(1);
    let n = count as u64;
    let base = size / n;
    let remainder = size % n;

    (0..count)
        .map(|index| {
            let i = index as u64;
            let len = if index + 1 == count { base + remainder } else { base };
            Segment {
                index,
                start: i * base,
                len,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_exact_cover(size: u64, count: usize) {
        let segments = plan_segments(size, count);
        assert_eq!(segments.len(), count.max(1));

        let mut cursor = 0;
        for segment in &segments {
            assert_eq!(segment.start, cursor, "gap or overlap at {size}/{count}");
            cursor = segment.end_exclusive();
        }
        assert_eq!(cursor, size, "coverage mismatch at {size}/{count}");
    }

    #[test]
    fn test_segments_cover_file_exactly() {
        for size in [1, 2, 7, 8, 9, 63, 64, 65, 1000, 1_048_577] {
            for count in [1, 2, 3, 7, 8, 16, 64] {
                assert_exact_cover(size, count);
            }
        }
    }

    #[test]
    fn test_size_smaller_than_count() {
        let segments = plan_segments(3, 8);
        let non_empty: Vec<_> = segments.iter().filter(|s| !s.is_empty()).collect();
        assert_eq!(non_empty.len(), 1);
        assert_eq!(non_empty[0].index, 7);
        assert_eq!(non_empty[0].start, 0);
        assert_eq!(non_empty[0].len, 3);
    }

    #[test]
    fn test_last_segment_absorbs_remainder() {
        let segments = plan_segments(10, 3);
        let lens: Vec<u64> = segments.iter().map(|s| s.len).collect();
        assert_eq!(lens, vec![3, 3, 4]);
    }

    #[test]
    fn test_zero_count_means_one_segment() {
        let segments = plan_segments(5, 0);
        assert_eq!(segments, vec![Segment { index: 0, start: 0, len: 5 }]);
    }

    #[test]
    fn test_empty_segment_has_no_range() {
        let segments = plan_segments(1, 2);
        assert!(segments[0].range(1).is_none());
        assert_eq!(segments[1].range(1).unwrap().header_value(), "bytes=0-0");
    }
}
