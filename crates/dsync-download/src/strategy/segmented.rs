//! Parallel byte-range transfer into a pre-sized file.

use std::io::SeekFrom;
use std::path::Path;
use std::sync::Arc;

use futures_util::StreamExt;
use tokio::io::{AsyncSeekExt, AsyncWriteExt};
use tokio::task::JoinSet;

use dsync_core::{DownloadError, DownloadResult};

use crate::progress::TransferProgress;
use crate::transport::ByteSource;

use super::io_error;
use super::segments::{Segment, plan_segments};

/// Download `url` into `target` with `segment_count` concurrent range
/// requests.
///
/// The file is created (or truncated) and sized to `size` up front; every
/// worker opens its own handle and writes only inside its own range. All
/// workers must succeed. On the first failure the remaining workers are
/// aborted and the error is returned.
pub(crate) async fn fetch_segmented(
    source: Arc<dyn ByteSource>,
    url: &str,
    target: &Path,
    size: u64,
    segment_count: usize,
    progress: Arc<TransferProgress>,
) -> DownloadResult<u64> {
    let file = tokio::fs::File::create(target)
        .await
        .map_err(|e| io_error(&e, target))?;
    file.set_len(size).await.map_err(|e| io_error(&e, target))?;
    drop(file);

    if size == 0 {
        return Ok(0);
    }

    let segments: Vec<Segment> = plan_segments(size, segment_count)
        .into_iter()
        .filter(|s| !s.is_empty())
        .collect();
    tracing::debug!(path = %target.display(), size, segments = segments.len(), "starting segmented download");

    let mut workers = JoinSet::new();
    for segment in segments {
        let source = Arc::clone(&source);
        let url = url.to_string();
        let target = target.to_path_buf();
        let progress = Arc::clone(&progress);
        workers.spawn(async move {
            fetch_segment(source.as_ref(), &url, &target, size, segment, &progress)
                .await
                .map_err(|e| match e {
                    failed @ DownloadError::SegmentFailed { .. } => failed,
                    other => DownloadError::segment_failed(segment.index, other.to_string()),
                })
        });
    }

    let mut written = 0u64;
    while let Some(joined) = workers.join_next().await {
        let result = joined.unwrap_or_else(|e| {
            Err(DownloadError::other(format!("segment worker panicked: {e}")))
        });
        match result {
            Ok(bytes) => written += bytes,
            Err(e) => {
                workers.abort_all();
                return Err(e);
            }
        }
    }

    if written != size {
        return Err(DownloadError::size_mismatch(size, written));
    }
    Ok(written)
}

async fn fetch_segment(
    source: &dyn ByteSource,
    url: &str,
    target: &Path,
    file_size: u64,
    segment: Segment,
    progress: &TransferProgress,
) -> DownloadResult<u64> {
    let Some(range) = segment.range(file_size) else {
        return Ok(0);
    };

    let mut stream = source.open(url, Some(range)).await?;

    let mut file = tokio::fs::OpenOptions::new()
        .write(true)
        .open(target)
        .await
        .map_err(|e| io_error(&e, target))?;
    file.seek(SeekFrom::Start(segment.start))
        .await
        .map_err(|e| io_error(&e, target))?;

    let mut written = 0u64;
    while let Some(chunk) = stream.next().await {
        let chunk = chunk?;
        let len = chunk.len() as u64;
        // Never write past the segment, or a neighbour's bytes get clobbered
        if written + len > segment.len {
            return Err(DownloadError::segment_failed(
                segment.index,
                format!("received more than the {} bytes requested", segment.len),
            ));
        }
        file.write_all(&chunk)
            .await
            .map_err(|e| io_error(&e, target))?;
        written += len;
        progress.add(len);
    }
    file.flush().await.map_err(|e| io_error(&e, target))?;

    if written != segment.len {
        return Err(DownloadError::segment_failed(
            segment.index,
            format!("expected {} bytes, got {written}", segment.len),
        ));
    }
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progress::NoopProgressSink;
    use crate::transport::testing::MemoryByteSource;

    fn body(size: usize) -> Vec<u8> {
        (0..size).map(|i| (i % 251) as u8).collect()
    }

    fn progress(size: u64) -> Arc<TransferProgress> {
        Arc::new(TransferProgress::new("f", size, Arc::new(NoopProgressSink)))
    }

    #[tokio::test]
    async fn test_reassembles_file_from_segments() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("big.bin");
        let data = body(1000);
        let source = Arc::new(MemoryByteSource::new().with_body("u", data.clone()));
        let counter = progress(1000);

        let written = fetch_segmented(source.clone(), "u", &target, 1000, 8, counter.clone())
            .await
            .unwrap();

        assert_eq!(written, 1000);
        assert_eq!(std::fs::read(&target).unwrap(), data);
        assert_eq!(source.open_count(), 8);
        assert_eq!(counter.received(), 1000);
    }

    #[tokio::test]
    async fn test_ranges_are_disjoint_and_complete() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("big.bin");
        let source = Arc::new(MemoryByteSource::new().with_body("u", body(100)));

        fetch_segmented(source.clone(), "u", &target, 100, 3, progress(100))
            .await
            .unwrap();

        let mut ranges: Vec<_> = source.ranges().into_iter().map(Option::unwrap).collect();
        ranges.sort_by_key(|r| r.start);
        let spans: Vec<(u64, u64)> = ranges.iter().map(|r| (r.start, r.end)).collect();
        assert_eq!(spans, vec![(0, 32), (33, 65), (66, 99)]);
    }

    #[tokio::test]
    async fn test_small_file_skips_empty_segments() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("tiny.bin");
        let source = Arc::new(MemoryByteSource::new().with_body("u", b"abc".to_vec()));

        fetch_segmented(source.clone(), "u", &target, 3, 8, progress(3))
            .await
            .unwrap();

        assert_eq!(source.open_count(), 1);
        assert_eq!(std::fs::read(&target).unwrap(), b"abc");
    }

    #[tokio::test]
    async fn test_zero_size_creates_empty_file_without_requests() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("empty.bin");
        let source = Arc::new(MemoryByteSource::new());

        let written = fetch_segmented(source.clone(), "u", &target, 0, 8, progress(0))
            .await
            .unwrap();

        assert_eq!(written, 0);
        assert_eq!(source.open_count(), 0);
        assert_eq!(std::fs::metadata(&target).unwrap().len(), 0);
    }

    #[tokio::test]
    async fn test_one_failed_segment_fails_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("big.bin");
        let source = Arc::new(
            MemoryByteSource::new()
                .with_body("u", body(800))
                .failing_ranges_from(700),
        );

        let result = fetch_segmented(source, "u", &target, 800, 8, progress(800)).await;

        assert!(matches!(
            result,
            Err(DownloadError::SegmentFailed { index: 7, .. })
        ));
    }

    #[tokio::test]
    async fn test_short_body_fails_segment() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("big.bin");
        // Server has fewer bytes than the manifest claims
        let source = Arc::new(MemoryByteSource::new().with_body("u", body(90)));

        let result = fetch_segmented(source, "u", &target, 100, 2, progress(100)).await;
        assert!(matches!(result, Err(DownloadError::SegmentFailed { .. })));
    }
}
