//! Transfer strategies.
//!
//! Which strategy runs is a pure function of the file size and the
//! configured threshold, never of the file name or type.

mod segmented;
mod segments;
mod single;

use std::path::Path;
use std::sync::Arc;

use dsync_core::{DownloadError, DownloadResult, SyncSettings, TransferMode};

use crate::progress::TransferProgress;
use crate::transport::ByteSource;

pub use segments::{Segment, plan_segments};

/// How one file's bytes are fetched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DownloadStrategy {
    /// One connection, streamed straight to disk.
    SingleStream,
    /// `segments` concurrent range requests into a pre-sized file.
    Segmented {
        /// Number of byte ranges.
        segments: usize,
    },
}

impl DownloadStrategy {
    /// Pick the strategy for a file of `size` bytes.
    ///
    /// Files at or above the threshold are segmented.
    pub const fn select(size: u64, settings: &SyncSettings) -> Self {
        if size >= settings.file_threshold {
            Self::Segmented {
                segments: settings.segment_count,
            }
        } else {
            Self::SingleStream
        }
    }

    /// The reporting label for this strategy.
    pub const fn mode(&self) -> TransferMode {
        match self {
            Self::SingleStream => TransferMode::SingleStream,
            Self::Segmented { .. } => TransferMode::Segmented,
        }
    }

    /// Fetch `url` into `target`, creating parent directories first.
    ///
    /// On failure the partially written file is removed so a later run never
    /// mistakes it for a finished download.
    pub async fn fetch(
        &self,
        source: Arc<dyn ByteSource>,
        url: &str,
        target: &Path,
        size: u64,
        progress: Arc<TransferProgress>,
    ) -> DownloadResult<u64> {
        if let Some(parent) = target.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| io_error(&e, parent))?;
        }

        let result = match *self {
            Self::SingleStream => {
                single::fetch_single(source.as_ref(), url, target, size, &progress).await
            }
            Self::Segmented { segments } => {
                segmented::fetch_segmented(source, url, target, size, segments, progress).await
            }
        };

        if result.is_err() {
            if let Err(e) = tokio::fs::remove_file(target).await {
                tracing::debug!(path = %target.display(), error = %e, "could not remove partial file");
            }
        }
        result
    }
}

/// Attach the path to an I/O error.
pub(crate) fn io_error(err: &std::io::Error, path: &Path) -> DownloadError {
    DownloadError::io(
        format!("{:?}", err.kind()),
        format!("{}: {err}", path.display()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progress::NoopProgressSink;
    use crate::transport::testing::MemoryByteSource;

    fn settings(threshold: u64) -> SyncSettings {
        SyncSettings {
            file_threshold: threshold,
            segment_count: 4,
            ..SyncSettings::default()
        }
    }

    fn progress(size: u64) -> Arc<TransferProgress> {
        Arc::new(TransferProgress::new("f", size, Arc::new(NoopProgressSink)))
    }

    #[test]
    fn test_threshold_boundary() {
        let s = settings(1024);
        assert_eq!(DownloadStrategy::select(1023, &s), DownloadStrategy::SingleStream);
        assert_eq!(
            DownloadStrategy::select(1024, &s),
            DownloadStrategy::Segmented { segments: 4 }
        );
        assert_eq!(DownloadStrategy::select(0, &s), DownloadStrategy::SingleStream);
    }

    #[test]
    fn test_default_threshold_boundary() {
        let s = SyncSettings::default();
        let t = s.file_threshold;
        assert_eq!(DownloadStrategy::select(t - 1, &s).mode(), TransferMode::SingleStream);
        assert_eq!(DownloadStrategy::select(t, &s).mode(), TransferMode::Segmented);
    }

    #[tokio::test]
    async fn test_fetch_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("a___b/nested/deep/file.txt");
        let source: Arc<dyn ByteSource> =
            Arc::new(MemoryByteSource::new().with_body("u", b"data".to_vec()));

        DownloadStrategy::SingleStream
            .fetch(source, "u", &target, 4, progress(4))
            .await
            .unwrap();

        assert_eq!(std::fs::read(&target).unwrap(), b"data");
    }

    #[tokio::test]
    async fn test_failed_fetch_removes_partial_file() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("big.bin");
        let source: Arc<dyn ByteSource> = Arc::new(
            MemoryByteSource::new()
                .with_body("u", vec![7u8; 40])
                .failing_ranges_from(30),
        );

        let result = DownloadStrategy::Segmented { segments: 4 }
            .fetch(source, "u", &target, 40, progress(40))
            .await;

        assert!(result.is_err());
        assert!(!target.exists());
    }
}
