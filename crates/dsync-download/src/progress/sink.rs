//! Presentation port for run events.
//!
//! The engine reports what happened; rendering (progress bars, line
//! overwriting, colors) belongs to whoever implements [`ProgressSink`].

use std::path::Path;

use dsync_core::{FileEntry, TransferMode};

use super::aggregator::ProgressSnapshot;

/// Something the presentation layer may want to show.
#[derive(Debug, Clone, Copy)]
pub enum DispatchEvent<'a> {
    /// Manifest paging started.
    FetchingManifest,
    /// The manifest is complete.
    ManifestReady {
        /// Number of files.
        files: usize,
        /// Sum of file sizes.
        total_bytes: u64,
    },
    /// A verified local copy was found; nothing was fetched.
    Skipped {
        /// One-based position in the manifest.
        index: usize,
        /// The skipped entry.
        entry: &'a FileEntry,
        /// Local file that verified.
        target: &'a Path,
        /// Batch progress including this file.
        progress: ProgressSnapshot,
    },
    /// A transfer is about to start.
    TransferStarted {
        /// One-based position in the manifest.
        index: usize,
        /// The entry being fetched.
        entry: &'a FileEntry,
        /// Selected strategy.
        mode: TransferMode,
    },
    /// Live byte count of the running transfer (throttled).
    TransferProgress {
        /// Entry path.
        path: &'a str,
        /// Bytes received so far across all segments.
        received: u64,
        /// Expected file size.
        total: u64,
    },
    /// A transfer finished and the file is complete on disk.
    Downloaded {
        /// One-based position in the manifest.
        index: usize,
        /// The fetched entry.
        entry: &'a FileEntry,
        /// Strategy used.
        mode: TransferMode,
        /// Batch progress including this file.
        progress: ProgressSnapshot,
    },
}

/// Receiver of [`DispatchEvent`]s.
///
/// Called from segment workers as well as the dispatcher, so implementations
/// must be cheap and thread-safe.
pub trait ProgressSink: Send + Sync {
    /// Handle one event.
    fn on_event(&self, event: &DispatchEvent<'_>);
}

/// Sink that drops every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopProgressSink;

impl ProgressSink for NoopProgressSink {
    fn on_event(&self, _event: &DispatchEvent<'_>) {}
}
