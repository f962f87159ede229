//! Per-file outcomes and the run summary.

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// How a file's bytes were fetched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransferMode {
    /// One connection, streamed straight to disk.
    SingleStream,
    /// Several concurrent byte-range requests into a pre-sized file.
    Segmented,
}

impl fmt::Display for TransferMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SingleStream => f.write_str("single-stream"),
            Self::Segmented => f.write_str("segmented"),
        }
    }
}

/// Final state of one manifest entry after a successful run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", content = "mode", rename_all = "snake_case")]
pub enum FileOutcome {
    /// A verified local copy already existed.
    Skipped,
    /// The file was fetched with the given mode.
    Downloaded(TransferMode),
}

/// Shape of what a run materialized locally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetKind {
    /// The manifest held exactly one entry.
    File,
    /// The manifest held several entries.
    Folder,
}

impl TargetKind {
    /// Classify a manifest by its entry count.
    #[must_use]
    pub const fn classify(entry_count: usize) -> Self {
        if entry_count == 1 {
            Self::File
        } else {
            Self::Folder
        }
    }

    /// Label used in user-facing messages.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::File => "file",
            Self::Folder => "folder",
        }
    }
}

impl fmt::Display for TargetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Summary of a completed dispatcher run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DownloadSummary {
    /// Whether a single file or a folder was materialized.
    pub kind: TargetKind,
    /// The single file's path, or the common parent directory of a folder.
    pub local_path: PathBuf,
    /// Outcome of every manifest entry, in manifest order.
    pub outcomes: Vec<FileOutcome>,
    /// Sum of every manifest entry's size.
    pub total_bytes: u64,
}

impl DownloadSummary {
    /// Number of files that were already present and verified.
    pub fn skipped_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, FileOutcome::Skipped))
            .count()
    }

    /// Number of files fetched over the network.
    pub fn downloaded_count(&self) -> usize {
        self.outcomes.len() - self.skipped_count()
    }
}
