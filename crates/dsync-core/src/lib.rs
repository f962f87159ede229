//! Core domain types and port definitions for dsync.
//!
//! This crate holds the pure data model shared by every other crate in the
//! workspace: dataset addressing, the file manifest, download errors and
//! summaries, the dataset hub port, settings and path resolution.
//!
//! No networking or runtime dependencies live here.

#![deny(unused_crate_dependencies)]

pub mod domain;
pub mod download;
pub mod paths;
pub mod ports;
pub mod settings;
pub mod utils;

// Re-export commonly used types for convenience
pub use domain::{DatasetId, DatasetRef, FileEntry, Manifest, normalize_remote_path};
pub use download::{
    DownloadError, DownloadResult, DownloadSummary, FileOutcome, TargetKind, TransferMode,
};
pub use paths::{PathError, resolve_target_root};
pub use ports::{
    DatasetHubPort, FileListPage, FileListQuery, HubPortError, HubPortResult, RemoteFile,
};
pub use settings::{
    DEFAULT_FILE_THRESHOLD, DEFAULT_PAGE_LIMIT, DEFAULT_QUERY_PAGE_LIMIT, DEFAULT_SEGMENT_COUNT,
    MAX_SEGMENT_COUNT, SettingsError, SyncSettings,
};
pub use utils::format_size;

#[cfg(test)]
use serde_json as _;
#[cfg(test)]
use tempfile as _;
