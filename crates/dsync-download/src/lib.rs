//! Download engine for dsync.
//!
//! Drains a dataset's paginated listing into a manifest, skips files whose
//! local copy verifies against the expected SHA-256, and fetches the rest
//! one file at a time: small files over one connection, large files as
//! concurrent byte ranges into a pre-sized file.
//!
//! # Architecture
//!
//! ```text
//! DatasetSession
//!   ├── ManifestFetcher ── DatasetHubPort (list_files)
//!   ├── DownloadPlan ───── DownloadStrategy::select
//!   └── DownloadDispatcher
//!         ├── LocalStateChecker
//!         ├── DatasetHubPort (resolve_download_url)
//!         ├── DownloadStrategy::fetch ── ByteSource
//!         └── ProgressAggregator ─────── ProgressSink
//! ```
//!
//! Presentation lives behind [`ProgressSink`]; HTTP lives behind
//! [`DatasetHubPort`](dsync_core::DatasetHubPort) and [`ByteSource`].

#![deny(unused_crate_dependencies)]

mod dispatcher;
mod local_state;
mod manifest;
mod plan;
pub mod progress;
mod session;
pub mod strategy;
pub mod transport;

#[cfg(test)]
mod testing;

pub use dispatcher::DownloadDispatcher;
pub use local_state::{LocalState, LocalStateChecker, sha256_file};
pub use manifest::ManifestFetcher;
pub use plan::{Decision, DownloadPlan, PlannedFile, common_parent};
pub use progress::{
    DispatchEvent, NoopProgressSink, ProgressAggregator, ProgressSink, ProgressSnapshot,
    ProgressThrottle, TransferProgress,
};
pub use session::{DatasetSession, QueryListing, SessionOutcome, clean_source_path};
pub use strategy::{DownloadStrategy, Segment, plan_segments};
pub use transport::{ByteRange, ByteSource, ByteStream, ReqwestByteSource};
