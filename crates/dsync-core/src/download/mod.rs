//! Download error and result types.
//!
//! Pure data types for the download engine. No I/O, networking, or runtime
//! dependencies allowed.
//!
//! # Structure
//!
//! - `errors` - Error taxonomy for manifest, transfer and access failures
//! - `types` - Per-file outcomes and the run summary

pub mod errors;
pub mod types;

pub use errors::{DownloadError, DownloadResult};
pub use types::{DownloadSummary, FileOutcome, TargetKind, TransferMode};
