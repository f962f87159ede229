//! Dataset hub port trait.

use async_trait::async_trait;

use super::error::HubPortResult;
use super::types::{FileListPage, FileListQuery};
use crate::domain::{DatasetId, DatasetRef, FileEntry};

/// Port trait for dataset hub operations.
///
/// # Design
///
/// - Uses core-owned DTOs, not wire types
/// - Returns `HubPortError` for all failures
/// - Retry and backoff are the implementation's concern, not the caller's
#[async_trait]
pub trait DatasetHubPort: Send + Sync {
    /// Fetch one page of the dataset's file listing.
    ///
    /// The hub may return fewer items than `query.limit`. Pages must be
    /// requested strictly in cursor order.
    async fn list_files(
        &self,
        dataset: &DatasetRef,
        query: &FileListQuery,
    ) -> HubPortResult<FileListPage>;

    /// Resolve a short-lived download URL for one file.
    ///
    /// URLs may be single-use, so resolve immediately before fetching.
    async fn resolve_download_url(
        &self,
        dataset_id: &DatasetId,
        entry: &FileEntry,
    ) -> HubPortResult<String>;

    /// Check that the caller may download from the dataset.
    ///
    /// Called once per run with a representative path, before any bytes are
    /// fetched. A denial is reported as `HubPortError::AccessDenied`.
    async fn precheck(&self, dataset_id: &DatasetId, sample_path: &str) -> HubPortResult<()>;

    /// Record a download for usage statistics. Best-effort.
    async fn track_download(&self, dataset: &DatasetRef, scope_path: &str) -> HubPortResult<()>;

    /// Record a listing query for usage statistics. Best-effort.
    async fn track_query(&self, dataset: &DatasetRef) -> HubPortResult<()>;
}
