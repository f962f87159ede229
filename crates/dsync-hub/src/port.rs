//! Port trait implementation for `HubClient`.
//!
//! This module implements the core-owned `DatasetHubPort` trait for
//! `HubClient`, mapping internal HTTP errors to `HubPortError`.

use async_trait::async_trait;
use dsync_core::{
    DatasetHubPort, DatasetId, DatasetRef, FileEntry, FileListPage, FileListQuery, HubPortResult,
};

use crate::client::HubClient;
use crate::http::HttpBackend;

// ============================================================================
// Port Implementation
// ============================================================================

#[async_trait]
impl<B: HttpBackend + Send + Sync> DatasetHubPort for HubClient<B> {
    async fn list_files(
        &self,
        dataset: &DatasetRef,
        query: &FileListQuery,
    ) -> HubPortResult<FileListPage> {
        self.list_files_page(dataset, query)
            .await
            .map_err(|e| e.into_port(&dataset.id()))
    }

    async fn resolve_download_url(
        &self,
        dataset_id: &DatasetId,
        entry: &FileEntry,
    ) -> HubPortResult<String> {
        self.fetch_download_url(dataset_id, entry)
            .await
            .map_err(|e| e.into_port(&entry.path))
    }

    async fn precheck(&self, dataset_id: &DatasetId, sample_path: &str) -> HubPortResult<()> {
        self.download_check(dataset_id, sample_path)
            .await
            .map_err(|e| e.into_port(dataset_id.as_str()))
    }

    async fn track_download(&self, dataset: &DatasetRef, scope_path: &str) -> HubPortResult<()> {
        self.post_track_download(dataset, scope_path)
            .await
            .map_err(|e| e.into_port(&dataset.id()))
    }

    async fn track_query(&self, dataset: &DatasetRef) -> HubPortResult<()> {
        self.post_track_query(dataset)
            .await
            .map_err(|e| e.into_port(&dataset.id()))
    }
}
