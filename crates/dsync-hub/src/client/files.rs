//! File listing, download URL resolution and usage tracking.

use dsync_core::{DatasetId, DatasetRef, FileEntry, FileListPage, FileListQuery};

use crate::error::{HubError, HubResult};
use crate::http::HttpBackend;
use crate::models::{
    DownloadCheckResponse, DownloadUrlRequest, DownloadUrlResponse, FileListResponse,
    TrackDownloadRequest, TrackQueryRequest,
};
use crate::parsing::parse_file_list;
use crate::url::{
    build_download_check_url, build_download_url_endpoint, build_files_url, build_track_url,
};

use super::HubClient;

impl<B: HttpBackend> HubClient<B> {
    /// Fetch one page of a dataset's file listing.
    pub(crate) async fn list_files_page(
        &self,
        dataset: &DatasetRef,
        query: &FileListQuery,
    ) -> HubResult<FileListPage> {
        let url = build_files_url(&self.config, dataset, query);
        tracing::debug!(%dataset, after = ?query.after, "listing dataset files");
        let response: FileListResponse = self.backend.get_json(&url).await?;
        parse_file_list(response)
    }

    /// Ask the hub for a download URL for one file.
    pub(crate) async fn fetch_download_url(
        &self,
        dataset_id: &DatasetId,
        entry: &FileEntry,
    ) -> HubResult<String> {
        let url = build_download_url_endpoint(&self.config, dataset_id);
        let wire_path = format!("/{}", entry.path);
        let body = DownloadUrlRequest {
            path: &wire_path,
            size: entry.size,
            sha256: entry.expected_hash(),
        };

        let response: DownloadUrlResponse = self.backend.post_json(&url, &body).await?;
        if response.url.trim().is_empty() {
            return Err(HubError::InvalidResponse {
                message: format!("empty download URL for '{}'", entry.path),
            });
        }
        Ok(response.url)
    }

    /// Probe download permission with one representative path.
    ///
    /// The path is sent in manifest form, without a leading separator.
    pub(crate) async fn download_check(&self, dataset_id: &DatasetId, path: &str) -> HubResult<()> {
        let url = build_download_check_url(&self.config, dataset_id, path);
        let response: DownloadCheckResponse = self.backend.get_json(&url).await?;
        if response.allowed {
            Ok(())
        } else {
            Err(HubError::DownloadDenied {
                path: path.to_string(),
            })
        }
    }

    /// Report a completed download.
    pub(crate) async fn post_track_download(
        &self,
        dataset: &DatasetRef,
        scope_path: &str,
    ) -> HubResult<()> {
        let url = build_track_url(&self.config, "download");
        let api_name = dataset.api_name();
        let body = TrackDownloadRequest {
            dataset_name: &api_name,
            file_path: scope_path,
        };
        self.backend.post_discard(&url, &body).await
    }

    /// Report a listing query.
    pub(crate) async fn post_track_query(&self, dataset: &DatasetRef) -> HubResult<()> {
        let url = build_track_url(&self.config, "query");
        let api_name = dataset.api_name();
        let body = TrackQueryRequest {
            dataset_name: &api_name,
        };
        self.backend.post_discard(&url, &body).await
    }
}
