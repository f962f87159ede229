//! Shared test doubles.

use dsync_core::{
    DatasetHubPort, DatasetId, DatasetRef, FileEntry, FileListPage, FileListQuery, HubPortResult,
};

mockall::mock! {
    pub Hub {}

    #[async_trait::async_trait]
    impl DatasetHubPort for Hub {
        async fn list_files(
            &self,
            dataset: &DatasetRef,
            query: &FileListQuery,
        ) -> HubPortResult<FileListPage>;
        async fn resolve_download_url(
            &self,
            dataset_id: &DatasetId,
            entry: &FileEntry,
        ) -> HubPortResult<String>;
        async fn precheck(&self, dataset_id: &DatasetId, sample_path: &str) -> HubPortResult<()>;
        async fn track_download(&self, dataset: &DatasetRef, scope_path: &str) -> HubPortResult<()>;
        async fn track_query(&self, dataset: &DatasetRef) -> HubPortResult<()>;
    }
}
