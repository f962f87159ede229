//! End-to-end user operations: `get`, `download` and `query`.

use std::path::PathBuf;
use std::sync::Arc;

use dsync_core::{
    DatasetHubPort, DatasetRef, DownloadError, DownloadResult, DownloadSummary, FileEntry,
    SyncSettings,
};

use crate::dispatcher::DownloadDispatcher;
use crate::manifest::ManifestFetcher;
use crate::plan::DownloadPlan;
use crate::progress::{DispatchEvent, ProgressSink};
use crate::transport::ByteSource;

/// Result of a `get` or `download` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionOutcome {
    /// Every file is present and verified locally.
    Completed(DownloadSummary),
    /// The listing was empty; nothing was checked or fetched.
    NothingToDownload,
}

/// Result of a `query` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryListing {
    /// Files sorted by path, descending.
    pub files: Vec<FileEntry>,
    /// Sum of all file sizes.
    pub total_size: u64,
}

/// Strip leading `.` characters from a user-supplied source path.
///
/// `./raw` becomes `/raw`; `...` becomes empty.
pub fn clean_source_path(source: &str) -> &str {
    source.trim_start_matches('.')
}

/// Runs user operations against one hub and byte source.
pub struct DatasetSession {
    hub: Arc<dyn DatasetHubPort>,
    source: Arc<dyn ByteSource>,
    sink: Arc<dyn ProgressSink>,
    settings: SyncSettings,
    target_root: PathBuf,
}

impl DatasetSession {
    /// Create a session writing below `target_root`.
    pub fn new(
        hub: Arc<dyn DatasetHubPort>,
        source: Arc<dyn ByteSource>,
        sink: Arc<dyn ProgressSink>,
        settings: SyncSettings,
        target_root: PathBuf,
    ) -> Self {
        Self {
            hub,
            source,
            sink,
            settings,
            target_root,
        }
    }

    /// Download the whole repository.
    pub async fn get(&self, dataset: &DatasetRef) -> DownloadResult<SessionOutcome> {
        self.sync(dataset, None, "").await
    }

    /// Download only files under `source_path`.
    pub async fn download(
        &self,
        dataset: &DatasetRef,
        source_path: &str,
    ) -> DownloadResult<SessionOutcome> {
        let cleaned = clean_source_path(source_path);
        let prefix = (!cleaned.is_empty()).then_some(cleaned);
        self.sync(dataset, prefix, cleaned).await
    }

    /// List every file of the repository without downloading.
    ///
    /// An empty listing is reported as an access denial: the hub hides
    /// private repositories by returning nothing.
    pub async fn query(&self, dataset: &DatasetRef) -> DownloadResult<QueryListing> {
        let manifest = ManifestFetcher::new(Arc::clone(&self.hub))
            .fetch_all(dataset, None, self.settings.query_page_limit, false)
            .await?;

        if let Err(e) = self.hub.track_query(dataset).await {
            tracing::warn!(%dataset, error = %e, "query tracking failed");
        }

        if manifest.is_empty() {
            return Err(DownloadError::access_denied(format!(
                "no files visible in {dataset}"
            )));
        }

        let total_size = manifest.total_size();
        let mut files = manifest.entries().to_vec();
        files.sort_by(|a, b| b.path.cmp(&a.path));
        Ok(QueryListing { files, total_size })
    }

    async fn sync(
        &self,
        dataset: &DatasetRef,
        prefix: Option<&str>,
        scope: &str,
    ) -> DownloadResult<SessionOutcome> {
        self.sink.on_event(&DispatchEvent::FetchingManifest);
        let manifest = ManifestFetcher::new(Arc::clone(&self.hub))
            .fetch_all(dataset, prefix, self.settings.page_limit, true)
            .await?;

        self.sink.on_event(&DispatchEvent::ManifestReady {
            files: manifest.len(),
            total_bytes: manifest.total_size(),
        });

        if manifest.is_empty() {
            tracing::info!(%dataset, prefix = ?prefix, "listing is empty");
            self.track_download(dataset, scope).await;
            return Ok(SessionOutcome::NothingToDownload);
        }

        let plan = DownloadPlan::build(&manifest, dataset, &self.target_root, &self.settings)?;

        if let Some(first) = manifest.first() {
            self.hub.precheck(plan.dataset_id(), &first.path).await?;
        }

        let summary = DownloadDispatcher::new(
            Arc::clone(&self.hub),
            Arc::clone(&self.source),
            Arc::clone(&self.sink),
        )
        .run(&plan)
        .await?;

        self.track_download(dataset, scope).await;
        Ok(SessionOutcome::Completed(summary))
    }

    /// Best effort: a failed tracking call never fails the run.
    async fn track_download(&self, dataset: &DatasetRef, scope: &str) {
        if let Err(e) = self.hub.track_download(dataset, scope).await {
            tracing::warn!(%dataset, scope, error = %e, "download tracking failed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progress::testing::RecordingSink;
    use crate::testing::MockHub;
    use crate::transport::testing::MemoryByteSource;
    use dsync_core::{
        DatasetId, FileListPage, FileListQuery, HubPortError, HubPortResult, RemoteFile, TargetKind,
    };

    fn remote(path: &str, body: &[u8]) -> RemoteFile {
        RemoteFile {
            path: format!("/{path}"),
            size: body.len() as u64,
            sha256: None,
            dataset_id: Some(DatasetId::new("5")),
        }
    }

    fn listing(
        items: Vec<RemoteFile>,
    ) -> impl Fn(&DatasetRef, &FileListQuery) -> HubPortResult<FileListPage> + Send + 'static {
        move |_, _| {
            Ok(FileListPage {
                items: items.clone(),
                has_more: false,
                next_cursor: None,
            })
        }
    }

    fn dataset() -> DatasetRef {
        DatasetRef::new("lab", "set")
    }

    fn session(hub: MockHub, source: MemoryByteSource, root: PathBuf) -> DatasetSession {
        DatasetSession::new(
            Arc::new(hub),
            Arc::new(source),
            Arc::new(RecordingSink::new()),
            SyncSettings::default(),
            root,
        )
    }

    #[test]
    fn test_clean_source_path() {
        assert_eq!(clean_source_path("./raw"), "/raw");
        assert_eq!(clean_source_path("../raw"), "/raw");
        assert_eq!(clean_source_path("/raw/x"), "/raw/x");
        assert_eq!(clean_source_path("..."), "");
    }

    #[tokio::test]
    async fn test_get_runs_precheck_then_tracks() {
        let dir = tempfile::tempdir().unwrap();
        let mut hub = MockHub::new();
        hub.expect_list_files()
            .withf(|_, q| q.prefix.is_none() && q.include_content)
            .returning(listing(vec![remote("b.txt", b"bb"), remote("a.txt", b"a")]));
        hub.expect_precheck()
            .withf(|id, path| id.as_str() == "5" && path == "b.txt")
            .times(1)
            .returning(|_, _| Ok(()));
        hub.expect_resolve_download_url()
            .returning(|_, e| Ok(format!("mem://{}", e.path)));
        hub.expect_track_download()
            .withf(|d, scope| d == &dataset() && scope.is_empty())
            .times(1)
            .returning(|_, _| Ok(()));

        let source = MemoryByteSource::new()
            .with_body("mem://b.txt", b"bb".to_vec())
            .with_body("mem://a.txt", b"a".to_vec());
        let outcome = session(hub, source, dir.path().to_path_buf())
            .get(&dataset())
            .await
            .unwrap();

        let SessionOutcome::Completed(summary) = outcome else {
            panic!("expected a completed run");
        };
        assert_eq!(summary.kind, TargetKind::Folder);
        assert_eq!(summary.local_path, dir.path().join("lab___set"));
        assert_eq!(
            std::fs::read(dir.path().join("lab___set/b.txt")).unwrap(),
            b"bb"
        );
    }

    #[tokio::test]
    async fn test_download_uses_cleaned_prefix_and_scope() {
        let dir = tempfile::tempdir().unwrap();
        let mut hub = MockHub::new();
        hub.expect_list_files()
            .withf(|_, q| q.prefix.as_deref() == Some("/raw"))
            .returning(listing(vec![remote("raw/x.bin", b"x")]));
        hub.expect_precheck().returning(|_, _| Ok(()));
        hub.expect_resolve_download_url()
            .returning(|_, e| Ok(format!("mem://{}", e.path)));
        hub.expect_track_download()
            .withf(|d, scope| d == &dataset() && scope == "/raw")
            .times(1)
            .returning(|_, _| Ok(()));

        let source = MemoryByteSource::new().with_body("mem://raw/x.bin", b"x".to_vec());
        let outcome = session(hub, source, dir.path().to_path_buf())
            .download(&dataset(), "./raw")
            .await
            .unwrap();

        let SessionOutcome::Completed(summary) = outcome else {
            panic!("expected a completed run");
        };
        assert_eq!(summary.kind, TargetKind::File);
        assert_eq!(summary.local_path, dir.path().join("lab___set/raw/x.bin"));
    }

    #[tokio::test]
    async fn test_empty_listing_is_nothing_to_download() {
        let dir = tempfile::tempdir().unwrap();
        let mut hub = MockHub::new();
        hub.expect_list_files().returning(listing(Vec::new()));
        hub.expect_precheck().never();
        hub.expect_track_download()
            .withf(|_, scope| scope.is_empty())
            .times(1)
            .returning(|_, _| Ok(()));

        let outcome = session(hub, MemoryByteSource::new(), dir.path().to_path_buf())
            .get(&dataset())
            .await
            .unwrap();
        assert_eq!(outcome, SessionOutcome::NothingToDownload);
    }

    #[tokio::test]
    async fn test_empty_listing_tracking_failure_is_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let mut hub = MockHub::new();
        hub.expect_list_files().returning(listing(Vec::new()));
        hub.expect_track_download()
            .withf(|_, scope| scope == "/nope")
            .times(1)
            .returning(|_, _| Err(HubPortError::RateLimited));

        let outcome = session(hub, MemoryByteSource::new(), dir.path().to_path_buf())
            .download(&dataset(), "/nope")
            .await
            .unwrap();
        assert_eq!(outcome, SessionOutcome::NothingToDownload);
    }

    #[tokio::test]
    async fn test_precheck_denial_fetches_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let mut hub = MockHub::new();
        hub.expect_list_files()
            .returning(listing(vec![remote("a.txt", b"a")]));
        hub.expect_precheck().returning(|_, _| {
            Err(HubPortError::AccessDenied {
                dataset: "lab/set".into(),
            })
        });
        hub.expect_resolve_download_url().never();
        hub.expect_track_download().never();

        let source = MemoryByteSource::new().with_body("mem://a.txt", b"a".to_vec());
        let result = session(hub, source, dir.path().to_path_buf())
            .get(&dataset())
            .await;

        assert!(result.unwrap_err().is_access_denied());
        assert!(!dir.path().join("lab___set").exists());
    }

    #[tokio::test]
    async fn test_tracking_failure_is_not_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let mut hub = MockHub::new();
        hub.expect_list_files()
            .returning(listing(vec![remote("a.txt", b"a")]));
        hub.expect_precheck().returning(|_, _| Ok(()));
        hub.expect_resolve_download_url()
            .returning(|_, e| Ok(format!("mem://{}", e.path)));
        hub.expect_track_download().returning(|_, _| {
            Err(HubPortError::Network {
                message: "down".into(),
            })
        });

        let source = MemoryByteSource::new().with_body("mem://a.txt", b"a".to_vec());
        let outcome = session(hub, source, dir.path().to_path_buf())
            .get(&dataset())
            .await
            .unwrap();
        assert!(matches!(outcome, SessionOutcome::Completed(_)));
    }

    #[tokio::test]
    async fn test_query_sorts_descending_and_sums() {
        let mut hub = MockHub::new();
        hub.expect_list_files()
            .withf(|_, q| q.limit == 1000 && !q.include_content)
            .returning(listing(vec![
                remote("a.txt", b"aaa"),
                remote("c.txt", b"c"),
                remote("b.txt", b"bb"),
            ]));
        hub.expect_track_query().times(1).returning(|_| Ok(()));

        let listing = tokio_test::assert_ok!(
            session(hub, MemoryByteSource::new(), PathBuf::from("/unused"))
                .query(&dataset())
                .await
        );

        let paths: Vec<&str> = listing.files.iter().map(|f| f.path.as_str()).collect();
        assert_eq!(paths, vec!["c.txt", "b.txt", "a.txt"]);
        assert_eq!(listing.total_size, 6);
    }

    #[tokio::test]
    async fn test_query_empty_is_access_denied() {
        let mut hub = MockHub::new();
        hub.expect_list_files().returning(listing(Vec::new()));
        hub.expect_track_query().times(1).returning(|_| Ok(()));

        let result = session(hub, MemoryByteSource::new(), PathBuf::from("/unused"))
            .query(&dataset())
            .await;
        assert!(result.unwrap_err().is_access_denied());
    }
}
