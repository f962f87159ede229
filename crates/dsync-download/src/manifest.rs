//! Paginated manifest assembly.

use std::collections::HashSet;
use std::sync::Arc;

use dsync_core::{
    DatasetHubPort, DatasetRef, DownloadError, DownloadResult, FileListQuery, Manifest,
};

/// Drains the hub's cursor-based file listing into one [`Manifest`].
///
/// Pages are requested strictly one after another; each request depends on
/// the cursor of the previous page.
pub struct ManifestFetcher {
    hub: Arc<dyn DatasetHubPort>,
}

impl ManifestFetcher {
    /// Create a fetcher over the given hub.
    pub fn new(hub: Arc<dyn DatasetHubPort>) -> Self {
        Self { hub }
    }

    /// Fetch every page for `dataset`, optionally limited to `prefix`.
    ///
    /// Items keep page-then-within-page order. A path seen on an earlier page
    /// wins over a later duplicate. The dataset id comes from the first item
    /// of the first page. Any failed page fails the whole fetch, and so does
    /// a cursor the hub already handed out.
    pub async fn fetch_all(
        &self,
        dataset: &DatasetRef,
        prefix: Option<&str>,
        page_limit: u32,
        include_content: bool,
    ) -> DownloadResult<Manifest> {
        let mut manifest = Manifest::new();
        let mut cursor: Option<String> = None;
        let mut seen_cursors: HashSet<String> = HashSet::new();
        let mut pages = 0usize;

        loop {
            let query = FileListQuery::new(page_limit)
                .with_prefix(prefix)
                .with_content(include_content)
                .after(cursor.clone());
            let page = self.hub.list_files(dataset, &query).await?;
            pages += 1;

            if pages == 1 {
                if let Some(id) = page.items.first().and_then(|f| f.dataset_id.clone()) {
                    manifest.set_dataset_id(id);
                }
            }

            for item in page.items {
                let entry = item.into_entry();
                let path = entry.path.clone();
                if !manifest.push(entry) {
                    tracing::warn!(%path, page = pages, "duplicate path in listing, keeping first");
                }
            }

            if !page.has_more {
                break;
            }
            let Some(next) = page.next_cursor else {
                tracing::debug!(page = pages, "listing reported more pages without a cursor");
                break;
            };
            // Any repeat means the hub is cycling and paging would never end
            if !seen_cursors.insert(next.clone()) {
                return Err(DownloadError::invalid_response(format!(
                    "listing cursor '{next}' repeated on page {pages}"
                )));
            }
            cursor = Some(next);
        }

        tracing::debug!(%dataset, pages, files = manifest.len(), "manifest complete");
        Ok(manifest)
    }
}
