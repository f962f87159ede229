//! URL construction helpers for the hub API.
//!
//! This module provides pure functions for building hub API URLs,
//! ensuring consistent URL construction across all API calls.

use dsync_core::{DatasetId, DatasetRef, FileListQuery};
use url::Url;

use crate::models::HubConfig;

/// Append encoded path segments to the configured base URL.
fn join_segments(config: &HubConfig, segments: &[&str]) -> Url {
    let mut url = config.base_url.clone();

    let tail = segments
        .iter()
        .map(|s| urlencoding::encode(s).into_owned())
        .collect::<Vec<_>>()
        .join("/");

    let base_path = url.path().trim_end_matches('/');
    url.set_path(&format!("{base_path}/{tail}"));

    url
}

/// Build the file listing URL for one page.
pub fn build_files_url(config: &HubConfig, dataset: &DatasetRef, query: &FileListQuery) -> Url {
    let mut url = join_segments(config, &["datasets", &dataset.api_name(), "files"]);

    {
        let mut pairs = url.query_pairs_mut();
        if let Some(ref prefix) = query.prefix {
            pairs.append_pair("prefix", prefix);
        }
        if let Some(ref after) = query.after {
            pairs.append_pair("after", after);
        }
        pairs.append_pair("limit", &query.limit.max(1).to_string());
        if query.include_content {
            pairs.append_pair("needContent", "true");
        }
    }

    url
}

/// Build the endpoint that issues short-lived download URLs.
pub fn build_download_url_endpoint(config: &HubConfig, dataset_id: &DatasetId) -> Url {
    join_segments(config, &["datasets", dataset_id.as_str(), "download-url"])
}

/// Build the download precheck URL.
pub fn build_download_check_url(config: &HubConfig, dataset_id: &DatasetId, path: &str) -> Url {
    let mut url = join_segments(config, &["datasets", dataset_id.as_str(), "download-check"]);
    url.query_pairs_mut().append_pair("path", path);
    url
}

/// Build a usage tracking URL (`download` or `query`).
pub fn build_track_url(config: &HubConfig, action: &str) -> Url {
    join_segments(config, &["track", action])
}
