//! Internal API request/response types for the dataset hub.
//!
//! These types are internal to `dsync-hub` and are not exposed to consumers.
//! External consumers should use the port DTOs defined in `dsync-core`.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

// ============================================================================
// Configuration (used internally, see config.rs for public config)
// ============================================================================

/// Internal configuration for the hub client.
#[derive(Debug, Clone)]
pub struct HubConfig {
    /// Base URL of the hub API
    pub base_url: Url,
    /// Optional bearer token
    pub token: Option<String>,
    /// User agent sent with every request
    pub user_agent: String,
    /// Per-request timeout
    pub timeout: Duration,
    /// Maximum number of retry attempts for transient errors (default: 3)
    pub max_retries: u8,
    /// Base delay in milliseconds for exponential backoff (default: 500)
    pub retry_base_delay_ms: u64,
}

#[cfg(test)]
impl Default for HubConfig {
    fn default() -> Self {
        Self {
            base_url: Url::parse(crate::config::DEFAULT_BASE_URL).expect("default hub API URL is valid"),
            token: None,
            user_agent: "dsync-hub".to_string(),
            timeout: Duration::from_secs(30),
            max_retries: 3,
            retry_base_delay_ms: 500,
        }
    }
}

// ============================================================================
// File listing
// ============================================================================

/// One page of `GET /datasets/{owner,name}/files`.
#[derive(Debug, Clone, Deserialize)]
pub struct FileListResponse {
    /// Items on this page
    #[serde(default)]
    pub list: Vec<WireFile>,
    /// Whether more pages follow
    #[serde(rename = "hasNext", default)]
    pub has_next: bool,
    /// Cursor for the next page
    #[serde(default)]
    pub after: Option<String>,
}

/// A file as it appears on the wire.
#[derive(Debug, Clone, Deserialize)]
pub struct WireFile {
    /// Repository path, usually with a leading `/`
    pub path: String,
    /// Size in bytes
    #[serde(default)]
    pub size: u64,
    /// Hex SHA-256, only present when content was requested
    #[serde(default)]
    pub sha256: Option<String>,
    /// Repository-scoped id; numeric or string depending on hub version
    #[serde(default)]
    pub dataset_id: Option<serde_json::Value>,
}

// ============================================================================
// Download URL resolution and precheck
// ============================================================================

/// Body of `POST /datasets/{id}/download-url`.
#[derive(Debug, Clone, Serialize)]
pub struct DownloadUrlRequest<'a> {
    /// Repository path with its leading separator
    pub path: &'a str,
    /// Expected size in bytes
    pub size: u64,
    /// Expected SHA-256, when known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sha256: Option<&'a str>,
}

/// Response of `POST /datasets/{id}/download-url`.
#[derive(Debug, Clone, Deserialize)]
pub struct DownloadUrlResponse {
    /// Short-lived URL serving the file bytes
    pub url: String,
}

/// Response of `GET /datasets/{id}/download-check`.
#[derive(Debug, Clone, Deserialize)]
pub struct DownloadCheckResponse {
    /// Whether downloading is allowed; absent means allowed
    #[serde(default = "allowed_by_default")]
    pub allowed: bool,
}

const fn allowed_by_default() -> bool {
    true
}

// ============================================================================
// Usage tracking
// ============================================================================

/// Body of `POST /track/download`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackDownloadRequest<'a> {
    /// Dataset in API form (`owner,name`)
    pub dataset_name: &'a str,
    /// Downloaded scope; empty for the whole repository
    pub file_path: &'a str,
}

/// Body of `POST /track/query`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackQueryRequest<'a> {
    /// Dataset in API form (`owner,name`)
    pub dataset_name: &'a str,
}
