//! reqwest-backed byte source.

use async_trait::async_trait;
use futures_util::StreamExt;
use reqwest::StatusCode;
use reqwest::header::RANGE;

use dsync_core::{DownloadError, DownloadResult};

use super::{ByteRange, ByteSource, ByteStream};

/// Streams download URLs with reqwest.
///
/// Download URLs are pre-signed, so no authentication header is attached.
/// Transport-level timeouts come from the client passed in.
#[derive(Clone)]
pub struct ReqwestByteSource {
    client: reqwest::Client,
}

impl ReqwestByteSource {
    /// Wrap an existing client.
    pub const fn new(client: reqwest::Client) -> Self {
        Self { client }
    }

    /// Build a client with the given user agent.
    pub fn with_user_agent(user_agent: &str) -> DownloadResult<Self> {
        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .build()
            .map_err(|e| DownloadError::other(format!("failed to build HTTP client: {e}")))?;
        Ok(Self::new(client))
    }
}

/// Decide whether a response status is acceptable for the request made.
///
/// A ranged request needs `206`, except that a server ignoring `Range` and
/// answering `200` is fine when the range was the whole file anyway.
pub(crate) fn check_status(status: StatusCode, range: Option<&ByteRange>) -> DownloadResult<()> {
    if let Some(r) = range {
        if status == StatusCode::PARTIAL_CONTENT || (status == StatusCode::OK && r.is_whole_file())
        {
            return Ok(());
        }
        if status.is_success() {
            return Err(DownloadError::invalid_response(format!(
                "server ignored range {} (status {})",
                r.header_value(),
                status.as_u16()
            )));
        }
    } else if status.is_success() {
        return Ok(());
    }

    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        return Err(DownloadError::access_denied(format!(
            "download URL rejected with status {}",
            status.as_u16()
        )));
    }
    if status == StatusCode::NOT_FOUND {
        return Err(DownloadError::not_found("download URL returned 404"));
    }
    Err(DownloadError::network_with_status(
        format!("download failed with status {status}"),
        status.as_u16(),
    ))
}

#[async_trait]
impl ByteSource for ReqwestByteSource {
    async fn open(&self, url: &str, range: Option<ByteRange>) -> DownloadResult<ByteStream> {
        let mut request = self.client.get(url);
        if let Some(ref r) = range {
            request = request.header(RANGE, r.header_value());
        }

        let response = request
            .send()
            .await
            .map_err(|e| DownloadError::network(e.to_string()))?;

        check_status(response.status(), range.as_ref())?;

        let stream = response
            .bytes_stream()
            .map(|chunk| chunk.map_err(|e| DownloadError::network(e.to_string())));
        Ok(Box::pin(stream))
    }
}
