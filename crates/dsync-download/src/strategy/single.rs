//! Single-connection transfer.

use std::path::Path;

use futures_util::StreamExt;
use tokio::io::AsyncWriteExt;

use dsync_core::{DownloadError, DownloadResult};

use crate::progress::TransferProgress;
use crate::transport::ByteSource;

use super::io_error;

/// Stream `url` into `target`, replacing any existing file.
///
/// Parent directories must already exist. Returns the number of bytes
/// written, which is checked against `size`.
pub(crate) async fn fetch_single(
    source: &dyn ByteSource,
    url: &str,
    target: &Path,
    size: u64,
    progress: &TransferProgress,
) -> DownloadResult<u64> {
    let mut stream = source.open(url, None).await?;
    let mut file = tokio::fs::File::create(target)
        .await
        .map_err(|e| io_error(&e, target))?;

    let mut written = 0u64;
    while let Some(chunk) = stream.next().await {
        let chunk = chunk?;
        file.write_all(&chunk)
            .await
            .map_err(|e| io_error(&e, target))?;
        written += chunk.len() as u64;
        progress.add(chunk.len() as u64);
    }
    file.flush().await.map_err(|e| io_error(&e, target))?;

    if written != size {
        return Err(DownloadError::size_mismatch(size, written));
    }
    Ok(written)
}
