//! Local copy verification.
//!
//! Decides whether a file already on disk can be kept. Only a full-content
//! SHA-256 match counts; anything else forces a fresh download.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};

use dsync_core::{DownloadError, DownloadResult};

/// Buffer size used while hashing.
const HASH_CHUNK: usize = 1024 * 1024;

/// What was found at a target path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocalState {
    /// Nothing exists at the path.
    Missing,
    /// A file exists but there is no expected hash to compare against.
    Unverifiable,
    /// A file exists and its content hash differs.
    Mismatch {
        /// Hash of the local content.
        actual: String,
    },
    /// A file exists and its content hash matches.
    Verified,
}

impl LocalState {
    /// Only a verified copy may be skipped.
    pub const fn is_skippable(&self) -> bool {
        matches!(self, Self::Verified)
    }
}

/// Checks local files against expected content hashes.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStateChecker;

impl LocalStateChecker {
    /// Inspect `path` against `expected_hash`.
    ///
    /// An empty or absent hash makes an existing file unverifiable. The
    /// comparison is exact and case-sensitive over the lowercase hex digest.
    pub async fn check(&self, path: &Path, expected_hash: Option<&str>) -> DownloadResult<LocalState> {
        let is_file = tokio::fs::metadata(path)
            .await
            .map(|m| m.is_file())
            .unwrap_or(false);
        if !is_file {
            return Ok(LocalState::Missing);
        }

        let Some(expected) = expected_hash.filter(|h| !h.is_empty()) else {
            return Ok(LocalState::Unverifiable);
        };

        let actual = sha256_file(path.to_path_buf()).await?;
        if actual == expected {
            Ok(LocalState::Verified)
        } else {
            tracing::debug!(path = %path.display(), %expected, %actual, "local hash mismatch");
            Ok(LocalState::Mismatch { actual })
        }
    }

    /// Whether the file at `path` can be skipped.
    pub async fn should_skip(&self, path: &Path, expected_hash: Option<&str>) -> DownloadResult<bool> {
        Ok(self.check(path, expected_hash).await?.is_skippable())
    }
}

/// Hash a file's full content on the blocking pool.
pub async fn sha256_file(path: PathBuf) -> DownloadResult<String> {
    tokio::task::spawn_blocking(move || -> DownloadResult<String> {
        let io = |e: std::io::Error| {
            DownloadError::io(format!("{:?}", e.kind()), format!("{}: {e}", path.display()))
        };

        let mut file = File::open(&path).map_err(io)?;
        let mut hasher = Sha256::new();
        let mut buffer = vec![0u8; HASH_CHUNK];

        loop {
            let n = file.read(&mut buffer).map_err(io)?;
            if n == 0 {
                break;
            }
            hasher.update(&buffer[..n]);
        }

        Ok(format!("{:x}", hasher.finalize()))
    })
    .await
    .map_err(|e| DownloadError::other(format!("hash task failed: {e}")))?
}

#[cfg(test)]
mod tests {
    use super::*;

    // sha256("hello world")
    const HELLO_HASH: &str = "b94d27b9934d3e08a52e52d7da7dabfac484efe37a5380ee9088f7ace2efcde9";

    #[tokio::test]
    async fn test_missing_file_is_not_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let checker = LocalStateChecker;
        let path = dir.path().join("absent.txt");

        assert_eq!(
            checker.check(&path, Some(HELLO_HASH)).await.unwrap(),
            LocalState::Missing
        );
        assert!(!checker.should_skip(&path, Some(HELLO_HASH)).await.unwrap());
    }

    #[tokio::test]
    async fn test_matching_hash_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.txt");
        std::fs::write(&path, b"hello world").unwrap();

        assert!(LocalStateChecker.should_skip(&path, Some(HELLO_HASH)).await.unwrap());
    }

    #[tokio::test]
    async fn test_empty_hash_is_unverifiable() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.txt");
        std::fs::write(&path, b"hello world").unwrap();

        assert_eq!(
            LocalStateChecker.check(&path, Some("")).await.unwrap(),
            LocalState::Unverifiable
        );
        assert_eq!(
            LocalStateChecker.check(&path, None).await.unwrap(),
            LocalState::Unverifiable
        );
        assert!(!LocalStateChecker.should_skip(&path, None).await.unwrap());
    }

    #[tokio::test]
    async fn test_single_flipped_bit_forces_download() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.txt");
        let mut content = b"hello world".to_vec();
        content[4] ^= 0b0000_0001;
        std::fs::write(&path, &content).unwrap();

        let state = LocalStateChecker.check(&path, Some(HELLO_HASH)).await.unwrap();
        assert!(matches!(state, LocalState::Mismatch { .. }));
        assert!(!state.is_skippable());
    }

    #[tokio::test]
    async fn test_hash_compare_is_case_sensitive() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.txt");
        std::fs::write(&path, b"hello world").unwrap();

        let upper = HELLO_HASH.to_uppercase();
        assert!(!LocalStateChecker.should_skip(&path, Some(&upper)).await.unwrap());
    }

    #[tokio::test]
    async fn test_directory_at_target_is_missing() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(
            LocalStateChecker.check(dir.path(), Some(HELLO_HASH)).await.unwrap(),
            LocalState::Missing
        );
    }

    #[tokio::test]
    async fn test_sha256_of_empty_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty");
        std::fs::write(&path, b"").unwrap();
        assert_eq!(
            sha256_file(path).await.unwrap(),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }
}
