//! Byte transport abstraction.
//!
//! Strategies never talk to an HTTP client directly. They open byte streams
//! through [`ByteSource`], which makes the transfer logic testable against an
//! in-memory source.

mod reqwest_source;

use std::pin::Pin;

use async_trait::async_trait;
use bytes::Bytes;
use futures_util::Stream;

use dsync_core::DownloadResult;

pub use reqwest_source::ReqwestByteSource;

/// A boxed stream of body chunks.
pub type ByteStream = Pin<Box<dyn Stream<Item = DownloadResult<Bytes>> + Send>>;

/// An inclusive byte range of a file of known size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ByteRange {
    /// First byte offset.
    pub start: u64,
    /// Last byte offset (inclusive).
    pub end: u64,
    /// Size of the whole file.
    pub file_size: u64,
}

impl ByteRange {
    /// Range covering `len` bytes from `start`. `len` must be non-zero.
    pub const fn new(start: u64, len: u64, file_size: u64) -> Self {
        Self {
            start,
            end: start + len - 1,
            file_size,
        }
    }

    /// Number of bytes in the range.
    pub const fn len(&self) -> u64 {
        self.end - self.start + 1
    }

    /// Ranges are never empty.
    pub const fn is_empty(&self) -> bool {
        false
    }

    /// Whether the range spans the entire file.
    pub const fn is_whole_file(&self) -> bool {
        self.start == 0 && self.end + 1 == self.file_size
    }

    /// Value of the HTTP `Range` header.
    pub fn header_value(&self) -> String {
        format!("bytes={}-{}", self.start, self.end)
    }
}

/// Source of file bytes behind a resolved download URL.
#[async_trait]
pub trait ByteSource: Send + Sync {
    /// Open a stream over the whole body, or over `range` when given.
    ///
    /// Implementations must fail rather than return bytes from outside the
    /// requested range.
    async fn open(&self, url: &str, range: Option<ByteRange>) -> DownloadResult<ByteStream>;
}

#[cfg(test)]
pub mod testing {
    //! In-memory byte source for tests.

    use std::collections::HashMap;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use futures_util::stream;

    use super::*;
    use dsync_core::DownloadError;

    /// Serves registered bodies from memory, in small chunks.
    #[derive(Default)]
    pub struct MemoryByteSource {
        bodies: HashMap<String, Vec<u8>>,
        fail_ranges_from: Option<u64>,
        opens: AtomicUsize,
        ranges: Mutex<Vec<Option<ByteRange>>>,
    }

    impl MemoryByteSource {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_body(mut self, url: &str, body: impl Into<Vec<u8>>) -> Self {
            self.bodies.insert(url.to_string(), body.into());
            self
        }

        /// Fail every ranged open whose start is at or beyond `offset`.
        pub const fn failing_ranges_from(mut self, offset: u64) -> Self {
            self.fail_ranges_from = Some(offset);
            self
        }

        pub fn open_count(&self) -> usize {
            self.opens.load(Ordering::SeqCst)
        }

        pub fn ranges(&self) -> Vec<Option<ByteRange>> {
            self.ranges.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ByteSource for MemoryByteSource {
        async fn open(&self, url: &str, range: Option<ByteRange>) -> DownloadResult<ByteStream> {
            self.opens.fetch_add(1, Ordering::SeqCst);
            self.ranges.lock().unwrap().push(range);

            let body = self
                .bodies
                .get(url)
                .ok_or_else(|| DownloadError::not_found(url.to_string()))?;

            let slice = match range {
                Some(r) => {
                    if self.fail_ranges_from.is_some_and(|from| r.start >= from) {
                        return Err(DownloadError::network_with_status("range refused", 503));
                    }
                    let start = usize::try_from(r.start).unwrap();
                    let len = usize::try_from(r.len()).unwrap();
                    body.iter().skip(start).take(len).copied().collect()
                }
                None => body.clone(),
            };

            let chunks: Vec<DownloadResult<Bytes>> = slice
                .chunks(3)
                .map(|c| Ok(Bytes::copy_from_slice(c)))
                .collect();
            Ok(Box::pin(stream::iter(chunks)))
        }
    }
}
