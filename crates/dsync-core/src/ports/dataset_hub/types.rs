//! DTOs exchanged over the dataset hub port.

use serde::{Deserialize, Serialize};

use crate::domain::{DatasetId, FileEntry};

/// Parameters for one page of the file listing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileListQuery {
    /// Only list files under this repository path.
    pub prefix: Option<String>,
    /// Opaque cursor returned by the previous page.
    pub after: Option<String>,
    /// Maximum number of items per page.
    pub limit: u32,
    /// Ask the hub to include content metadata (hashes).
    pub include_content: bool,
}

impl FileListQuery {
    /// First-page query with the given limit.
    #[must_use]
    pub const fn new(limit: u32) -> Self {
        Self {
            prefix: None,
            after: None,
            limit,
            include_content: false,
        }
    }

    /// Restrict the listing to a path prefix. Empty prefixes are ignored.
    #[must_use]
    pub fn with_prefix(mut self, prefix: Option<&str>) -> Self {
        self.prefix = prefix.filter(|p| !p.is_empty()).map(String::from);
        self
    }

    /// Request content hashes.
    #[must_use]
    pub const fn with_content(mut self, include: bool) -> Self {
        self.include_content = include;
        self
    }

    /// Continue after the given cursor.
    #[must_use]
    pub fn after(mut self, cursor: Option<String>) -> Self {
        self.after = cursor;
        self
    }
}

/// A file as reported by the hub, before normalization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteFile {
    /// Raw repository path, possibly with leading separators.
    pub path: String,
    /// Size in bytes.
    pub size: u64,
    /// Hex SHA-256 of the content, when requested and known.
    pub sha256: Option<String>,
    /// Repository-scoped identifier.
    pub dataset_id: Option<DatasetId>,
}

impl RemoteFile {
    /// Convert into a normalized manifest entry.
    pub fn into_entry(self) -> FileEntry {
        FileEntry::new(&self.path, self.size, self.sha256, self.dataset_id)
    }
}

/// One page of the file listing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileListPage {
    /// Items on this page, in hub order.
    pub items: Vec<RemoteFile>,
    /// Whether the hub reports more pages.
    pub has_more: bool,
    /// Cursor for the next page.
    pub next_cursor: Option<String>,
}
