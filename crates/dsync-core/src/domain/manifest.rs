//! File manifest types.
//!
//! A [`Manifest`] is the complete ordered list of remote files discovered for
//! one invocation. It is assembled once by the manifest fetcher and never
//! mutated afterwards.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::dataset::DatasetId;

/// Strip every leading separator from a repository-relative path.
///
/// The hub reports paths as `/dir/file` and, for files uploaded without a
/// destination, as `//file`.
pub fn normalize_remote_path(path: &str) -> String {
    path.trim_start_matches('/').to_string()
}

/// One remote file of a dataset repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileEntry {
    /// Repository-relative path, already normalized (no leading separator).
    pub path: String,
    /// File size in bytes.
    pub size: u64,
    /// Expected SHA-256 of the content as lowercase hex, if the hub knows it.
    pub content_hash: Option<String>,
    /// Identifier shared by all entries of one manifest fetch.
    pub dataset_id: Option<DatasetId>,
}

impl FileEntry {
    /// Create an entry, normalizing `path` and dropping an empty hash.
    pub fn new(
        path: &str,
        size: u64,
        content_hash: Option<String>,
        dataset_id: Option<DatasetId>,
    ) -> Self {
        Self {
            path: normalize_remote_path(path),
            size,
            content_hash: content_hash.filter(|h| !h.is_empty()),
            dataset_id,
        }
    }

    /// The expected content hash, or `None` when the entry is unverifiable.
    pub fn expected_hash(&self) -> Option<&str> {
        self.content_hash.as_deref().filter(|h| !h.is_empty())
    }

    /// The final path component.
    pub fn file_name(&self) -> &str {
        self.path.rsplit('/').next().unwrap_or(&self.path)
    }
}

/// Ordered, path-unique list of remote files.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Manifest {
    entries: Vec<FileEntry>,
    dataset_id: Option<DatasetId>,
    seen: HashSet<String>,
}

impl Manifest {
    /// Create an empty manifest.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a manifest from entries, keeping the first occurrence of each path.
    pub fn from_entries(entries: impl IntoIterator<Item = FileEntry>) -> Self {
        let mut manifest = Self::new();
        for entry in entries {
            manifest.push(entry);
        }
        manifest
    }

    /// Append an entry.
    ///
    /// Returns `false` (and drops the entry) if its path is already present.
    pub fn push(&mut self, entry: FileEntry) -> bool {
        if !self.seen.insert(entry.path.clone()) {
            return false;
        }
        self.entries.push(entry);
        true
    }

    /// Record the repository-scoped identifier. Only the first value sticks.
    pub fn set_dataset_id(&mut self, id: DatasetId) {
        if self.dataset_id.is_none() {
            self.dataset_id = Some(id);
        }
    }

    /// Repository-scoped identifier, if any entry carried one.
    pub const fn dataset_id(&self) -> Option<&DatasetId> {
        self.dataset_id.as_ref()
    }

    /// All entries in manifest order.
    pub fn entries(&self) -> &[FileEntry] {
        &self.entries
    }

    /// Iterate over entries in manifest order.
    pub fn iter(&self) -> std::slice::Iter<'_, FileEntry> {
        self.entries.iter()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the manifest holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The first entry, used as the representative probe for prechecks.
    pub fn first(&self) -> Option<&FileEntry> {
        self.entries.first()
    }

    /// Sum of all entry sizes.
    pub fn total_size(&self) -> u64 {
        self.entries.iter().map(|e| e.size).sum()
    }
}

impl<'a> IntoIterator for &'a Manifest {
    type Item = &'a FileEntry;
    type IntoIter = std::slice::Iter<'a, FileEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
