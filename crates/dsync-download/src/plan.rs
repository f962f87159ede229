//! Download planning.
//!
//! Maps each manifest entry to its local target and transfer strategy.
//! Files land under `<target root>/<dataset slug>/<relative path>`.

use std::path::{Component, Path, PathBuf};

use dsync_core::{
    DatasetId, DatasetRef, DownloadError, DownloadResult, FileEntry, Manifest, SyncSettings,
};

use crate::strategy::DownloadStrategy;

/// What the dispatcher will do with one file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// A verified local copy exists.
    Skip,
    /// Fetch with the given strategy.
    Fetch(DownloadStrategy),
}

/// One manifest entry with its resolved target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedFile {
    /// The remote file.
    pub entry: FileEntry,
    /// Absolute local path the file is written to.
    pub target: PathBuf,
    /// Strategy used if the file has to be fetched.
    pub strategy: DownloadStrategy,
}

impl PlannedFile {
    /// Combine the size-based strategy with the local verification result.
    pub const fn decide(&self, verified_locally: bool) -> Decision {
        if verified_locally {
            Decision::Skip
        } else {
            Decision::Fetch(self.strategy)
        }
    }
}

/// Ordered plan for one run.
#[derive(Debug, Clone)]
pub struct DownloadPlan {
    dataset_id: DatasetId,
    dataset_dir: PathBuf,
    files: Vec<PlannedFile>,
    total_bytes: u64,
}

impl DownloadPlan {
    /// Build the plan for a non-empty manifest.
    ///
    /// Fails when the listing carried no dataset id or when an entry path
    /// would escape the dataset directory.
    pub fn build(
        manifest: &Manifest,
        dataset: &DatasetRef,
        target_root: &Path,
        settings: &SyncSettings,
    ) -> DownloadResult<Self> {
        let dataset_id = manifest
            .dataset_id()
            .cloned()
            .ok_or_else(|| DownloadError::invalid_response("listing did not include a dataset id"))?;

        let dataset_dir = target_root.join(dataset.slug());
        let files = manifest
            .iter()
            .map(|entry| {
                Ok(PlannedFile {
                    target: target_path(&dataset_dir, &entry.path)?,
                    strategy: DownloadStrategy::select(entry.size, settings),
                    entry: entry.clone(),
                })
            })
            .collect::<DownloadResult<Vec<_>>>()?;

        Ok(Self {
            dataset_id,
            dataset_dir,
            files,
            total_bytes: manifest.total_size(),
        })
    }

    /// Identifier used to resolve download URLs.
    pub const fn dataset_id(&self) -> &DatasetId {
        &self.dataset_id
    }

    /// `<target root>/<dataset slug>`.
    pub fn dataset_dir(&self) -> &Path {
        &self.dataset_dir
    }

    /// Planned files in manifest order.
    pub fn files(&self) -> &[PlannedFile] {
        &self.files
    }

    /// Number of planned files.
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Whether nothing is planned.
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Sum of every planned file's size.
    pub const fn total_bytes(&self) -> u64 {
        self.total_bytes
    }
}

/// Join a normalized repository path onto the dataset directory.
///
/// Only plain components are accepted, so `..` or absolute segments from a
/// hostile listing cannot write outside `dataset_dir`.
fn target_path(dataset_dir: &Path, relative: &str) -> DownloadResult<PathBuf> {
    let relative = Path::new(relative);
    let mut target = dataset_dir.to_path_buf();
    let mut any = false;
    for component in relative.components() {
        match component {
            Component::Normal(part) => {
                target.push(part);
                any = true;
            }
            Component::CurDir => {}
            _ => {
                return Err(DownloadError::invalid_response(format!(
                    "unsafe file path in listing: {}",
                    relative.display()
                )));
            }
        }
    }
    if !any {
        return Err(DownloadError::invalid_response("empty file path in listing"));
    }
    Ok(target)
}

/// Deepest directory containing every path.
///
/// Returns `fallback` for an empty list.
pub fn common_parent(paths: &[&Path], fallback: &Path) -> PathBuf {
    let mut iter = paths.iter();
    let Some(first) = iter.next() else {
        return fallback.to_path_buf();
    };

    let mut common: Vec<Component<'_>> = first
        .parent()
        .map(|p| p.components().collect())
        .unwrap_or_default();

    for path in iter {
        let parent: Vec<Component<'_>> = path
            .parent()
            .map(|p| p.components().collect())
            .unwrap_or_default();
        let shared = common
            .iter()
            .zip(parent.iter())
            .take_while(|(a, b)| a == b)
            .count();
        common.truncate(shared);
    }

    common.iter().collect()
}
