//! Domain types for dataset repositories and their file manifests.

mod dataset;
mod manifest;

pub use dataset::{DatasetId, DatasetRef};
pub use manifest::{FileEntry, Manifest, normalize_remote_path};
