//! Download tuning settings and validation.
//!
//! These are pure domain types with no infrastructure dependencies. The CLI
//! fills them from flags and environment variables.

use serde::{Deserialize, Serialize};

/// Files at or above this size (100 MiB) use the segmented strategy.
pub const DEFAULT_FILE_THRESHOLD: u64 = 100 * 1024 * 1024;

/// Number of concurrent byte ranges per segmented download.
pub const DEFAULT_SEGMENT_COUNT: usize = 8;

/// Upper bound on segments per file.
pub const MAX_SEGMENT_COUNT: usize = 64;

/// Page size requested when building a download manifest.
pub const DEFAULT_PAGE_LIMIT: u32 = 500;

/// Page size requested when listing a dataset for display.
pub const DEFAULT_QUERY_PAGE_LIMIT: u32 = 1000;

/// Tuning knobs for one download run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncSettings {
    /// Size boundary in bytes between single-stream and segmented downloads.
    pub file_threshold: u64,
    /// Number of byte ranges a large file is split into.
    pub segment_count: usize,
    /// Items requested per listing page for downloads.
    pub page_limit: u32,
    /// Items requested per listing page for `query`.
    pub query_page_limit: u32,
}

impl Default for SyncSettings {
    fn default() -> Self {
        Self {
            file_threshold: DEFAULT_FILE_THRESHOLD,
            segment_count: DEFAULT_SEGMENT_COUNT,
            page_limit: DEFAULT_PAGE_LIMIT,
            query_page_limit: DEFAULT_QUERY_PAGE_LIMIT,
        }
    }
}

impl SyncSettings {
    /// Validate settings values.
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.file_threshold == 0 {
            return Err(SettingsError::ZeroThreshold);
        }

        if !(1..=MAX_SEGMENT_COUNT).contains(&self.segment_count) {
            return Err(SettingsError::InvalidSegmentCount(self.segment_count));
        }

        if self.page_limit == 0 || self.query_page_limit == 0 {
            return Err(SettingsError::ZeroPageLimit);
        }

        Ok(())
    }
}

/// Settings validation error.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum SettingsError {
    #[error("File threshold must be greater than zero")]
    ZeroThreshold,

    #[error("Segment count must be between 1 and {MAX_SEGMENT_COUNT}, got {0}")]
    InvalidSegmentCount(usize),

    #[error("Page limit must be at least 1")]
    ZeroPageLimit,
}
