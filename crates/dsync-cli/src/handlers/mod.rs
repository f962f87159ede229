//! Command handlers.
//!
//! Each handler parses its arguments, delegates to the session and prints
//! the outcome.

pub mod download;
pub mod query;

use dsync_core::{DatasetRef, DownloadError};

use crate::error::CliError;

/// Parse an `owner/name` repository argument.
pub fn parse_dataset(repo: &str) -> Result<DatasetRef, CliError> {
    DatasetRef::parse(repo).ok_or_else(|| DownloadError::invalid_dataset(repo).into())
}
