//! Download error types.
//!
//! These errors are designed to be serializable and not depend on external
//! error types like `std::io::Error`. For I/O errors, we capture the kind
//! and message as strings.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::ports::HubPortError;

/// Error type for download operations.
///
/// Every variant is fatal for the run that produced it. Hash mismatches on
/// local files are not errors: they only force a re-download.
#[derive(Clone, Debug, Error, Serialize, Deserialize, PartialEq, Eq)]
pub enum DownloadError {
    /// I/O error during file operations.
    #[error("I/O error ({kind}): {message}")]
    Io {
        /// The kind of I/O error (e.g., "not found", "permission denied").
        kind: String,
        /// Detailed error message.
        message: String,
    },

    /// Network/HTTP error during listing, URL resolution or transfer.
    #[error("Network error: {message}")]
    Network {
        /// Detailed error message.
        message: String,
        /// HTTP status code if available.
        #[serde(skip_serializing_if = "Option::is_none")]
        status_code: Option<u16>,
    },

    /// The hub refused access to the dataset or to its files.
    #[error("Access denied: {message}")]
    AccessDenied {
        /// What was denied.
        message: String,
    },

    /// Dataset or file not found on the hub.
    #[error("Not found: {message}")]
    NotFound {
        /// What was not found.
        message: String,
    },

    /// The dataset reference could not be parsed.
    #[error("Invalid dataset repository: {value}")]
    InvalidDataset {
        /// The rejected input.
        value: String,
    },

    /// The hub answered with something dsync cannot use.
    #[error("Invalid response: {message}")]
    InvalidResponse {
        /// Description of what was invalid.
        message: String,
    },

    /// One byte range of a segmented download failed.
    #[error("Segment {index} failed: {message}")]
    SegmentFailed {
        /// Zero-based segment index.
        index: usize,
        /// Underlying failure.
        message: String,
    },

    /// A transfer wrote a different number of bytes than the manifest size.
    #[error("Size mismatch: expected {expected} bytes, got {actual}")]
    SizeMismatch {
        /// Size from the manifest.
        expected: u64,
        /// Bytes actually written.
        actual: u64,
    },

    /// General/uncategorized error.
    #[error("{message}")]
    Other {
        /// Error message.
        message: String,
    },
}

impl DownloadError {
    /// Create an I/O error from kind and message strings.
    pub fn io(kind: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Io {
            kind: kind.into(),
            message: message.into(),
        }
    }

    /// Create an I/O error from a `std::io::Error`.
    ///
    /// This captures the error kind name and message for serialization.
    #[must_use]
    pub fn from_io_error(err: &std::io::Error) -> Self {
        let kind = err.kind();
        Self::Io {
            kind: format!("{kind:?}"),
            message: err.to_string(),
        }
    }

    /// Create a network error.
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network {
            message: message.into(),
            status_code: None,
        }
    }

    /// Create a network error with HTTP status code.
    pub fn network_with_status(message: impl Into<String>, status_code: u16) -> Self {
        Self::Network {
            message: message.into(),
            status_code: Some(status_code),
        }
    }

    /// Create an access denied error.
    pub fn access_denied(message: impl Into<String>) -> Self {
        Self::AccessDenied {
            message: message.into(),
        }
    }

    /// Create a not found error.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    /// Create an invalid dataset error.
    pub fn invalid_dataset(value: impl Into<String>) -> Self {
        Self::InvalidDataset {
            value: value.into(),
        }
    }

    /// Create an invalid response error.
    pub fn invalid_response(message: impl Into<String>) -> Self {
        Self::InvalidResponse {
            message: message.into(),
        }
    }

    /// Create a segment failure.
    pub fn segment_failed(index: usize, message: impl Into<String>) -> Self {
        Self::SegmentFailed {
            index,
            message: message.into(),
        }
    }

    /// Create a size mismatch error.
    #[must_use]
    pub const fn size_mismatch(expected: u64, actual: u64) -> Self {
        Self::SizeMismatch { expected, actual }
    }

    /// Create a generic error.
    pub fn other(message: impl Into<String>) -> Self {
        Self::Other {
            message: message.into(),
        }
    }

    /// Whether the failure happened on the wire (listing, URL resolution or
    /// byte transfer) rather than locally.
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        matches!(
            self,
            Self::Network { .. }
                | Self::InvalidResponse { .. }
                | Self::SegmentFailed { .. }
                | Self::SizeMismatch { .. }
        )
    }

    /// Whether this is an access denial.
    #[must_use]
    pub const fn is_access_denied(&self) -> bool {
        matches!(self, Self::AccessDenied { .. })
    }

    /// Convert to a user-friendly message.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Io { message, .. } => format!("File operation failed: {message}"),
            Self::Network {
                message,
                status_code: Some(code),
            } => {
                format!("Network error (HTTP {code}): {message}")
            }
            Self::Network { message, .. } => format!("Network error: {message}"),
            Self::AccessDenied { message } => format!(
                "Access denied: {message}. The dataset may be private or you may lack download permission."
            ),
            Self::NotFound { message } => format!("Not found: {message}"),
            Self::InvalidDataset { value } => {
                format!("Invalid dataset repository '{value}'. Use the form owner/name.")
            }
            Self::InvalidResponse { message } => {
                format!("Unexpected response from the dataset hub: {message}")
            }
            Self::SegmentFailed { index, message } => {
                format!("Download failed in segment {index}: {message}")
            }
            Self::SizeMismatch { expected, actual } => format!(
                "Downloaded file is incomplete ({actual} of {expected} bytes). Run the command again."
            ),
            Self::Other { message } => message.clone(),
        }
    }
}

impl From<HubPortError> for DownloadError {
    fn from(err: HubPortError) -> Self {
        match err {
            HubPortError::AccessDenied { dataset } => Self::access_denied(dataset),
            HubPortError::NotFound { dataset } => Self::not_found(dataset),
            HubPortError::RateLimited => {
                Self::network_with_status("rate limit exceeded, try again later", 429)
            }
            HubPortError::Network { message } => Self::network(message),
            HubPortError::InvalidResponse { message } => Self::invalid_response(message),
            HubPortError::Configuration { message } => Self::other(message),
        }
    }
}

/// Convenience result type for download operations.
pub type DownloadResult<T> = Result<T, DownloadError>;
