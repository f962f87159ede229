//! Failures reported by a [`DatasetHubPort`](super::DatasetHubPort).

use thiserror::Error;

/// What went wrong talking to the hub, independent of transport.
///
/// `dataset` fields carry whatever the failing call was about: a
/// `owner/name` pair, a numeric dataset id, or a file path.
#[derive(Debug, Error)]
pub enum HubPortError {
    #[error("Access denied for dataset: {dataset}")]
    AccessDenied { dataset: String },

    #[error("Dataset not found: {dataset}")]
    NotFound { dataset: String },

    #[error("Rate limit exceeded, try again later")]
    RateLimited,

    #[error("Network error: {message}")]
    Network { message: String },

    /// The hub answered, but not in a shape the client understands.
    #[error("Invalid API response: {message}")]
    InvalidResponse { message: String },

    /// Bad client settings such as an unparsable hub URL.
    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

pub type HubPortResult<T> = Result<T, HubPortError>;
