//! Errors raised while talking to the hub.
//!
//! They never leave this crate: [`HubError::into_port`] turns them into the
//! core `HubPortError` at the port boundary.

use dsync_core::HubPortError;
use thiserror::Error;

pub type HubResult<T> = Result<T, HubError>;

#[derive(Debug, Error)]
pub enum HubError {
    /// Non-success HTTP status.
    #[error("Hub API request failed with status {status}: {url}")]
    ApiRequestFailed { status: u16, url: String },

    /// Body did not have the expected shape.
    #[error("Invalid response from hub API: {message}")]
    InvalidResponse { message: String },

    /// `download-check` answered `allowed: false`.
    #[error("Download of '{path}' denied by hub")]
    DownloadDenied { path: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("JSON parsing error: {0}")]
    JsonParse(#[from] serde_json::Error),
}

impl HubError {
    /// Whether sending the same request again may succeed.
    ///
    /// Server errors, rate limiting and transport failures qualify; other
    /// statuses and malformed bodies do not.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::ApiRequestFailed { status, .. } => *status == 429 || *status >= 500,
            Self::Network(e) => !e.is_builder() && !e.is_decode(),
            Self::InvalidResponse { .. }
            | Self::DownloadDenied { .. }
            | Self::InvalidUrl(_)
            | Self::JsonParse(_) => false,
        }
    }

    /// Map to the port error. `subject` names the dataset or file the
    /// request was about and ends up in access and not-found messages.
    pub fn into_port(self, subject: &str) -> HubPortError {
        match self {
            Self::ApiRequestFailed { status, url } => match status {
                401 | 403 => HubPortError::AccessDenied {
                    dataset: subject.to_string(),
                },
                404 => HubPortError::NotFound {
                    dataset: subject.to_string(),
                },
                429 => HubPortError::RateLimited,
                _ => HubPortError::Network {
                    message: format!("API request failed with status {status}: {url}"),
                },
            },
            Self::DownloadDenied { path } => HubPortError::AccessDenied {
                dataset: format!("{subject} ({path})"),
            },
            Self::InvalidResponse { message } => HubPortError::InvalidResponse { message },
            Self::Network(e) => HubPortError::Network {
                message: e.to_string(),
            },
            Self::InvalidUrl(e) => HubPortError::Configuration {
                message: e.to_string(),
            },
            Self::JsonParse(e) => HubPortError::InvalidResponse {
                message: e.to_string(),
            },
        }
    }
}
