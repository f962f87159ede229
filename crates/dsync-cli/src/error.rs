//! CLI-specific error types and mappings.
//!
//! Maps library errors to exit codes and the single line printed on failure.

use dsync_core::{DownloadError, HubPortError, PathError, SettingsError};
use thiserror::Error;

/// CLI-specific error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Invalid command-line input.
    #[error("Invalid arguments: {0}")]
    Arguments(String),

    /// Configuration error (settings, target directory, hub client).
    #[error("Configuration error: {0}")]
    Config(String),

    /// A download, listing or verification failure.
    #[error(transparent)]
    Download(#[from] DownloadError),
}

impl CliError {
    /// Map error to an exit code.
    ///
    /// - 1: run failed
    /// - 2: invalid arguments
    /// - 78: configuration error (`EX_CONFIG`)
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Download(_) => 1,
            Self::Arguments(_) => 2,
            Self::Config(_) => 78,
        }
    }

    /// The line shown to the user.
    pub fn user_message(&self) -> String {
        match self {
            Self::Download(err) => err.user_message(),
            other => other.to_string(),
        }
    }
}

impl From<SettingsError> for CliError {
    fn from(err: SettingsError) -> Self {
        Self::Config(err.to_string())
    }
}

impl From<PathError> for CliError {
    fn from(err: PathError) -> Self {
        Self::Config(err.to_string())
    }
}

impl From<HubPortError> for CliError {
    fn from(err: HubPortError) -> Self {
        match err {
            HubPortError::Configuration { message } => Self::Config(message),
            other => Self::Download(other.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        assert_eq!(CliError::Arguments("x".into()).exit_code(), 2);
        assert_eq!(CliError::Config("x".into()).exit_code(), 78);
        assert_eq!(
            CliError::from(DownloadError::network("reset")).exit_code(),
            1
        );
    }

    #[test]
    fn test_download_errors_use_friendly_message() {
        let err = CliError::from(DownloadError::access_denied("lab/set"));
        assert!(err.user_message().starts_with("Access denied: lab/set"));
    }

    #[test]
    fn test_hub_configuration_error_is_config() {
        let err = CliError::from(HubPortError::Configuration {
            message: "bad url".into(),
        });
        assert!(matches!(err, CliError::Config(_)));
    }
}
