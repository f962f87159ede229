//! CLI bootstrap - the composition root.
//!
//! This module is the ONLY place where infrastructure is wired together
//! for the CLI adapter:
//! - Hub client (via dsync-hub)
//! - Byte source for transfers (via dsync-download)
//! - Terminal progress sink
//!
//! Command handlers receive the composed `CliContext` and delegate to its
//! `DatasetSession`.

use std::path::PathBuf;
use std::sync::Arc;

use dsync_core::{SyncSettings, resolve_target_root};
use dsync_download::{DatasetSession, ProgressSink, ReqwestByteSource};
use dsync_hub::{DefaultHubClient, HubClientConfig};

use crate::error::CliError;
use crate::presentation::TerminalProgressSink;

const USER_AGENT: &str = concat!("dsync/", env!("CARGO_PKG_VERSION"));

/// Bootstrap configuration for the CLI.
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    /// Hub API base URL; the client default when `None`.
    pub api_url: Option<String>,
    /// Optional bearer token.
    pub token: Option<String>,
    /// Raw target directory argument.
    pub target: Option<String>,
    /// Download tuning.
    pub settings: SyncSettings,
}

impl CliConfig {
    /// Hub client configuration derived from the CLI options.
    pub fn hub_config(&self) -> HubClientConfig {
        let config = HubClientConfig::new()
            .with_user_agent(USER_AGENT)
            .with_optional_token(self.token.clone());
        match self.api_url.as_deref().map(str::trim) {
            Some(url) if !url.is_empty() => config.with_base_url(url),
            _ => config,
        }
    }
}

/// Fully composed application context for CLI commands.
pub struct CliContext {
    /// Runs `get`, `download` and `query`.
    pub session: DatasetSession,
    /// Terminal output shared with the session.
    pub progress: Arc<TerminalProgressSink<std::io::Stdout>>,
    /// Resolved directory the dataset folder is created in.
    pub target_root: PathBuf,
}

/// Bootstrap the CLI application.
///
/// Validates settings, resolves the target root and builds the hub client
/// and byte source.
pub fn bootstrap(config: &CliConfig) -> Result<CliContext, CliError> {
    config.settings.validate()?;
    let target_root = resolve_target_root(config.target.as_deref())?;

    let hub = DefaultHubClient::new(&config.hub_config())?;
    let source = ReqwestByteSource::with_user_agent(USER_AGENT)?;
    let progress = Arc::new(TerminalProgressSink::stdout());
    let sink: Arc<dyn ProgressSink> = progress.clone();

    tracing::debug!(
        target_root = %target_root.display(),
        threshold = config.settings.file_threshold,
        segments = config.settings.segment_count,
        "bootstrapped"
    );

    let session = DatasetSession::new(
        Arc::new(hub),
        Arc::new(source),
        sink,
        config.settings,
        target_root.clone(),
    );

    Ok(CliContext {
        session,
        progress,
        target_root,
    })
}
