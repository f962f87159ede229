//! Dataset hub client.
//!
//! This module provides the main client interface for the hub's JSON API.

// Constructor is used via port.rs which compiler doesn't detect
#![allow(dead_code)]

mod files;

use dsync_core::HubPortError;

use crate::config::HubClientConfig;
use crate::http::{HttpBackend, ReqwestBackend};
use crate::models::HubConfig;

// ============================================================================
// Type Aliases
// ============================================================================

/// Default hub client using the reqwest HTTP backend.
pub type DefaultHubClient = HubClient<ReqwestBackend>;

// ============================================================================
// Client
// ============================================================================

/// Client for the dataset hub API.
///
/// This client is generic over an HTTP backend, allowing for easy testing.
/// Use `DefaultHubClient` for production code.
pub struct HubClient<B: HttpBackend> {
    pub(crate) backend: B,
    pub(crate) config: HubConfig,
}

impl DefaultHubClient {
    /// Create a new client with the given configuration.
    ///
    /// Fails with `HubPortError::Configuration` when the base URL does not
    /// parse or the HTTP client cannot be built.
    pub fn new(config: &HubClientConfig) -> Result<Self, HubPortError> {
        let config = config.resolve()?;
        let backend = ReqwestBackend::new(&config).map_err(|e| HubPortError::Configuration {
            message: e.to_string(),
        })?;
        Ok(Self { backend, config })
    }
}

impl<B: HttpBackend> HubClient<B> {
    /// Create a new client with a custom backend.
    ///
    /// Use this for testing with a fake backend.
    #[cfg(test)]
    pub(crate) const fn with_backend(config: HubConfig, backend: B) -> Self {
        Self { backend, config }
    }
}
