//! HTTP client for the dataset hub.
//!
//! Implements [`dsync_core::DatasetHubPort`] over the hub's JSON API. Wire
//! types and HTTP errors stay inside this crate; consumers only see the
//! core port DTOs and `HubPortError`.
//!
//! ```no_run
//! use dsync_hub::{DefaultHubClient, HubClientConfig};
//!
//! let config = HubClientConfig::new().with_base_url("https://hub.internal/api/v1");
//! let client = DefaultHubClient::new(&config).expect("valid config");
//! ```

#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]
// DefaultHubClient is meant to be used through the DatasetHubPort trait,
// not its internal generic structure
#![allow(private_interfaces)]

mod client;
mod config;
mod error;
mod http;
mod models;
mod parsing;
mod port;
mod url;

// ============================================================================
// Public API
// ============================================================================

// Client
pub use client::DefaultHubClient;

// Configuration
pub use config::{DEFAULT_BASE_URL, HubClientConfig, RetryPolicy};
