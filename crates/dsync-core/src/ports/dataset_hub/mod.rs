//! Dataset hub port.
//!
//! Defines the interface the download engine uses to talk to the remote
//! dataset hub. The HTTP implementation lives in `dsync-hub`.

mod client;
mod error;
mod types;

pub use client::DatasetHubPort;
pub use error::{HubPortError, HubPortResult};
pub use types::{FileListPage, FileListQuery, RemoteFile};
