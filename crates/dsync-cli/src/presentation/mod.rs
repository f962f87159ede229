//! Shared CLI presentation utilities.
//!
//! Keep this module format-only: no domain transforms.

pub mod progress;
pub mod tables;

pub use progress::{TerminalProgressSink, downloaded_line, skipped_line};
pub use tables::{render_listing, separator};
