//! Progress tracking and throttling.
//!
//! Batch progress advances once per completed file. Live byte counts of a
//! running transfer go to the presentation sink only.

mod aggregator;
mod sink;
mod throttle;
mod transfer;

pub use aggregator::{ProgressAggregator, ProgressSnapshot};
pub use sink::{DispatchEvent, NoopProgressSink, ProgressSink};
pub use throttle::ProgressThrottle;
pub use transfer::TransferProgress;

#[cfg(test)]
pub use sink::testing;
