//! Metrics collection modules
//!
//! Thread-safe metrics for remote accessibility calls.

pub mod call;

pub use call::{RemoteCallMetrics, RemoteCallSnapshot};
