//! Metrics Collector crate (§4.5, §6): frame/input/bandwidth accounting and
//! newline-delimited JSON snapshot output.

mod collector;
mod error;
mod snapshot;

pub use collector::MetricsCollector;
pub use error::MetricsError;
pub use snapshot::Metrics;
