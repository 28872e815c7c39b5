//! Process-wide tracing setup shared by the Nimbus binaries.

pub mod error;
pub mod subscriber;

pub use error::TelemetryError;
pub use subscriber::{init, LogFormat, TelemetryGuard, TelemetrySettings, DEFAULT_FILTER};
