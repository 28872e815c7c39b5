//! Core types and traits for the Nimbus weather service.
//!
//! This crate provides the shared vocabulary used by the cache, the upstream
//! client, the lookup log and the service that composes them.

pub mod cache;
pub mod client;
pub mod clock;
pub mod error;
pub mod log;
pub mod lookup;
pub mod record;
pub mod service;
pub mod units;

pub use cache::WeatherCache;
pub use client::{ApiKey, WeatherClient};
pub use clock::{Clock, ManualClock, SystemClock};
pub use error::{CoreError, LogError};
pub use log::LookupLog;
pub use lookup::{BulkError, BulkResult, Lookup, LookupFailure, LookupOutcome};
pub use record::WeatherRecord;
pub use service::WeatherLookup;
pub use units::Units;
