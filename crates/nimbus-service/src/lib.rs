//! Weather lookup service.
//!
//! [`WeatherService`] composes a [`nimbus_core::WeatherClient`], a
//! [`nimbus_core::WeatherCache`] and a [`nimbus_core::LookupLog`] into the
//! single-city pipeline (cache, upstream, log, cache fill) and the bounded
//! concurrent batch lookup built on top of it.

pub mod service;

pub use service::{ServiceSettings, WeatherService, DEFAULT_MAX_CONCURRENCY};
