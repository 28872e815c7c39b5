//! In-memory caching of weather records.

pub mod ttl;

pub use ttl::{TtlCache, TtlCacheSettings, DEFAULT_TTL};
