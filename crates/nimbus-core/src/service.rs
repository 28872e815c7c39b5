use crate::client::ApiKey;
use crate::error::CoreError;
use crate::lookup::{BulkResult, LookupOutcome};
use crate::units::Units;
use async_trait::async_trait;

/// The weather subsystem as seen by the API layer.
///
/// Callers validate their input first (known units, trimmed non-empty city
/// names, a configured API key); every call then ends in an outcome rather
/// than an error escaping to the caller.
#[async_trait]
pub trait WeatherLookup: Send + Sync + 'static {
    /// Looks up one city, serving from the cache when a fresh entry exists.
    async fn lookup(&self, city: &str, units: Units, api_key: &ApiKey) -> LookupOutcome;

    /// Looks up every city concurrently and merges the outcomes.
    ///
    /// Returns `Err(EmptyCityList)` without doing any work when `cities` is
    /// empty. One city failing never affects the others.
    async fn fetch_all(
        &self,
        cities: &[String],
        units: Units,
        api_key: &ApiKey,
    ) -> Result<BulkResult, CoreError>;

    /// Number of entries currently held by the cache.
    fn cached_entries(&self) -> usize;
}
