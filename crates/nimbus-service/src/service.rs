use async_trait::async_trait;
use futures::stream::{self, StreamExt};
use nimbus_core::{
    ApiKey, BulkResult, CoreError, Lookup, LookupLog, LookupOutcome, Units, WeatherCache,
    WeatherClient, WeatherLookup,
};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};
use typed_builder::TypedBuilder;

/// Upper bound on upstream requests in flight for one batch.
pub const DEFAULT_MAX_CONCURRENCY: usize = 6;

/// Configures a [`WeatherService`].
#[derive(Debug, Clone, Copy, TypedBuilder)]
pub struct ServiceSettings {
    /// A batch of `n` cities runs at most `min(max_concurrency, n)` lookups
    /// at once. The value is clamped to `1..=DEFAULT_MAX_CONCURRENCY`, so it
    /// can only lower the bound.
    #[builder(default = DEFAULT_MAX_CONCURRENCY)]
    pub max_concurrency: usize,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self::builder().build()
    }
}

/// A concrete implementation of the [`WeatherLookup`] trait.
///
/// This service wraps a [`WeatherClient`], a [`WeatherCache`] and a
/// [`LookupLog`] to handle:
/// - cache-first single lookups
/// - logging and caching of successful upstream lookups
/// - bounded concurrent batch lookups
///
/// Only records fetched from upstream are logged; cache hits are not.
#[derive(Debug)]
pub struct WeatherService<W, C, L> {
    client: Arc<W>,
    cache: Arc<C>,
    log: Arc<L>,
    settings: ServiceSettings,
}

impl<W, C, L> Clone for WeatherService<W, C, L> {
    fn clone(&self) -> Self {
        Self {
            client: Arc::clone(&self.client),
            cache: Arc::clone(&self.cache),
            log: Arc::clone(&self.log),
            settings: self.settings,
        }
    }
}

impl<W: WeatherClient, C: WeatherCache, L: LookupLog> WeatherService<W, C, L> {
    /// Creates a new `WeatherService` with default settings.
    pub fn new(client: W, cache: C, log: L) -> Self {
        Self::with_settings(client, cache, log, ServiceSettings::default())
    }

    pub fn with_settings(client: W, cache: C, log: L, settings: ServiceSettings) -> Self {
        Self {
            client: Arc::new(client),
            cache: Arc::new(cache),
            log: Arc::new(log),
            settings,
        }
    }

    pub fn cache(&self) -> &C {
        &self.cache
    }

    pub fn settings(&self) -> ServiceSettings {
        self.settings
    }

    fn concurrency_for(&self, cities: usize) -> usize {
        self.settings
            .max_concurrency
            .clamp(1, DEFAULT_MAX_CONCURRENCY)
            .min(cities)
            .max(1)
    }
}

#[async_trait]
impl<W: WeatherClient, C: WeatherCache, L: LookupLog> WeatherLookup for WeatherService<W, C, L> {
    #[instrument(skip(self, api_key))]
    async fn lookup(&self, city: &str, units: Units, api_key: &ApiKey) -> LookupOutcome {
        if let Some(record) = self.cache.get(city, units) {
            return Ok(Lookup {
                record,
                cached: true,
            });
        }

        let record = self.client.fetch(city, units, api_key).await?;

        // The lookup already succeeded; a log failure only costs the row.
        if let Err(err) = self.log.append(&record).await {
            warn!(error = %err, "failed to append weather lookup log");
        }

        self.cache.put(city, units, record.clone());
        debug!(resolved_city = %record.city, "fetched weather from upstream");

        Ok(Lookup {
            record,
            cached: false,
        })
    }

    #[instrument(skip(self, cities, api_key), fields(requested = cities.len()))]
    async fn fetch_all(
        &self,
        cities: &[String],
        units: Units,
        api_key: &ApiKey,
    ) -> Result<BulkResult, CoreError> {
        if cities.is_empty() {
            return Err(CoreError::EmptyCityList);
        }

        let concurrency = self.concurrency_for(cities.len());
        let mut outcomes = stream::iter(cities.iter().cloned())
            .map(|city| async move {
                let outcome = self.lookup(&city, units, api_key).await;
                (city, outcome)
            })
            .buffer_unordered(concurrency);

        let mut bulk = BulkResult::new(units, cities.len());
        while let Some((city, outcome)) = outcomes.next().await {
            bulk.record(city, outcome);
        }

        info!(
            concurrency,
            succeeded = bulk.count(),
            failed = bulk.errors.len(),
            "batch weather lookup finished"
        );
        Ok(bulk)
    }

    fn cached_entries(&self) -> usize {
        self.cache.len()
    }
}
