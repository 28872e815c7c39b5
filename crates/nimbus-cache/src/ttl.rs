use dashmap::DashMap;
use jiff::Timestamp;
use nimbus_core::{Clock, SystemClock, Units, WeatherCache, WeatherRecord};
use std::time::Duration;
use tracing::{debug, trace};
use typed_builder::TypedBuilder;

/// How long a record is served from the cache unless configured otherwise.
pub const DEFAULT_TTL: Duration = Duration::from_secs(300);

/// Configures a [`TtlCache`].
#[derive(Debug, Clone, Copy, TypedBuilder)]
pub struct TtlCacheSettings {
    /// Time-to-live applied to every entry on insertion.
    #[builder(default = DEFAULT_TTL)]
    pub ttl: Duration,
}

impl Default for TtlCacheSettings {
    fn default() -> Self {
        Self::builder().build()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct CacheKey {
    city: String,
    units: Units,
}

impl CacheKey {
    fn new(city: &str, units: Units) -> Self {
        Self {
            city: city.to_lowercase(),
            units,
        }
    }
}

#[derive(Debug, Clone)]
struct Entry {
    expires_at: Timestamp,
    record: WeatherRecord,
}

impl Entry {
    fn is_fresh(&self, now: Timestamp) -> bool {
        now <= self.expires_at
    }
}

/// In-memory weather cache with a fixed time-to-live.
///
/// Stale entries are evicted lazily when they are next read; there is no size
/// bound and no background sweep. DashMap's sharded locks make each
/// `get`/`put` atomic for its key while leaving other keys uncontended.
#[derive(Debug)]
pub struct TtlCache<C = SystemClock> {
    entries: DashMap<CacheKey, Entry>,
    ttl: Duration,
    clock: C,
}

impl TtlCache<SystemClock> {
    /// Creates a cache backed by the system clock.
    pub fn new(settings: TtlCacheSettings) -> Self {
        Self::with_clock(settings, SystemClock)
    }
}

impl Default for TtlCache<SystemClock> {
    fn default() -> Self {
        Self::new(TtlCacheSettings::default())
    }
}

impl<C: Clock> TtlCache<C> {
    pub fn with_clock(settings: TtlCacheSettings, clock: C) -> Self {
        Self {
            entries: DashMap::new(),
            ttl: settings.ttl,
            clock,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }
}

impl<C: Clock> WeatherCache for TtlCache<C> {
    fn get(&self, city: &str, units: Units) -> Option<WeatherRecord> {
        let key = CacheKey::new(city, units);
        let now = self.clock.now();

        {
            let entry = self.entries.get(&key)?;
            if entry.is_fresh(now) {
                debug!(city = %key.city, units = %units, "weather cache hit");
                return Some(entry.record.clone());
            }
        }

        // A concurrent put may have refreshed the entry since the read guard
        // was released; only evict if it is still stale.
        self.entries.remove_if(&key, |_, entry| !entry.is_fresh(now));
        trace!(city = %key.city, units = %units, "evicted stale weather cache entry");
        None
    }

    fn put(&self, city: &str, units: Units, record: WeatherRecord) {
        let key = CacheKey::new(city, units);
        let expires_at = self
            .clock
            .now()
            .checked_add(self.ttl)
            .unwrap_or(Timestamp::MAX);

        trace!(city = %key.city, units = %units, expires_at = %expires_at, "caching weather record");
        self.entries.insert(key, Entry { expires_at, record });
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}
