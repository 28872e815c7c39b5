use crate::record::WeatherRecord;
use crate::units::Units;
use std::sync::Arc;

/// A cache of weather records keyed by city and unit system.
///
/// Cities are matched case-insensitively; different units for the same city
/// are independent entries. Cache operations are in-memory and infallible.
pub trait WeatherCache: Send + Sync + 'static {
    /// Returns the record if one is stored for the key and still fresh.
    fn get(&self, city: &str, units: Units) -> Option<WeatherRecord>;

    /// Stores the record, replacing any existing entry and restarting its
    /// time-to-live.
    fn put(&self, city: &str, units: Units, record: WeatherRecord);

    /// Number of stored entries, including stale ones not yet evicted.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T: WeatherCache> WeatherCache for Arc<T> {
    fn get(&self, city: &str, units: Units) -> Option<WeatherRecord> {
        (**self).get(city, units)
    }

    fn put(&self, city: &str, units: Units, record: WeatherRecord) {
        (**self).put(city, units, record)
    }

    fn len(&self) -> usize {
        (**self).len()
    }
}
