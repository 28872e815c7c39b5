use crate::units::Units;
use jiff::Timestamp;
use serde::{Deserialize, Serialize};

/// A normalized weather observation for one city.
///
/// Every measurement is optional: the provider may omit any of them and a
/// partial record is still a successful lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherRecord {
    /// Display name reported by the provider, or the requested name.
    pub city: String,
    pub units: Units,
    pub temperature: Option<f64>,
    /// Relative humidity in percent.
    pub humidity: Option<i64>,
    /// First weather condition description, e.g. "light rain".
    pub description: Option<String>,
    pub wind_speed: Option<f64>,
    /// When the record was normalized, not when the provider observed it.
    pub observed_at: Timestamp,
}
