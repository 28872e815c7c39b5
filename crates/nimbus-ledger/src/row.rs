use nimbus_core::WeatherRecord;
use std::fmt::{Display, Formatter};

/// Column names, in order, written once at the top of a new log.
pub const HEADER: &str = "ts,city,units,temp,humidity,description,wind_speed";

pub const COLUMNS: usize = 7;

/// A [`WeatherRecord`] flattened into log columns.
///
/// Absent measurements are empty fields. Commas inside free text are replaced
/// with spaces instead of being quoted, so every row splits into exactly
/// [`COLUMNS`] fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRow {
    pub ts: String,
    pub city: String,
    pub units: String,
    pub temp: String,
    pub humidity: String,
    pub description: String,
    pub wind_speed: String,
}

impl LogRow {
    pub fn fields(&self) -> [&str; COLUMNS] {
        [
            &self.ts,
            &self.city,
            &self.units,
            &self.temp,
            &self.humidity,
            &self.description,
            &self.wind_speed,
        ]
    }
}

impl From<&WeatherRecord> for LogRow {
    fn from(record: &WeatherRecord) -> Self {
        Self {
            ts: record.observed_at.to_string(),
            city: scrub(&record.city),
            units: record.units.to_string(),
            temp: optional(record.temperature),
            humidity: optional(record.humidity),
            description: record.description.as_deref().map(scrub).unwrap_or_default(),
            wind_speed: optional(record.wind_speed),
        }
    }
}

impl Display for LogRow {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.fields().join(","))
    }
}

fn optional<T: ToString>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

fn scrub(text: &str) -> String {
    text.replace([',', '\n', '\r'], " ")
}
