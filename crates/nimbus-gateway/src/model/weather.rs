use jiff::Timestamp;
use nimbus_core::{BulkError, BulkResult, Lookup, LookupFailure, Units};
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const PROVIDER: &str = "openweather";

/// Units are kept as raw text so a bad value gets our own 400 body.
#[derive(Debug, Default, Deserialize)]
pub struct UnitsQuery {
    pub units: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct BulkQuery {
    pub cities: Option<String>,
    pub units: Option<String>,
}

impl BulkQuery {
    /// Splits on commas, trims each name and drops blanks.
    pub fn city_list(&self) -> Vec<String> {
        self.cities
            .as_deref()
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|city| !city.is_empty())
            .map(str::to_string)
            .collect()
    }
}

#[derive(Debug, Serialize)]
pub struct WeatherResponse {
    pub city: String,
    pub units: Units,
    pub temp: Option<f64>,
    pub humidity: Option<i64>,
    pub description: Option<String>,
    pub wind_speed: Option<f64>,
    pub ts: Timestamp,
    pub cache: bool,
}

impl From<Lookup> for WeatherResponse {
    fn from(lookup: Lookup) -> Self {
        let record = lookup.record;
        Self {
            city: record.city,
            units: record.units,
            temp: record.temperature,
            humidity: record.humidity,
            description: record.description,
            wind_speed: record.wind_speed,
            ts: record.observed_at,
            cache: lookup.cached,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct UpstreamErrorResponse {
    pub source: &'static str,
    pub error: Value,
}

impl From<LookupFailure> for UpstreamErrorResponse {
    fn from(failure: LookupFailure) -> Self {
        Self {
            source: PROVIDER,
            error: failure.error_body(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct BulkErrorResponse {
    pub city: String,
    pub code: u16,
    pub error: Value,
}

impl From<BulkError> for BulkErrorResponse {
    fn from(err: BulkError) -> Self {
        Self {
            city: err.city,
            code: err.failure.status,
            error: err.failure.error_body(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct BulkWeatherResponse {
    pub units: Units,
    pub count: usize,
    pub results: Vec<WeatherResponse>,
    pub errors: Vec<BulkErrorResponse>,
}

impl From<BulkResult> for BulkWeatherResponse {
    fn from(result: BulkResult) -> Self {
        Self {
            units: result.units,
            count: result.count(),
            results: result.results.into_iter().map(Into::into).collect(),
            errors: result.errors.into_iter().map(Into::into).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn city_list_trims_and_drops_blanks() {
        let query = BulkQuery {
            cities: Some(" Seattle ,, New York , ,Paris,".to_string()),
            units: None,
        };
        assert_eq!(query.city_list(), vec!["Seattle", "New York", "Paris"]);
    }

    #[test]
    fn missing_cities_is_an_empty_list() {
        assert!(BulkQuery::default().city_list().is_empty());
    }

    #[test]
    fn provider_body_is_forwarded_unchanged() {
        let provider = serde_json::json!({"cod": "404", "message": "city not found"});
        let err = BulkErrorResponse::from(BulkError {
            city: "NoSuchCity123".to_string(),
            failure: LookupFailure::new(404, "city not found").with_body(provider.clone()),
        });
        assert_eq!(
            serde_json::to_value(&err).unwrap(),
            serde_json::json!({"city": "NoSuchCity123", "code": 404, "error": provider})
        );
    }

    #[test]
    fn upstream_error_body_names_the_provider() {
        let body = UpstreamErrorResponse::from(
            LookupFailure::transport("connection refused"),
        );
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "source": "openweather",
                "error": {"message": "Upstream request failed", "detail": "connection refused"}
            })
        );
    }
}
