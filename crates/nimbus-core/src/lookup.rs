use crate::record::WeatherRecord;
use crate::units::Units;
use serde::Serialize;
use serde_json::{json, Value};
use thiserror::Error;

/// Status used when the provider could not be reached or answered garbage.
pub const BAD_GATEWAY: u16 = 502;

/// A successful lookup and where it was served from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Lookup {
    pub record: WeatherRecord,
    /// `true` when the record came from the cache rather than the provider.
    pub cached: bool,
}

/// Why a lookup produced no record.
///
/// `status` is an HTTP status: the provider's own status for application
/// failures, or 502 when the provider could not be reached. `body` holds the
/// provider's parsed JSON error, when it sent one.
#[derive(Debug, Clone, PartialEq, Serialize, Error)]
#[error("lookup failed with status {status}: {message}")]
pub struct LookupFailure {
    pub status: u16,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<Value>,
}

impl LookupFailure {
    pub fn new(status: u16, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            detail: None,
            body: None,
        }
    }

    /// The provider could not be reached (timeout, DNS, refused connection).
    pub fn transport(detail: impl Into<String>) -> Self {
        Self::new(BAD_GATEWAY, "Upstream request failed").with_detail(detail)
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// The error object shown to API callers: the provider's own body when
    /// there is one, otherwise `message` plus any `detail`.
    pub fn error_body(&self) -> Value {
        if let Some(body) = &self.body {
            return body.clone();
        }
        match &self.detail {
            Some(detail) => json!({"message": self.message, "detail": detail}),
            None => json!({"message": self.message}),
        }
    }
}

/// Outcome of a single lookup, used by both the single and the batch path.
pub type LookupOutcome = Result<Lookup, LookupFailure>;

/// A failed city inside a batch.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BulkError {
    pub city: String,
    pub failure: LookupFailure,
}

/// Merged outcomes of a batch lookup.
///
/// Both collections are in completion order, not request order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BulkResult {
    pub units: Units,
    pub requested: usize,
    pub results: Vec<Lookup>,
    pub errors: Vec<BulkError>,
}

impl BulkResult {
    pub fn new(units: Units, requested: usize) -> Self {
        Self {
            units,
            requested,
            results: Vec::with_capacity(requested),
            errors: Vec::new(),
        }
    }

    /// Files one city's outcome under results or errors.
    pub fn record(&mut self, city: String, outcome: LookupOutcome) {
        match outcome {
            Ok(lookup) => self.results.push(lookup),
            Err(failure) => self.errors.push(BulkError { city, failure }),
        }
    }

    /// Number of successful lookups.
    pub fn count(&self) -> usize {
        self.results.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jiff::Timestamp;

    fn record(city: &str) -> WeatherRecord {
        WeatherRecord {
            city: city.to_string(),
            units: Units::Metric,
            temperature: Some(12.5),
            humidity: Some(80),
            description: Some("overcast clouds".to_string()),
            wind_speed: Some(3.1),
            observed_at: Timestamp::UNIX_EPOCH,
        }
    }

    #[test]
    fn transport_failure_is_bad_gateway_with_detail() {
        let failure = LookupFailure::transport("connection refused");
        assert_eq!(failure.status, 502);
        assert_eq!(failure.message, "Upstream request failed");
        assert_eq!(failure.detail.as_deref(), Some("connection refused"));
    }

    #[test]
    fn bulk_result_partitions_outcomes() {
        let mut bulk = BulkResult::new(Units::Metric, 3);
        bulk.record(
            "Seattle".to_string(),
            Ok(Lookup {
                record: record("Seattle"),
                cached: false,
            }),
        );
        bulk.record(
            "Atlantis".to_string(),
            Err(LookupFailure::new(404, "city not found")),
        );
        bulk.record(
            "Tokyo".to_string(),
            Ok(Lookup {
                record: record("Tokyo"),
                cached: true,
            }),
        );

        assert_eq!(bulk.count(), 2);
        assert_eq!(bulk.requested, 3);
        assert_eq!(bulk.errors.len(), 1);
        assert_eq!(bulk.errors[0].city, "Atlantis");
        assert_eq!(bulk.errors[0].failure.status, 404);
    }

    #[test]
    fn error_body_prefers_provider_body() {
        let body = serde_json::json!({"cod": "404", "message": "city not found"});
        let failure = LookupFailure::new(404, "city not found").with_body(body.clone());
        assert_eq!(failure.error_body(), body);
    }

    #[test]
    fn error_body_falls_back_to_message_and_detail() {
        assert_eq!(
            LookupFailure::new(503, "maintenance window").error_body(),
            serde_json::json!({"message": "maintenance window"})
        );
        assert_eq!(
            LookupFailure::transport("connection refused").error_body(),
            serde_json::json!({"message": "Upstream request failed", "detail": "connection refused"})
        );
    }

    #[test]
    fn failure_without_detail_omits_it_when_serialized() {
        let json = serde_json::to_value(LookupFailure::new(401, "Invalid API key")).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"status": 401, "message": "Invalid API key"})
        );
    }
}
