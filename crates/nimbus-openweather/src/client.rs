use crate::error::ClientError;
use crate::normalize::normalize;
use async_trait::async_trait;
use nimbus_core::lookup::BAD_GATEWAY;
use nimbus_core::{
    ApiKey, Clock, LookupFailure, SystemClock, Units, WeatherClient, WeatherRecord,
};
use reqwest::StatusCode;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, instrument, warn};
use typed_builder::TypedBuilder;

pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org";
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

const CURRENT_WEATHER_PATH: &str = "/data/2.5/weather";

/// Configures an [`OpenWeatherClient`].
#[derive(Debug, Clone, TypedBuilder)]
pub struct OpenWeatherSettings {
    /// Scheme and host of the provider, without a trailing path.
    #[builder(default = DEFAULT_BASE_URL.to_string(), setter(into))]
    pub base_url: String,
    /// Upper bound on a single request, connect through body.
    #[builder(default = REQUEST_TIMEOUT)]
    pub timeout: Duration,
}

impl Default for OpenWeatherSettings {
    fn default() -> Self {
        Self::builder().build()
    }
}

/// Client for the OpenWeather current-weather endpoint.
///
/// One call is one HTTP request: there is no retry and no circuit breaking.
#[derive(Debug, Clone)]
pub struct OpenWeatherClient<C = SystemClock> {
    http: reqwest::Client,
    endpoint: String,
    clock: C,
}

impl OpenWeatherClient<SystemClock> {
    pub fn new(settings: OpenWeatherSettings) -> Result<Self, ClientError> {
        Self::with_clock(settings, SystemClock)
    }
}

impl<C: Clock> OpenWeatherClient<C> {
    /// Creates a client whose records are stamped by `clock`.
    pub fn with_clock(settings: OpenWeatherSettings, clock: C) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .timeout(settings.timeout)
            .user_agent(concat!("nimbus/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            endpoint: format!(
                "{}{}",
                settings.base_url.trim_end_matches('/'),
                CURRENT_WEATHER_PATH
            ),
            clock,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl<C: Clock> WeatherClient for OpenWeatherClient<C> {
    #[instrument(skip(self, api_key))]
    async fn fetch(
        &self,
        city: &str,
        units: Units,
        api_key: &ApiKey,
    ) -> Result<WeatherRecord, LookupFailure> {
        let response = self
            .http
            .get(&self.endpoint)
            .query(&[
                ("q", city),
                ("appid", api_key.expose()),
                ("units", units.as_str()),
            ])
            .send()
            .await
            // The request url carries the api key.
            .map_err(|err| transport_failure(err.without_url()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|err| transport_failure(err.without_url()))?;

        if status != StatusCode::OK {
            let failure = provider_failure(status, &body);
            debug!(status = failure.status, message = %failure.message, "weather provider rejected lookup");
            return Err(failure);
        }

        let payload: Value = serde_json::from_str(&body).map_err(|err| {
            warn!(error = %err, "weather provider returned a non-json body");
            LookupFailure::new(BAD_GATEWAY, "Upstream response was not valid JSON")
                .with_detail(err.to_string())
        })?;

        Ok(normalize(&payload, city, units, self.clock.now()))
    }
}

fn transport_failure(err: reqwest::Error) -> LookupFailure {
    warn!(error = %err, "weather provider request failed");
    LookupFailure::transport(err.to_string())
}

/// Builds the failure for a non-200 answer, keeping the provider's status.
///
/// A JSON body is kept whole. The message is the provider's JSON `message`
/// field when present, then the raw body, then the canonical reason phrase.
fn provider_failure(status: StatusCode, body: &str) -> LookupFailure {
    let parsed = serde_json::from_str::<Value>(body).ok();
    let message = match &parsed {
        Some(json) => match json.get("message").and_then(Value::as_str) {
            Some(message) => message.to_string(),
            None => json.to_string(),
        },
        None => body.trim().to_string(),
    };

    let message = if message.is_empty() {
        status
            .canonical_reason()
            .unwrap_or("Upstream returned an error")
            .to_string()
    } else {
        message
    };

    let failure = LookupFailure::new(status.as_u16(), message);
    match parsed {
        Some(json) => failure.with_body(json),
        None => failure,
    }
}
