use std::sync::Arc;
use std::time::{Duration, Instant};

use nimbus_core::{ApiKey, WeatherLookup};

#[derive(Clone)]
pub struct AppState {
    weather: Arc<dyn WeatherLookup>,
    api_key: Option<ApiKey>,
    started_at: Instant,
}

impl AppState {
    /// A blank key is treated as no key, so the weather routes answer 500.
    pub fn new(weather: Arc<dyn WeatherLookup>, api_key: Option<ApiKey>) -> Self {
        Self {
            weather,
            api_key: usable_key(api_key),
            started_at: Instant::now(),
        }
    }

    pub fn weather(&self) -> &dyn WeatherLookup {
        self.weather.as_ref()
    }

    pub fn api_key(&self) -> Option<&ApiKey> {
        self.api_key.as_ref()
    }

    pub fn uptime(&self) -> Duration {
        self.started_at.elapsed()
    }
}

fn usable_key(api_key: Option<ApiKey>) -> Option<ApiKey> {
    api_key.filter(|key| !key.expose().trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_or_missing_key_is_unusable() {
        assert_eq!(usable_key(None), None);
        assert_eq!(usable_key(Some(ApiKey::new(""))), None);
        assert_eq!(usable_key(Some(ApiKey::new(" \t"))), None);
        assert_eq!(
            usable_key(Some(ApiKey::new("abc"))),
            Some(ApiKey::new("abc"))
        );
    }
}
