use crate::lookup::LookupFailure;
use crate::record::WeatherRecord;
use crate::units::Units;
use async_trait::async_trait;
use std::fmt::{Debug, Formatter};
use std::sync::Arc;

/// Credential for the upstream weather provider.
///
/// The value never shows up in `Debug` output so it cannot leak into logs.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl Debug for ApiKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str("ApiKey(<redacted>)")
    }
}

/// Fetches current weather for a city from an upstream provider.
#[async_trait]
pub trait WeatherClient: Send + Sync + 'static {
    /// Performs exactly one upstream request.
    ///
    /// Every failure, transport or provider, comes back as a
    /// [`LookupFailure`]; implementations never panic on upstream errors.
    async fn fetch(
        &self,
        city: &str,
        units: Units,
        api_key: &ApiKey,
    ) -> Result<WeatherRecord, LookupFailure>;
}

#[async_trait]
impl<T: WeatherClient> WeatherClient for Arc<T> {
    async fn fetch(
        &self,
        city: &str,
        units: Units,
        api_key: &ApiKey,
    ) -> Result<WeatherRecord, LookupFailure> {
        (**self).fetch(city, units, api_key).await
    }
}
