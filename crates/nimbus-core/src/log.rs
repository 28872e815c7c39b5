use crate::error::LogError;
use crate::record::WeatherRecord;
use async_trait::async_trait;
use std::sync::Arc;

/// Durable, append-only record of successful upstream lookups.
#[async_trait]
pub trait LookupLog: Send + Sync + 'static {
    /// Appends one record.
    ///
    /// Concurrent appends must not interleave. Callers treat an error as a
    /// diagnostic only; it never fails the lookup that produced the record.
    async fn append(&self, record: &WeatherRecord) -> Result<(), LogError>;
}

#[async_trait]
impl<T: LookupLog> LookupLog for Arc<T> {
    async fn append(&self, record: &WeatherRecord) -> Result<(), LogError> {
        (**self).append(record).await
    }
}
