mod health;
mod weather;

pub use health::{DocLink, HealthResponse, MessageResponse, MetaResponse};
pub use weather::{
    BulkErrorResponse, BulkQuery, BulkWeatherResponse, UnitsQuery, UpstreamErrorResponse,
    WeatherResponse,
};
