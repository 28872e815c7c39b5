//! OpenWeather "current weather" client.
//!
//! [`OpenWeatherClient`] issues one request per lookup and turns every
//! transport or provider failure into a [`nimbus_core::LookupFailure`];
//! [`normalize`] maps the provider's JSON onto [`nimbus_core::WeatherRecord`].

pub mod client;
pub mod error;
pub mod normalize;

pub use client::{OpenWeatherClient, OpenWeatherSettings, DEFAULT_BASE_URL, REQUEST_TIMEOUT};
pub use error::ClientError;
pub use normalize::normalize;
