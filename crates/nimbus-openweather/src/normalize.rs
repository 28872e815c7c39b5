use jiff::Timestamp;
use nimbus_core::{Units, WeatherRecord};
use serde_json::Value;

/// Maps an OpenWeather "current weather" payload onto a [`WeatherRecord`].
///
/// Never fails: any field that is missing or has an unexpected type becomes
/// `None`, and the requested city stands in for a missing `name`.
pub fn normalize(payload: &Value, city: &str, units: Units, observed_at: Timestamp) -> WeatherRecord {
    let city = payload
        .get("name")
        .and_then(Value::as_str)
        .filter(|name| !name.is_empty())
        .unwrap_or(city)
        .to_string();

    WeatherRecord {
        city,
        units,
        temperature: payload.pointer("/main/temp").and_then(Value::as_f64),
        humidity: payload.pointer("/main/humidity").and_then(as_integer),
        description: payload
            .pointer("/weather/0/description")
            .and_then(Value::as_str)
            .map(str::to_string),
        wind_speed: payload.pointer("/wind/speed").and_then(Value::as_f64),
        observed_at,
    }
}

fn as_integer(value: &Value) -> Option<i64> {
    value
        .as_i64()
        .or_else(|| value.as_f64().map(|v| v.round() as i64))
}
