use axum::extract::rejection::{PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::Json;
use nimbus_core::{ApiKey, Units};
use tracing::{field, instrument, Span};

use crate::error::{AppError, Result};
use crate::model::{BulkQuery, BulkWeatherResponse, UnitsQuery, WeatherResponse};
use crate::state::AppState;

/// Extractor failures are taken as values so they get a JSON 400 body.
#[instrument(skip_all, fields(city = field::Empty))]
pub async fn single_weather_handler(
    path: std::result::Result<Path<String>, PathRejection>,
    query: std::result::Result<Query<UnitsQuery>, QueryRejection>,
    State(state): State<AppState>,
) -> Result<Json<WeatherResponse>> {
    let Path(city) = path?;
    let Query(query) = query?;
    Span::current().record("city", city.as_str());

    if city.contains(',') {
        return Err(AppError::MultipleCities);
    }
    let api_key = require_key(&state)?;
    let units = parse_units(query.units.as_deref())?;

    let city = city.trim();
    if city.is_empty() {
        return Err(AppError::EmptyCity);
    }

    let lookup = state.weather().lookup(city, units, api_key).await?;
    Ok(Json(lookup.into()))
}

#[instrument(skip_all)]
pub async fn bulk_weather_handler(
    query: std::result::Result<Query<BulkQuery>, QueryRejection>,
    State(state): State<AppState>,
) -> Result<Json<BulkWeatherResponse>> {
    let Query(query) = query?;
    let api_key = require_key(&state)?;
    let units = parse_units(query.units.as_deref())?;

    let cities = query.city_list();
    if cities.is_empty() {
        return Err(AppError::MissingCities);
    }

    let result = state.weather().fetch_all(&cities, units, api_key).await?;
    Ok(Json(result.into()))
}

fn require_key(state: &AppState) -> Result<&ApiKey> {
    state.api_key().ok_or(AppError::MissingApiKey)
}

/// Absent units fall back to imperial.
fn parse_units(raw: Option<&str>) -> Result<Units> {
    match raw {
        None => Ok(Units::default()),
        Some(raw) => Ok(raw.parse::<Units>()?),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn units_default_to_imperial() {
        assert_eq!(parse_units(None).unwrap(), Units::Imperial);
    }

    #[test]
    fn units_are_case_sensitive() {
        assert_eq!(parse_units(Some("metric")).unwrap(), Units::Metric);
        assert!(matches!(
            parse_units(Some("Metric")),
            Err(AppError::InvalidUnits)
        ));
        assert!(matches!(parse_units(Some("")), Err(AppError::InvalidUnits)));
    }
}
