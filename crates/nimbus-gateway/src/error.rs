use axum::extract::rejection::{PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use nimbus_core::{CoreError, LookupFailure};
use thiserror::Error;
use tracing::debug;

use crate::model::{MessageResponse, UpstreamErrorResponse};

pub type Result<T> = std::result::Result<T, AppError>;

pub const BULK_EXAMPLE: &str = "/weather?cities=Seattle,New%20York,Paris";

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Use bulk endpoint for multiple cities")]
    MultipleCities,
    #[error("Server missing OPENWEATHER_API_KEY")]
    MissingApiKey,
    #[error("Invalid units. Use metric, imperial, or standard")]
    InvalidUnits,
    #[error("City must not be empty")]
    EmptyCity,
    #[error("Missing 'cities' query param (comma-separated)")]
    MissingCities,
    /// The request could not be parsed; carries the extractor's reason.
    #[error("Bad request")]
    BadRequest(String),
    #[error("Route not found")]
    RouteNotFound,
    #[error(transparent)]
    Upstream(#[from] LookupFailure),
}

impl From<CoreError> for AppError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::InvalidUnits(_) => AppError::InvalidUnits,
            CoreError::EmptyCityList => AppError::MissingCities,
        }
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::MultipleCities
            | AppError::InvalidUnits
            | AppError::EmptyCity
            | AppError::MissingCities
            | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::MissingApiKey => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::RouteNotFound => StatusCode::NOT_FOUND,
            AppError::Upstream(failure) => {
                StatusCode::from_u16(failure.status).unwrap_or(StatusCode::BAD_GATEWAY)
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.to_string();
        debug!(status = status.as_u16(), error = %message, "request failed");

        match self {
            AppError::Upstream(failure) => {
                (status, Json(UpstreamErrorResponse::from(failure))).into_response()
            }
            AppError::BadRequest(detail) => (
                status,
                Json(MessageResponse::error(message).with_detail(detail)),
            )
                .into_response(),
            AppError::MultipleCities => (
                status,
                Json(MessageResponse::error(message).with_example(BULK_EXAMPLE)),
            )
                .into_response(),
            AppError::RouteNotFound => (
                status,
                Json(MessageResponse::error(message).with_hint("Check your endpoint name")),
            )
                .into_response(),
            _ => (status, Json(MessageResponse::error(message))).into_response(),
        }
    }
}
