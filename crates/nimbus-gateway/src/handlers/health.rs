use axum::extract::State;
use axum::Json;
use jiff::Timestamp;

use crate::error::AppError;
use crate::model::{DocLink, HealthResponse, MessageResponse, MetaResponse};
use crate::state::AppState;

pub const APP_NAME: &str = "Nimbus";
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub async fn root_handler() -> Json<MessageResponse> {
    Json(MessageResponse::message("Nimbus weather API is live"))
}

pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        uptime: format!("{:.2}s", state.uptime().as_secs_f64()),
        version: VERSION,
    })
}

pub async fn meta_handler(State(state): State<AppState>) -> Json<MetaResponse> {
    Json(MetaResponse {
        app: APP_NAME,
        version: VERSION,
        server_time: Timestamp::now(),
        has_weather_key: state.api_key().is_some(),
        cache_entries: state.weather().cached_entries(),
        docs: vec![
            DocLink { path: "/", desc: "home" },
            DocLink { path: "/health", desc: "health" },
            DocLink { path: "/meta", desc: "meta" },
            DocLink { path: "/weather/{city}", desc: "single city weather" },
            DocLink { path: "/weather?cities=", desc: "bulk weather" },
        ],
    })
}

pub async fn not_found_handler() -> AppError {
    AppError::RouteNotFound
}
