use axum::routing::get;
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::handlers::{
    bulk_weather_handler, health_handler, meta_handler, not_found_handler, root_handler,
    single_weather_handler,
};
use crate::state::AppState;

pub struct App {}

impl App {
    pub fn router(state: AppState) -> Router {
        Router::new()
            .route("/", get(root_handler))
            .route("/health", get(health_handler))
            .route("/meta", get(meta_handler))
            .route("/weather", get(bulk_weather_handler))
            .route("/weather/{city}", get(single_weather_handler))
            .fallback(not_found_handler)
            .layer(TraceLayer::new_for_http())
            .with_state(state)
    }
}
