mod cli;

use crate::cli::CLI;
use clap::Parser;
use nimbus_cache::{TtlCache, TtlCacheSettings};
use nimbus_core::ApiKey;
use nimbus_gateway::{App, AppState};
use nimbus_ledger::CsvLookupLog;
use nimbus_openweather::{OpenWeatherClient, OpenWeatherSettings};
use nimbus_service::{ServiceSettings, WeatherService};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = CLI::parse();
    let _telemetry = nimbus_telemetry::init(config.telemetry_settings())?;

    let client = OpenWeatherClient::new(
        OpenWeatherSettings::builder()
            .base_url(config.openweather_base_url.clone())
            .build(),
    )?;
    let cache = TtlCache::new(
        TtlCacheSettings::builder()
            .ttl(Duration::from_secs(config.cache_ttl_secs))
            .build(),
    );
    let log = CsvLookupLog::new(&config.lookup_log_path);
    let service = WeatherService::with_settings(
        client,
        cache,
        log,
        ServiceSettings::builder()
            .max_concurrency(config.max_concurrency)
            .build(),
    );

    let api_key = config.openweather_api_key.clone().map(ApiKey::new);
    let state = AppState::new(Arc::new(service), api_key);
    if state.api_key().is_none() {
        warn!("no OpenWeather api key configured, weather routes will answer 500");
    }

    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
    info!(
        listen_addr = %listener.local_addr()?,
        base_url = %config.openweather_base_url,
        cache_ttl_secs = config.cache_ttl_secs,
        lookup_log = %config.lookup_log_path.display(),
        max_concurrency = config.max_concurrency,
        "starting gateway server"
    );

    axum::serve(listener, App::router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("gateway server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}
