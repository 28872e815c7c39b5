use thiserror::Error;

#[derive(Debug, Error)]
pub enum TelemetryError {
    #[error("global tracing subscriber already installed: {0}")]
    Subscriber(#[from] tracing::subscriber::SetGlobalDefaultError),
    #[error("log bridge already installed: {0}")]
    LogBridge(#[from] tracing_log::log::SetLoggerError),
    #[error("failed to build otlp exporter: {0}")]
    Exporter(String),
}
