use thiserror::Error;

/// Errors raised when a caller hands the core something it cannot work with.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    #[error("invalid units '{0}'; use metric, imperial, or standard")]
    InvalidUnits(String),
    #[error("city list is empty")]
    EmptyCityList,
}

/// Errors raised while appending to the lookup log.
#[derive(Debug, Error)]
pub enum LogError {
    #[error("lookup log i/o failed: {0}")]
    Io(#[from] std::io::Error),
}
