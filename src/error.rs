use polars::prelude::PolarsError;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Missing or invalid settings, including empty credentials
    #[error("{0}")]
    Config(String),

    /// The provider answered, but not with what we asked for
    #[error("{0}")]
    Protocol(String),

    /// The itinerary payload does not have the expected shape
    #[error("{0}")]
    Validation(String),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Failed to parse response: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV serialization failed: {0}")]
    Csv(#[from] PolarsError),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
