// Error types for the covidmap application.
// Covers upstream API errors, cache/boundary IO, and request validation.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CovidError {
    #[error("upstream API error: {0}")]
    Api(#[from] reqwest::Error),

    #[error("resource not found: {0}")]
    NotFound(String),

    #[error("upstream rate limit exceeded")]
    RateLimited,

    #[error("metric column not found: {0}")]
    MissingMetric(String),

    #[error("invalid boundary document: {0}")]
    Boundary(String),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, CovidError>;
