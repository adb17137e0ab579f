//! Error types for the Sleeper client

use thiserror::Error;

/// Failures that are not a plain "not found".
///
/// A non-success HTTP status is reported through `None`/empty results
/// instead, so callers only see this type for transport or decode problems.
#[derive(Error, Debug)]
pub enum SleeperError {
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Failed to decode {endpoint}: {source}")]
    Decode {
        endpoint: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Sleeper API error: {message}")]
    SleeperApiError { message: String },

    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },
}
