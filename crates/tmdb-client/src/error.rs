//! Error types for the TMDB client.

use thiserror::Error;

/// Errors raised by the fallible `try_*` layer of [`TmdbClient`](crate::TmdbClient).
///
/// The public fetch methods never return these; they log them and degrade to
/// an empty result.
#[derive(Error, Debug)]
pub enum TmdbError {
    /// A required setting is absent
    #[error("TMDB is not configured: {0} is not set")]
    MissingConfig(&'static str),

    /// A setting is present but cannot be parsed
    #[error("Invalid value for {key}: {value:?}")]
    InvalidConfig { key: &'static str, value: String },

    #[error("Failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    /// Transport failure (DNS, connect, timeout, body read)
    #[error("Request to {endpoint} failed: {source}")]
    Network {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    /// Non-success HTTP status
    #[error("{endpoint} returned {status}")]
    Status {
        endpoint: String,
        status: reqwest::StatusCode,
    },

    /// Body is not the expected JSON shape
    #[error("Failed to decode response from {endpoint}: {source}")]
    Decode {
        endpoint: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, TmdbError>;
