//! Error types for the catalog crate.
//!
//! Only fixture loading can fail loudly. Adapting external records never
//! returns an error: unusable records are skipped and unknown genre codes
//! are dropped.

use thiserror::Error;

/// Errors that can occur while loading or validating a catalog.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// Fixture file could not be read
    #[error("Failed to read fixture file {path}: {source}")]
    FixtureIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Fixture content is not a JSON array of movie records
    #[error("Invalid fixture JSON in {origin}: {source}")]
    FixtureJson {
        origin: String,
        #[source]
        source: serde_json::Error,
    },

    /// A genre name that is not part of the fixed enumeration
    #[error("Unknown genre: {0}")]
    UnknownGenre(String),

    /// Data validation failed
    #[error("Validation failed: {0}")]
    ValidationError(String),
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, CatalogError>;
