//! # Catalog Crate
//!
//! Normalized movie records and the adapter that produces them.
//!
//! ## Main Components
//!
//! - **types**: `Movie`, `MovieId` and the `Catalog` snapshot
//! - **genre**: the fixed `Genre` enumeration and its TMDB code table
//! - **adapter**: raw TMDB / fixture records into `Movie`
//! - **parser**: fixture JSON loading
//! - **index**: catalog building (id and genre indices)
//! - **error**: error types for fixture loading
//!
//! ## Example Usage
//!
//! ```ignore
//! use catalog::{Adapter, ImageConfig, RawMovie, default_fixtures};
//!
//! // Mock mode: the built-in fixture catalog
//! let catalog = default_fixtures()?;
//! let inception = catalog.get_movie(6).unwrap();
//!
//! // Live mode: adapt a record decoded from TMDB
//! let adapter = Adapter::new(ImageConfig::new("https://image.tmdb.org/t/p"));
//! let movie = adapter.adapt(raw_movie);
//! ```

// Public modules
pub mod adapter;
pub mod error;
pub mod genre;
pub mod index;
pub mod parser;
pub mod types;

// Re-export commonly used types for convenience
pub use adapter::{
    Adapter, FixtureRecord, ImageConfig, ImageSize, RawGenre, RawMovie, RawMovieDetails, RawPage,
    adapt_fixture, genres_from_codes, parse_release_year,
};
pub use error::{CatalogError, Result};
pub use genre::Genre;
pub use parser::{default_fixtures, load_fixtures, parse_fixtures};
pub use types::{Catalog, Movie, MovieId};
