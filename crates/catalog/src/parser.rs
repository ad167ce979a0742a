//! Parser for fixture catalogs.
//!
//! A fixture is a JSON array of movie records in the internal shape:
//!
//! ```json
//! [{"id": 6, "title": "Inception", "year": 2010,
//!   "genres": ["Action", "Science Fiction"], "rating": 8.8,
//!   "posterUrl": "...", "voteCount": 2300000, "popularity": 96, "runtime": 148}]
//! ```
//!
//! Each record goes through [`adapt_fixture`]; records without id or title
//! are skipped and unknown genre names dropped.

use crate::adapter::{FixtureRecord, adapt_fixture};
use crate::error::{CatalogError, Result};
use crate::types::*;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

/// The built-in mock catalog
const DEFAULT_FIXTURES: &str = include_str!("../fixtures/movies.json");

/// Parse fixture JSON text into movies, in file order.
///
/// `origin` names the source in error messages.
pub fn parse_fixtures(json: &str, origin: &str) -> Result<Vec<Movie>> {
    let records: Vec<FixtureRecord> =
        serde_json::from_str(json).map_err(|source| CatalogError::FixtureJson {
            origin: origin.to_string(),
            source,
        })?;

    let total = records.len();
    let movies: Vec<Movie> = records.into_iter().filter_map(adapt_fixture).collect();

    if movies.len() != total {
        debug!(
            "{}: skipped {} unusable fixture records",
            origin,
            total - movies.len()
        );
    }
    Ok(movies)
}

/// Load a fixture catalog from a JSON file
pub fn load_fixtures(path: &Path) -> Result<Catalog> {
    let json = fs::read_to_string(path).map_err(|source| CatalogError::FixtureIo {
        path: path.display().to_string(),
        source,
    })?;

    let movies = parse_fixtures(&json, &path.display().to_string())?;
    let catalog = Catalog::from_movies(movies);

    info!("Loaded {} fixture movies from {}", catalog.len(), path.display());
    Ok(catalog)
}

/// The built-in mock catalog (20 well-known titles)
pub fn default_fixtures() -> Result<Catalog> {
    let movies = parse_fixtures(DEFAULT_FIXTURES, "built-in fixtures")?;
    if movies.is_empty() {
        return Err(CatalogError::ValidationError(
            "built-in fixture catalog is empty".to_string(),
        ));
    }
    Ok(Catalog::from_movies(movies))
}
