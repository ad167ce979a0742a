//! Query evaluation over an in-memory catalog.
//!
//! `evaluate(catalog, query)`:
//! 1. Copy the catalog in source order
//! 2. Run the filter pipeline (text, then genres)
//! 3. Stable-sort by the query's key, if any

use std::time::Instant;

use catalog::{Catalog, Movie};
use tracing::debug;

use crate::filter_pipeline::FilterPipeline;
use crate::query::Query;
use crate::sort::sort_movies;

/// Evaluates queries with a configurable filter pipeline.
pub struct QueryEngine {
    pipeline: FilterPipeline,
}

impl QueryEngine {
    /// Engine with the standard text + genre pipeline
    pub fn new() -> Self {
        Self {
            pipeline: FilterPipeline::standard(),
        }
    }

    /// Ordered result set for `query` over `catalog`. The catalog is not modified.
    pub fn evaluate(&self, catalog: &Catalog, query: &Query) -> Vec<Movie> {
        self.evaluate_movies(catalog.movies().to_vec(), query)
    }

    /// Same as [`evaluate`](Self::evaluate) over an owned movie list.
    pub fn evaluate_movies(&self, movies: Vec<Movie>, query: &Query) -> Vec<Movie> {
        let start = Instant::now();
        let input = movies.len();

        let mut results = self.pipeline.apply(movies, query);
        if let Some(key) = query.sort {
            sort_movies(&mut results, key);
        }

        debug!(
            text = %query.text,
            genres = query.genres.len(),
            sort = ?query.sort,
            "Evaluated query: {} of {} movies in {:.2?}",
            results.len(),
            input,
            start.elapsed()
        );
        results
    }
}

impl Default for QueryEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Evaluate `query` over `catalog` with the standard pipeline.
pub fn evaluate(catalog: &Catalog, query: &Query) -> Vec<Movie> {
    QueryEngine::new().evaluate(catalog, query)
}
