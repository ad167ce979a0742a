//! Filter to keep only movies in the selected genres.
//!
//! Selection has OR semantics: one shared genre is enough.

use crate::query::Query;
use crate::traits::Filter;
use catalog::Movie;
use rayon::prelude::*;

/// Keeps movies whose genre list intersects `query.genres`.
///
/// ## Algorithm
/// 1. Empty selection: keep everything
/// 2. For each movie, check if any of its genres is selected
pub struct GenreFilter;

impl Filter for GenreFilter {
    fn name(&self) -> &str {
        "GenreFilter"
    }

    fn apply(&self, movies: Vec<Movie>, query: &Query) -> Vec<Movie> {
        if !query.has_genres() {
            return movies;
        }

        movies
            .into_par_iter()
            .filter(|movie| {
                movie
                    .genres
                    .iter()
                    .any(|genre| query.genres.contains(genre))
            })
            .collect()
    }
}
