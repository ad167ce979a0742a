//! Catalog building and indexing logic.
//!
//! Builds a [`Catalog`] from adapted movies:
//! - keeps source order
//! - enforces unique ids (first occurrence wins)
//! - builds the id and genre lookup indices

use crate::types::*;
use std::collections::HashMap;
use tracing::{debug, warn};

impl Catalog {
    /// Build a catalog snapshot from movies in source order.
    ///
    /// A later movie with an id already present is dropped, so ids stay
    /// unique within the snapshot.
    pub fn from_movies(movies: impl IntoIterator<Item = Movie>) -> Self {
        let mut catalog = Catalog::new();
        let mut dropped = 0usize;

        for movie in movies {
            if catalog.by_id.contains_key(&movie.id) {
                warn!("Dropping duplicate movie id {} ({})", movie.id, movie.title);
                dropped += 1;
                continue;
            }
            catalog.by_id.insert(movie.id, catalog.movies.len());
            catalog.movies.push(movie);
        }

        catalog.build_genre_index();

        debug!(
            "Built catalog with {} movies ({} duplicates dropped)",
            catalog.movies.len(),
            dropped
        );
        catalog
    }

    /// Rebuild the genre index from `movies`
    fn build_genre_index(&mut self) {
        let mut genre_index: HashMap<_, Vec<usize>> = HashMap::new();
        for (pos, movie) in self.movies.iter().enumerate() {
            for &genre in &movie.genres {
                let positions = genre_index.entry(genre).or_default();
                // A movie listing the same genre twice is indexed once
                if positions.last() != Some(&pos) {
                    positions.push(pos);
                }
            }
        }
        self.genre_index = genre_index;
    }
}

impl FromIterator<Movie> for Catalog {
    fn from_iter<I: IntoIterator<Item = Movie>>(iter: I) -> Self {
        Catalog::from_movies(iter)
    }
}
