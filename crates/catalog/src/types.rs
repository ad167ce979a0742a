//! Core domain types for the movie catalog.
//!
//! A [`Movie`] is an immutable value produced by the adapter. Nothing in the
//! workspace mutates a movie after it is built; filtering, sorting and
//! re-rating all produce new collections.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::genre::Genre;

// =============================================================================
// Type Aliases
// =============================================================================

/// Unique identifier for a movie within a catalog snapshot (TMDB id in live mode)
pub type MovieId = u64;

// =============================================================================
// Movie
// =============================================================================

/// A normalized movie record.
///
/// Optional fields stay `None` when the source does not provide them. They
/// are never filled with placeholder values such as a zero year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Movie {
    pub id: MovieId,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<u16>,
    /// Genres in source order, always members of [`Genre`]
    #[serde(default)]
    pub genres: Vec<Genre>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub poster_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backdrop_url: Option<String>,
    /// Average rating on a 0-10 scale
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overview: Option<String>,
    /// Release date exactly as the source sent it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release_date: Option<String>,
    /// Runtime in minutes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub runtime: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vote_count: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub popularity: Option<f64>,
}

impl Movie {
    /// Minimal movie with only the required fields set.
    pub fn new(id: MovieId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            year: None,
            genres: Vec::new(),
            poster_url: None,
            backdrop_url: None,
            rating: None,
            overview: None,
            release_date: None,
            runtime: None,
            vote_count: None,
            popularity: None,
        }
    }

    pub fn with_genres(mut self, genres: impl IntoIterator<Item = Genre>) -> Self {
        self.genres = genres.into_iter().collect();
        self
    }

    pub fn with_year(mut self, year: u16) -> Self {
        self.year = Some(year);
        self
    }

    pub fn with_rating(mut self, rating: f32) -> Self {
        self.rating = Some(rating);
        self
    }

    pub fn with_popularity(mut self, popularity: f64) -> Self {
        self.popularity = Some(popularity);
        self
    }

    /// Comma-separated genre names, for display.
    pub fn genre_names(&self) -> String {
        self.genres
            .iter()
            .map(|g| g.name())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

// =============================================================================
// Catalog - the in-memory snapshot
// =============================================================================

/// An ordered snapshot of normalized movies.
///
/// Source order is preserved in `movies`; `by_id` and `genre_index` are
/// lookup indices into it. Ids are unique within a snapshot.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    pub(crate) movies: Vec<Movie>,
    /// Position of each movie in `movies`
    pub(crate) by_id: HashMap<MovieId, usize>,
    /// Positions of the movies carrying each genre, in source order
    pub(crate) genre_index: HashMap<Genre, Vec<usize>>,
}

impl Catalog {
    /// Creates a new, empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// All movies in source order
    pub fn movies(&self) -> &[Movie] {
        &self.movies
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Movie> {
        self.movies.iter()
    }

    pub fn len(&self) -> usize {
        self.movies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }

    /// Get a movie by ID
    pub fn get_movie(&self, id: MovieId) -> Option<&Movie> {
        self.by_id.get(&id).map(|&pos| &self.movies[pos])
    }

    /// Get all movies in a specific genre, in source order
    pub fn movies_by_genre(&self, genre: Genre) -> Vec<&Movie> {
        self.genre_index
            .get(&genre)
            .map(|positions| positions.iter().map(|&pos| &self.movies[pos]).collect())
            .unwrap_or_default()
    }

    /// Movies whose ids appear in `ids`, in catalog order.
    pub fn movies_by_ids<'i>(&self, ids: impl IntoIterator<Item = &'i MovieId>) -> Vec<&Movie> {
        let mut positions: Vec<usize> = ids
            .into_iter()
            .filter_map(|id| self.by_id.get(id).copied())
            .collect();
        positions.sort_unstable();
        positions.dedup();
        positions.into_iter().map(|pos| &self.movies[pos]).collect()
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a Movie;
    type IntoIter = std::slice::Iter<'a, Movie>;

    fn into_iter(self) -> Self::IntoIter {
        self.movies.iter()
    }
}
