//! Free-text filter.
//!
//! A movie matches when its title, or the name of any of its genres,
//! contains the query text, ignoring case.

use crate::query::Query;
use crate::traits::Filter;
use catalog::Movie;
use rayon::prelude::*;

/// Keeps movies whose title or a genre name contains `query.text`.
///
/// ## Algorithm
/// 1. Empty text: keep everything
/// 2. Lowercase the text once
/// 3. Keep a movie if its lowercased title or any lowercased genre name
///    contains it
pub struct TextMatchFilter;

impl Filter for TextMatchFilter {
    fn name(&self) -> &str {
        "TextMatchFilter"
    }

    fn apply(&self, movies: Vec<Movie>, query: &Query) -> Vec<Movie> {
        if !query.has_text() {
            return movies;
        }
        let needle = query.text.to_lowercase();

        // indexed parallel collect keeps source order
        movies
            .into_par_iter()
            .filter(|movie| matches_text(movie, &needle))
            .collect()
    }
}

/// `needle` must already be lowercase.
pub fn matches_text(movie: &Movie, needle: &str) -> bool {
    movie.title.to_lowercase().contains(needle)
        || movie
            .genres
            .iter()
            .any(|genre| genre.name().to_lowercase().contains(needle))
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog::Genre;

    fn movies() -> Vec<Movie> {
        vec![
            Movie::new(1, "Inception").with_genres([Genre::Action, Genre::ScienceFiction]),
            Movie::new(2, "The Matrix").with_genres([Genre::Action]),
            Movie::new(3, "Coco").with_genres([Genre::Animation, Genre::Family]),
        ]
    }

    #[test]
    fn test_title_substring_case_insensitive() {
        let query = Query::new().with_text("INCEP");
        let filtered = TextMatchFilter.apply(movies(), &query);

        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].id, 1);
    }

    #[test]
    fn test_matches_genre_names() {
        let query = Query::new().with_text("fiction");
        let filtered = TextMatchFilter.apply(movies(), &query);
        assert_eq!(filtered.iter().map(|m| m.id).collect::<Vec<_>>(), vec![1]);

        let query = Query::new().with_text("action");
        let filtered = TextMatchFilter.apply(movies(), &query);
        assert_eq!(filtered.iter().map(|m| m.id).collect::<Vec<_>>(), vec![1, 2]);
    }

    #[test]
    fn test_empty_text_keeps_everything() {
        let filtered = TextMatchFilter.apply(movies(), &Query::new());
        assert_eq!(filtered, movies());
    }

    #[test]
    fn test_no_match() {
        let query = Query::new().with_text("zzz");
        assert!(TextMatchFilter.apply(movies(), &query).is_empty());
    }
}
