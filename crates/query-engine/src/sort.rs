//! Stable descending sorts.
//!
//! `slice::sort_by` is stable, so movies that compare equal keep their
//! prior relative order and re-sorting sorted data is a no-op. Movies
//! without a value for the key go after every movie that has one.

use crate::query::SortKey;
use catalog::Movie;
use std::cmp::Ordering;

/// The value a movie is ranked by for `key`, if it has one.
pub fn sort_value(movie: &Movie, key: SortKey) -> Option<f64> {
    match key {
        SortKey::Rating => movie.rating.map(f64::from),
        SortKey::Popularity => movie.popularity,
        SortKey::Year => movie.year.map(f64::from),
    }
}

/// Descending comparison by `key`; missing values last, NaN treated as equal.
pub fn compare_desc(a: &Movie, b: &Movie, key: SortKey) -> Ordering {
    match (sort_value(a, key), sort_value(b, key)) {
        (Some(x), Some(y)) => y.partial_cmp(&x).unwrap_or(Ordering::Equal),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Stable in-place sort, descending by `key`.
pub fn sort_movies(movies: &mut [Movie], key: SortKey) {
    movies.sort_by(|a, b| compare_desc(a, b, key));
}

/// The first `limit` movies by `key`, without touching the input.
pub fn top_by(movies: &[Movie], key: SortKey, limit: usize) -> Vec<Movie> {
    let mut sorted = movies.to_vec();
    sort_movies(&mut sorted, key);
    sorted.truncate(limit);
    sorted
}
