//! The filter seam of the query pipeline.

use catalog::Movie;

use crate::query::Query;

/// A predicate over movies, parameterized by the query.
///
/// Filters own the list they are given and hand back the survivors in
/// their original relative order. A filter with nothing to check for a
/// query (no text, no genres) returns its input untouched.
pub trait Filter: Send + Sync {
    /// Name used in logs
    fn name(&self) -> &str;

    fn apply(&self, movies: Vec<Movie>, query: &Query) -> Vec<Movie>;
}
