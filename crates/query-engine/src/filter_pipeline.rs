//! Ordered chain of movie filters.

use crate::query::Query;
use crate::traits::Filter;
use catalog::Movie;
use tracing::debug;

/// Chains multiple filters together into a processing pipeline.
///
/// Each filter sees the survivors of the previous one, so the result is the
/// AND of all filters.
///
/// ## Usage
/// ```ignore
/// let pipeline = FilterPipeline::new()
///     .add_filter(TextMatchFilter)
///     .add_filter(GenreFilter);
///
/// let filtered = pipeline.apply(movies, &query);
/// ```
pub struct FilterPipeline {
    filters: Vec<Box<dyn Filter>>,
}

impl FilterPipeline {
    /// Pipeline with no filters; passes everything through.
    pub fn new() -> Self {
        Self {
            filters: Vec::new(),
        }
    }

    /// Text filter then genre filter, the pipeline every query goes through.
    pub fn standard() -> Self {
        Self::new()
            .add_filter(crate::filters::TextMatchFilter)
            .add_filter(crate::filters::GenreFilter)
    }

    /// Add a filter to the pipeline (builder pattern).
    pub fn add_filter(mut self, filter: impl Filter + 'static) -> Self {
        self.filters.push(Box::new(filter));
        self
    }

    /// Names of the filters, in application order
    pub fn filter_names(&self) -> Vec<&str> {
        self.filters.iter().map(|f| f.name()).collect()
    }

    /// Run every filter in order, each over the previous one's survivors.
    pub fn apply(&self, movies: Vec<Movie>, query: &Query) -> Vec<Movie> {
        let mut current = movies;
        for filter in &self.filters {
            let before = current.len();
            current = filter.apply(current, query);
            debug!("{}: {} -> {} movies", filter.name(), before, current.len());
        }
        current
    }
}

impl Default for FilterPipeline {
    fn default() -> Self {
        Self::standard()
    }
}
