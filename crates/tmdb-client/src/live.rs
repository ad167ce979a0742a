//! Live-mode query evaluation.
//!
//! Text queries go to the search endpoint and the genre selection and sort
//! key are applied to the returned page locally. Queries without text go to
//! discover, which filters and sorts server-side.

use catalog::Movie;
use query_engine::filters::GenreFilter;
use query_engine::{FilterPipeline, Query, sort_movies};
use tracing::{debug, instrument};

use crate::client::{DiscoverOptions, TmdbClient, degrade};
use crate::error::Result;

impl TmdbClient {
    #[instrument(skip(self, query), fields(text = %query.text, genres = query.genres.len()))]
    pub async fn try_search_and_filter(&self, query: &Query) -> Result<Vec<Movie>> {
        if query.text.trim().is_empty() {
            let options = DiscoverOptions {
                genres: query.genres.iter().copied().collect(),
                sort: query.sort,
                page: 1,
            };
            return self.try_discover(&options).await;
        }

        let found = self.try_search(&query.text, 1).await?;
        let total = found.len();

        let mut movies = FilterPipeline::new()
            .add_filter(GenreFilter)
            .apply(found, query);
        if let Some(key) = query.sort {
            sort_movies(&mut movies, key);
        }

        debug!("Search kept {} of {} results", movies.len(), total);
        Ok(movies)
    }

    /// Evaluate `query` against the remote catalog. Failures yield an empty list.
    pub async fn search_and_filter(&self, query: &Query) -> Vec<Movie> {
        degrade("search and filter", self.try_search_and_filter(query).await)
    }
}
