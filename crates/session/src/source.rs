//! Where movies come from: the bundled catalog or the TMDB API.
//!
//! Both sources answer the same questions so the driver never needs to know
//! which mode it runs in.

use std::sync::Arc;

use anyhow::{Context, Result};
use async_trait::async_trait;
use catalog::{Catalog, Movie, MovieId};
use query_engine::filters::GenreFilter;
use query_engine::{FilterPipeline, Query, QueryEngine, SortKey, sort_movies, top_by};
use tmdb_client::{TimeWindow, TmdbClient};
use tracing::debug;

#[async_trait]
pub trait CatalogSource: Send + Sync {
    fn name(&self) -> &str;

    /// Top-rated slice for the home feed
    async fn recommended(&self, limit: usize) -> Result<Vec<Movie>>;

    /// Most popular slice for the home feed
    async fn trending(&self, limit: usize) -> Result<Vec<Movie>>;

    async fn search(&self, query: &Query) -> Result<Vec<Movie>>;

    async fn details(&self, id: MovieId) -> Result<Option<Movie>>;

    async fn similar(&self, id: MovieId) -> Result<Vec<Movie>>;

    /// Movies for `ids`, skipping any that cannot be found
    async fn resolve(&self, ids: &[MovieId]) -> Result<Vec<Movie>>;
}

/// Serves everything from an in-memory catalog.
#[derive(Clone)]
pub struct MockSource {
    catalog: Arc<Catalog>,
    engine: Arc<QueryEngine>,
}

impl MockSource {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self {
            catalog,
            engine: Arc::new(QueryEngine::new()),
        }
    }

    /// Source over the bundled fixtures
    pub fn with_default_fixtures() -> Result<Self> {
        let catalog = catalog::default_fixtures().context("Loading bundled fixtures")?;
        Ok(Self::new(Arc::new(catalog)))
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }
}

#[async_trait]
impl CatalogSource for MockSource {
    fn name(&self) -> &str {
        "mock"
    }

    async fn recommended(&self, limit: usize) -> Result<Vec<Movie>> {
        Ok(top_by(self.catalog.movies(), SortKey::Rating, limit))
    }

    async fn trending(&self, limit: usize) -> Result<Vec<Movie>> {
        Ok(top_by(self.catalog.movies(), SortKey::Popularity, limit))
    }

    async fn search(&self, query: &Query) -> Result<Vec<Movie>> {
        Ok(self.engine.evaluate(&self.catalog, query))
    }

    async fn details(&self, id: MovieId) -> Result<Option<Movie>> {
        Ok(self.catalog.get_movie(id).cloned())
    }

    /// Movies sharing a genre with `id`, best rated first.
    async fn similar(&self, id: MovieId) -> Result<Vec<Movie>> {
        let Some(movie) = self.catalog.get_movie(id) else {
            return Ok(Vec::new());
        };
        if movie.genres.is_empty() {
            return Ok(Vec::new());
        }

        let query = Query::new().with_genres(movie.genres.iter().copied());
        let others: Vec<Movie> = self
            .catalog
            .iter()
            .filter(|m| m.id != id)
            .cloned()
            .collect();

        let mut similar = FilterPipeline::new()
            .add_filter(GenreFilter)
            .apply(others, &query);
        sort_movies(&mut similar, SortKey::Rating);
        Ok(similar)
    }

    async fn resolve(&self, ids: &[MovieId]) -> Result<Vec<Movie>> {
        Ok(self
            .catalog
            .movies_by_ids(ids)
            .into_iter()
            .cloned()
            .collect())
    }
}

/// Serves everything from TMDB.
#[derive(Clone)]
pub struct LiveSource {
    client: TmdbClient,
    window: TimeWindow,
}

impl LiveSource {
    pub fn new(client: TmdbClient) -> Self {
        Self {
            client,
            window: TimeWindow::default(),
        }
    }

    pub fn with_window(mut self, window: TimeWindow) -> Self {
        self.window = window;
        self
    }
}

#[async_trait]
impl CatalogSource for LiveSource {
    fn name(&self) -> &str {
        "tmdb"
    }

    async fn recommended(&self, limit: usize) -> Result<Vec<Movie>> {
        let mut movies = self
            .client
            .try_top_rated(1)
            .await
            .context("Fetching top rated movies")?;
        movies.truncate(limit);
        Ok(movies)
    }

    async fn trending(&self, limit: usize) -> Result<Vec<Movie>> {
        let mut movies = self
            .client
            .try_trending(self.window)
            .await
            .context("Fetching trending movies")?;
        movies.truncate(limit);
        Ok(movies)
    }

    async fn search(&self, query: &Query) -> Result<Vec<Movie>> {
        self.client
            .try_search_and_filter(query)
            .await
            .context("Searching movies")
    }

    async fn details(&self, id: MovieId) -> Result<Option<Movie>> {
        self.client
            .try_details(id)
            .await
            .with_context(|| format!("Fetching details for movie {}", id))
    }

    async fn similar(&self, id: MovieId) -> Result<Vec<Movie>> {
        self.client
            .try_similar(id)
            .await
            .with_context(|| format!("Fetching movies similar to {}", id))
    }

    /// One details request per id, in the order given.
    async fn resolve(&self, ids: &[MovieId]) -> Result<Vec<Movie>> {
        let mut movies = Vec::with_capacity(ids.len());
        for &id in ids {
            match self.client.details(id).await {
                Some(movie) => movies.push(movie),
                None => debug!("Could not resolve movie {}", id),
            }
        }
        Ok(movies)
    }
}
