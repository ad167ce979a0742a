//! HTTP client for the TMDB read-only endpoints.
//!
//! Two layers:
//! - `try_*` methods return `Result<_, TmdbError>` and surface every failure
//! - the plain methods call them, log any failure and return an empty list
//!   (or `None` for by-id lookups), so "no results" and "fetch failed" look
//!   the same to callers

use std::fmt;
use std::str::FromStr;

use catalog::{Adapter, Genre, Movie, MovieId, RawMovie, RawMovieDetails, RawPage};
use query_engine::SortKey;
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::{debug, error, instrument, warn};

use crate::config::TmdbConfig;
use crate::error::{Result, TmdbError};

const LANGUAGE: &str = "en-US";

/// Window for the trending endpoint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TimeWindow {
    Day,
    #[default]
    Week,
}

impl TimeWindow {
    pub fn as_str(self) -> &'static str {
        match self {
            TimeWindow::Day => "day",
            TimeWindow::Week => "week",
        }
    }
}

impl fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TimeWindow {
    type Err = TmdbError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "day" => Ok(TimeWindow::Day),
            "week" => Ok(TimeWindow::Week),
            _ => Err(TmdbError::InvalidConfig {
                key: "time window",
                value: s.to_string(),
            }),
        }
    }
}

/// `sort_by` value for the discover endpoint. No key means popularity.
pub fn sort_param(key: Option<SortKey>) -> &'static str {
    match key {
        Some(SortKey::Rating) => "vote_average.desc",
        Some(SortKey::Year) => "release_date.desc",
        Some(SortKey::Popularity) | None => "popularity.desc",
    }
}

/// Comma-joined genre codes for `with_genres`; `None` for an empty selection.
pub fn genre_param<'g>(genres: impl IntoIterator<Item = &'g Genre>) -> Option<String> {
    let codes: Vec<String> = genres.into_iter().map(|g| g.code().to_string()).collect();
    if codes.is_empty() {
        None
    } else {
        Some(codes.join(","))
    }
}

/// Filters for the discover endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoverOptions {
    pub genres: Vec<Genre>,
    pub sort: Option<SortKey>,
    pub page: u32,
}

impl Default for DiscoverOptions {
    fn default() -> Self {
        Self {
            genres: Vec::new(),
            sort: None,
            page: 1,
        }
    }
}

/// Async TMDB client. Cheap to clone.
#[derive(Debug, Clone)]
pub struct TmdbClient {
    http: Client,
    config: TmdbConfig,
    adapter: Adapter,
}

impl TmdbClient {
    /// Build a client. Only fails if the HTTP client itself cannot be built;
    /// missing credentials are reported per request.
    pub fn new(config: TmdbConfig) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().map_err(TmdbError::Client)?;

        if !config.is_configured() {
            warn!("TMDB credentials are not configured; live fetches will return no results");
        }

        let adapter = Adapter::new(config.image_config());
        Ok(Self {
            http,
            config,
            adapter,
        })
    }

    /// Client configured from the environment (and `.env`).
    pub fn from_env() -> Result<Self> {
        Self::new(TmdbConfig::from_env()?)
    }

    pub fn is_configured(&self) -> bool {
        self.config.is_configured()
    }

    // =========================================================================
    // Fallible layer
    // =========================================================================

    /// GET `endpoint` with the standard parameters plus `params`, decoding
    /// the body as `T`.
    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        params: &[(&str, String)],
    ) -> Result<T> {
        let (api_key, base_url) = self.config.credentials()?;
        let url = format!("{}{}", base_url, endpoint);

        let mut query: Vec<(&str, String)> = vec![
            ("api_key", api_key.to_string()),
            ("language", LANGUAGE.to_string()),
        ];
        query.extend(params.iter().cloned());

        debug!("GET {}", endpoint);
        let response = self
            .http
            .get(&url)
            .query(&query)
            .send()
            .await
            .map_err(|source| TmdbError::Network {
                endpoint: endpoint.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(TmdbError::Status {
                endpoint: endpoint.to_string(),
                status,
            });
        }

        let body = response.bytes().await.map_err(|source| TmdbError::Network {
            endpoint: endpoint.to_string(),
            source,
        })?;

        serde_json::from_slice(&body).map_err(|source| TmdbError::Decode {
            endpoint: endpoint.to_string(),
            source,
        })
    }

    /// Fetch one page of list records and adapt them.
    pub async fn try_get_page(
        &self,
        endpoint: &str,
        params: &[(&str, String)],
    ) -> Result<Vec<Movie>> {
        let page: RawPage<RawMovie> = self.get_json(endpoint, params).await?;
        debug!(
            "{} page {} of {} ({} results)",
            endpoint,
            page.page,
            page.total_pages,
            page.results.len()
        );
        Ok(self.adapter.adapt_page(page))
    }

    #[instrument(skip(self))]
    pub async fn try_popular(&self, page: u32) -> Result<Vec<Movie>> {
        self.try_get_page("/movie/popular", &[("page", page.to_string())])
            .await
    }

    #[instrument(skip(self))]
    pub async fn try_top_rated(&self, page: u32) -> Result<Vec<Movie>> {
        self.try_get_page("/movie/top_rated", &[("page", page.to_string())])
            .await
    }

    #[instrument(skip(self))]
    pub async fn try_trending(&self, window: TimeWindow) -> Result<Vec<Movie>> {
        self.try_get_page(&format!("/trending/movie/{}", window), &[])
            .await
    }

    /// Blank text returns no results without a request.
    #[instrument(skip(self))]
    pub async fn try_search(&self, text: &str, page: u32) -> Result<Vec<Movie>> {
        if text.trim().is_empty() {
            return Ok(Vec::new());
        }
        self.try_get_page(
            "/search/movie",
            &[("query", text.to_string()), ("page", page.to_string())],
        )
        .await
    }

    #[instrument(skip(self))]
    pub async fn try_discover(&self, options: &DiscoverOptions) -> Result<Vec<Movie>> {
        let mut params = vec![
            ("page", options.page.to_string()),
            ("sort_by", sort_param(options.sort).to_string()),
        ];
        if let Some(genres) = genre_param(&options.genres) {
            params.push(("with_genres", genres));
        }
        self.try_get_page("/discover/movie", &params).await
    }

    /// `Ok(None)` when the record came back but is unusable.
    #[instrument(skip(self))]
    pub async fn try_details(&self, id: MovieId) -> Result<Option<Movie>> {
        let raw: RawMovieDetails = self.get_json(&format!("/movie/{}", id), &[]).await?;
        Ok(self.adapter.adapt_details(raw))
    }

    #[instrument(skip(self))]
    pub async fn try_similar(&self, id: MovieId) -> Result<Vec<Movie>> {
        self.try_get_page(&format!("/movie/{}/similar", id), &[("page", "1".to_string())])
            .await
    }

    #[instrument(skip(self))]
    pub async fn try_now_playing(&self, page: u32) -> Result<Vec<Movie>> {
        self.try_get_page("/movie/now_playing", &[("page", page.to_string())])
            .await
    }

    #[instrument(skip(self))]
    pub async fn try_upcoming(&self, page: u32) -> Result<Vec<Movie>> {
        self.try_get_page("/movie/upcoming", &[("page", page.to_string())])
            .await
    }

    // =========================================================================
    // Degrading layer
    // =========================================================================

    pub async fn popular(&self, page: u32) -> Vec<Movie> {
        degrade("popular movies", self.try_popular(page).await)
    }

    pub async fn top_rated(&self, page: u32) -> Vec<Movie> {
        degrade("top rated movies", self.try_top_rated(page).await)
    }

    pub async fn trending(&self, window: TimeWindow) -> Vec<Movie> {
        degrade("trending movies", self.try_trending(window).await)
    }

    pub async fn search(&self, text: &str, page: u32) -> Vec<Movie> {
        degrade("movie search", self.try_search(text, page).await)
    }

    pub async fn discover(&self, options: &DiscoverOptions) -> Vec<Movie> {
        degrade("discover movies", self.try_discover(options).await)
    }

    pub async fn details(&self, id: MovieId) -> Option<Movie> {
        degrade("movie details", self.try_details(id).await)
    }

    pub async fn similar(&self, id: MovieId) -> Vec<Movie> {
        degrade("similar movies", self.try_similar(id).await)
    }

    pub async fn now_playing(&self, page: u32) -> Vec<Movie> {
        degrade("now playing movies", self.try_now_playing(page).await)
    }

    pub async fn upcoming(&self, page: u32) -> Vec<Movie> {
        degrade("upcoming movies", self.try_upcoming(page).await)
    }
}

/// Log a failed fetch and fall back to the empty value.
pub(crate) fn degrade<T: Default>(what: &str, result: Result<T>) -> T {
    match result {
        Ok(value) => value,
        Err(e @ TmdbError::MissingConfig(_)) => {
            warn!("Skipping {}: {}", what, e);
            T::default()
        }
        Err(e) => {
            error!("Error fetching {}: {}", what, e);
            T::default()
        }
    }
}
