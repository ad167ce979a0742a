//! # Session driver
//!
//! Owns the session state and a catalog source, and runs the effects the
//! reducer asks for:
//! 1. Home feed: recommended and trending fetched concurrently
//! 2. Browse: one query at a time per view, stale answers dropped
//! 3. Profile: watchlist and ratings resolved against the source

use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::Instant;

use anyhow::Result;
use catalog::{Movie, MovieId};
use query_engine::Query;
use tracing::{error, info};

use crate::profile::Profile;
use crate::reducer::{Action, Effect, reduce};
use crate::source::CatalogSource;
use crate::state::{HomeFeed, SessionState, Stars, View};

/// Default length of each home feed list
pub const HOME_LIMIT: usize = 12;

pub struct Session {
    source: Arc<dyn CatalogSource>,
    state: SessionState,
    home_limit: usize,
}

impl Session {
    pub fn new(source: Arc<dyn CatalogSource>) -> Self {
        Self {
            source,
            state: SessionState::new(),
            home_limit: HOME_LIMIT,
        }
    }

    pub fn with_home_limit(mut self, limit: usize) -> Self {
        self.home_limit = limit;
        self
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Apply `action` without running any effect it produces.
    pub fn dispatch(&mut self, action: Action) -> Option<Effect> {
        reduce(&mut self.state, action)
    }

    /// Run an effect and return the action that completes it. The state is
    /// not touched, so completions can be applied in any order.
    pub async fn run_effect(&self, effect: Effect) -> Action {
        match effect {
            Effect::LoadHome { token } => Action::HomeLoaded {
                token,
                feed: fetch_home(self.source.as_ref(), self.home_limit).await,
            },
            Effect::RunQuery { token, query } => {
                let movies = match self.source.search(&query).await {
                    Ok(movies) => movies,
                    Err(e) => {
                        error!("Error running query: {:#}", e);
                        Vec::new()
                    }
                };
                Action::ResultsLoaded { token, movies }
            }
        }
    }

    /// Dispatch `action` and, if it needs data, fetch and apply the result.
    pub async fn perform(&mut self, action: Action) {
        if let Some(effect) = self.dispatch(action) {
            let completion = self.run_effect(effect).await;
            self.dispatch(completion);
        }
    }

    pub async fn navigate(&mut self, view: View) {
        self.perform(Action::Navigate(view)).await;
    }

    /// Home feed, loading it on first use.
    pub async fn home(&mut self) -> HomeFeed {
        if self.state.home.is_none() {
            self.perform(Action::RefreshHome).await;
        }
        self.state.home.clone().unwrap_or_default()
    }

    /// Run `query` as the browse query and return its results.
    pub async fn browse(&mut self, query: Query) -> Vec<Movie> {
        self.perform(Action::SetQuery(query)).await;
        self.state.browse.results.clone().unwrap_or_default()
    }

    pub fn rate(&mut self, id: MovieId, stars: Stars) {
        self.dispatch(Action::Rate { id, stars });
    }

    pub fn toggle_watchlist(&mut self, id: MovieId) {
        self.dispatch(Action::ToggleWatchlist(id));
    }

    pub fn add_to_watchlist(&mut self, id: MovieId) {
        self.dispatch(Action::AddToWatchlist(id));
    }

    /// Watchlist movies, rated count and favorite genres.
    pub async fn profile(&self) -> Result<Profile> {
        let ratings = self.state.ratings();
        let watchlist = self.state.watchlist();

        let ids: BTreeSet<MovieId> = ratings.keys().chain(watchlist.iter()).copied().collect();
        let ids: Vec<MovieId> = ids.into_iter().collect();
        let movies = self.source.resolve(&ids).await?;

        Ok(Profile::build(&movies, &ratings, &watchlist))
    }
}

/// Fetch both home lists concurrently. A failed list comes back empty.
pub async fn fetch_home(source: &dyn CatalogSource, limit: usize) -> HomeFeed {
    let start = Instant::now();

    let (recommended, trending) =
        tokio::join!(source.recommended(limit), source.trending(limit));

    let recommended = recommended.unwrap_or_else(|e| {
        error!("Error loading recommended movies: {:#}", e);
        Vec::new()
    });
    let trending = trending.unwrap_or_else(|e| {
        error!("Error loading trending movies: {:#}", e);
        Vec::new()
    });

    info!(
        "Loaded home feed from {}: {} recommended, {} trending in {:.2?}",
        source.name(),
        recommended.len(),
        trending.len(),
        start.elapsed()
    );

    HomeFeed {
        recommended,
        trending,
    }
}
