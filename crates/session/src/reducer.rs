//! State transitions.
//!
//! `reduce` is the only place session state changes. Transitions that need
//! data return an [`Effect`] for the driver to run; the driver feeds the
//! outcome back as another action carrying the same token.

use std::sync::Arc;

use catalog::{Movie, MovieId};
use query_engine::Query;
use tracing::debug;

use crate::state::{HomeFeed, RequestToken, SessionState, Stars, View};

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Switch views. The first visit to Home or Browse starts a load.
    Navigate(View),
    /// Reload the home feed
    RefreshHome,
    /// Replace the browse query and fetch its results
    SetQuery(Query),
    HomeLoaded {
        token: RequestToken,
        feed: HomeFeed,
    },
    ResultsLoaded {
        token: RequestToken,
        movies: Vec<Movie>,
    },
    Rate {
        id: MovieId,
        stars: Stars,
    },
    ClearRating(MovieId),
    AddToWatchlist(MovieId),
    RemoveFromWatchlist(MovieId),
    ToggleWatchlist(MovieId),
}

/// Work the driver must do on behalf of the reducer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    LoadHome { token: RequestToken },
    RunQuery { token: RequestToken, query: Query },
}

pub fn reduce(state: &mut SessionState, action: Action) -> Option<Effect> {
    match action {
        Action::Navigate(view) => {
            state.view = view;
            match view {
                View::Home if state.home.is_none() && !state.is_loading(View::Home) => {
                    Some(load_home(state))
                }
                View::Browse
                    if state.browse.results.is_none() && !state.is_loading(View::Browse) =>
                {
                    Some(run_query(state))
                }
                _ => None,
            }
        }
        Action::RefreshHome => Some(load_home(state)),
        Action::SetQuery(query) => {
            state.browse.query = query;
            Some(run_query(state))
        }
        Action::HomeLoaded { token, feed } => {
            if state.settle(View::Home, token) {
                state.home = Some(feed);
            } else {
                debug!("Discarding stale home feed (token {})", token);
            }
            None
        }
        Action::ResultsLoaded { token, movies } => {
            if state.settle(View::Browse, token) {
                state.browse.results = Some(movies);
            } else {
                debug!("Discarding stale results (token {})", token);
            }
            None
        }
        Action::Rate { id, stars } => {
            let mut ratings = (*state.ratings).clone();
            ratings.insert(id, stars);
            state.ratings = Arc::new(ratings);
            None
        }
        Action::ClearRating(id) => {
            if state.ratings.contains_key(&id) {
                let mut ratings = (*state.ratings).clone();
                ratings.remove(&id);
                state.ratings = Arc::new(ratings);
            }
            None
        }
        Action::AddToWatchlist(id) => {
            if !state.watchlist.contains(&id) {
                let mut watchlist = (*state.watchlist).clone();
                watchlist.insert(id);
                state.watchlist = Arc::new(watchlist);
            }
            None
        }
        Action::RemoveFromWatchlist(id) => {
            if state.watchlist.contains(&id) {
                let mut watchlist = (*state.watchlist).clone();
                watchlist.remove(&id);
                state.watchlist = Arc::new(watchlist);
            }
            None
        }
        Action::ToggleWatchlist(id) => {
            let next = if state.watchlist.contains(&id) {
                Action::RemoveFromWatchlist(id)
            } else {
                Action::AddToWatchlist(id)
            };
            reduce(state, next)
        }
    }
}

fn load_home(state: &mut SessionState) -> Effect {
    Effect::LoadHome {
        token: state.issue_token(View::Home),
    }
}

fn run_query(state: &mut SessionState) -> Effect {
    Effect::RunQuery {
        token: state.issue_token(View::Browse),
        query: state.browse.query.clone(),
    }
}
