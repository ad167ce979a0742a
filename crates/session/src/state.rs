//! Explicit session state.
//!
//! The state is a plain value owned by the driver. Ratings and the
//! watchlist sit behind `Arc`s and are replaced wholesale on every change,
//! so a snapshot handed out earlier never changes underneath its holder.

use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use catalog::{Movie, MovieId};
use query_engine::Query;

use crate::error::{Result, SessionError};

/// Which top-level view is showing. Any view can be reached from any other.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum View {
    #[default]
    Home,
    Browse,
    Profile,
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            View::Home => "home",
            View::Browse => "browse",
            View::Profile => "profile",
        };
        f.write_str(name)
    }
}

/// A whole-star rating, 1 to 5.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Stars(u8);

impl Stars {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    pub fn new(value: u8) -> Result<Self> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(SessionError::InvalidRating(value))
        }
    }

    pub fn get(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for Stars {
    type Error = SessionError;

    fn try_from(value: u8) -> Result<Self> {
        Stars::new(value)
    }
}

impl fmt::Display for Stars {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.0, Self::MAX)
    }
}

/// `ID=STARS`, as given on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RatingEntry {
    pub id: MovieId,
    pub stars: Stars,
}

impl FromStr for RatingEntry {
    type Err = SessionError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || SessionError::InvalidRatingEntry(s.to_string());
        let (id, stars) = s.split_once('=').ok_or_else(invalid)?;
        let id = id.trim().parse().map_err(|_| invalid())?;
        let stars: u8 = stars.trim().parse().map_err(|_| invalid())?;
        Ok(Self {
            id,
            stars: Stars::new(stars)?,
        })
    }
}

/// Identifies one issued fetch. Later requests get larger tokens.
pub type RequestToken = u64;

pub type Ratings = HashMap<MovieId, Stars>;
pub type Watchlist = BTreeSet<MovieId>;

/// The two home collections.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HomeFeed {
    pub recommended: Vec<Movie>,
    pub trending: Vec<Movie>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BrowseState {
    pub query: Query,
    /// `None` until the first result set for this view arrives
    pub results: Option<Vec<Movie>>,
}

#[derive(Debug, Clone, Default)]
pub struct SessionState {
    pub view: View,
    /// `None` until the home feed has loaded
    pub home: Option<HomeFeed>,
    pub browse: BrowseState,
    pub(crate) ratings: Arc<Ratings>,
    pub(crate) watchlist: Arc<Watchlist>,
    pub(crate) next_token: RequestToken,
    /// Latest token issued per view whose result has not arrived yet
    pub(crate) pending: HashMap<View, RequestToken>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the ratings map
    pub fn ratings(&self) -> Arc<Ratings> {
        Arc::clone(&self.ratings)
    }

    /// Snapshot of the watchlist
    pub fn watchlist(&self) -> Arc<Watchlist> {
        Arc::clone(&self.watchlist)
    }

    pub fn rating(&self, id: MovieId) -> Option<Stars> {
        self.ratings.get(&id).copied()
    }

    pub fn is_watchlisted(&self, id: MovieId) -> bool {
        self.watchlist.contains(&id)
    }

    pub fn is_loading(&self, view: View) -> bool {
        self.pending.contains_key(&view)
    }

    pub(crate) fn issue_token(&mut self, view: View) -> RequestToken {
        self.next_token += 1;
        self.pending.insert(view, self.next_token);
        self.next_token
    }

    /// Clears the pending entry if `token` is the latest for `view`.
    pub(crate) fn settle(&mut self, view: View, token: RequestToken) -> bool {
        if self.pending.get(&view) == Some(&token) {
            self.pending.remove(&view);
            true
        } else {
            false
        }
    }
}
