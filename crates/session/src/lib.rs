//! Session layer for the movie discovery core.
//!
//! This crate provides:
//! - `SessionState`, the explicit application state
//! - `Action` + `reduce`, the only way state changes
//! - `CatalogSource`, with mock (fixtures) and live (TMDB) implementations
//! - `Session`, the async driver running fetches the reducer asks for

pub mod driver;
pub mod error;
pub mod profile;
pub mod reducer;
pub mod source;
pub mod state;

pub use driver::{HOME_LIMIT, Session, fetch_home};
pub use error::{Result, SessionError};
pub use profile::{Profile, favorite_genres};
pub use reducer::{Action, Effect, reduce};
pub use source::{CatalogSource, LiveSource, MockSource};
pub use state::{
    BrowseState, HomeFeed, RatingEntry, Ratings, RequestToken, SessionState, Stars, View,
    Watchlist,
};
