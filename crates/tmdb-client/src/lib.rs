//! Client for the TMDB movie metadata API.
//!
//! This crate handles:
//! - Reading TMDB settings from the environment (and `.env`)
//! - Calling the read-only movie endpoints
//! - Adapting responses into catalog movies
//! - Degrading failed fetches to empty results, logged
//! - Live-mode query evaluation (search or discover)

pub mod client;
pub mod config;
pub mod error;
pub mod live;

pub use client::{DiscoverOptions, TimeWindow, TmdbClient, genre_param, sort_param};
pub use config::TmdbConfig;
pub use error::{Result, TmdbError};
