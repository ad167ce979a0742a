//! Query engine for filtering and sorting a movie catalog.
//!
//! This crate provides:
//! - `Query` and `SortKey`, the user's filter/sort intent
//! - Filter trait and implementations (text match, genre)
//! - FilterPipeline for composing filters
//! - Stable descending sorts
//! - `evaluate`, which ties the above together
//!
//! ## Architecture
//! A query is processed in stages:
//! 1. Text filter keeps movies whose title or genre names contain the text
//! 2. Genre filter keeps movies sharing at least one selected genre
//! 3. A stable sort orders the survivors by the requested key
//!
//! ## Example Usage
//! ```ignore
//! use query_engine::{evaluate, Query, SortKey};
//! use catalog::Genre;
//!
//! let query = Query::new()
//!     .with_text("incep")
//!     .with_genre(Genre::Action)
//!     .sorted_by(SortKey::Rating);
//!
//! let results = evaluate(&catalog, &query);
//! ```

pub mod engine;
pub mod filter_pipeline;
pub mod filters;
pub mod query;
pub mod sort;
pub mod traits;

// Re-export main types
pub use engine::{QueryEngine, evaluate};
pub use filter_pipeline::FilterPipeline;
pub use query::{ParseSortKeyError, Query, SortKey};
pub use sort::{sort_movies, top_by};
pub use traits::Filter;
