//! Filter implementations for the query pipeline.
//!
//! This module contains the concrete filters that can be composed
//! into a FilterPipeline.

pub mod genre;
pub mod text_match;

// Re-export for convenience
pub use genre::GenreFilter;
pub use text_match::{TextMatchFilter, matches_text};
