//! Error types for session state.

use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum SessionError {
    /// Ratings are whole stars from 1 to 5
    #[error("Invalid rating {0}: expected 1 to 5 stars")]
    InvalidRating(u8),

    /// A `ID=STARS` pair that does not parse
    #[error("Invalid rating entry {0:?}: expected ID=STARS")]
    InvalidRatingEntry(String),
}

pub type Result<T> = std::result::Result<T, SessionError>;
