//! The user's filter/sort intent.

use catalog::Genre;
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Sort keys. Every key sorts descending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortKey {
    /// Highest rated first
    Rating,
    /// Most popular first
    Popularity,
    /// Newest first
    Year,
}

impl SortKey {
    pub fn name(self) -> &'static str {
        match self {
            SortKey::Rating => "rating",
            SortKey::Popularity => "popularity",
            SortKey::Year => "year",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
#[error("Unknown sort key {0:?} (expected rating, popularity or year)")]
pub struct ParseSortKeyError(pub String);

impl FromStr for SortKey {
    type Err = ParseSortKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "rating" | "top-rated" => Ok(SortKey::Rating),
            "popularity" | "popular" => Ok(SortKey::Popularity),
            "year" | "newest" => Ok(SortKey::Year),
            _ => Err(ParseSortKeyError(s.to_string())),
        }
    }
}

/// A (text, genre set, sort key) triple.
///
/// Every combination is valid, including the empty query, which selects
/// the whole catalog in source order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    /// Free text, matched case-insensitively against titles and genre names
    pub text: String,
    /// Genre filter with OR semantics; empty means no genre filtering
    pub genres: BTreeSet<Genre>,
    pub sort: Option<SortKey>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn with_genre(mut self, genre: Genre) -> Self {
        self.genres.insert(genre);
        self
    }

    pub fn with_genres(mut self, genres: impl IntoIterator<Item = Genre>) -> Self {
        self.genres.extend(genres);
        self
    }

    pub fn sorted_by(mut self, key: SortKey) -> Self {
        self.sort = Some(key);
        self
    }

    pub fn has_text(&self) -> bool {
        !self.text.is_empty()
    }

    pub fn has_genres(&self) -> bool {
        !self.genres.is_empty()
    }

    /// No text and no genres
    pub fn is_unfiltered(&self) -> bool {
        !self.has_text() && !self.has_genres()
    }
}
