//! The fixed genre enumeration and its TMDB code table.
//!
//! Every genre a [`Movie`](crate::Movie) carries is one of these 19 values.
//! The table is bidirectional: [`Genre::code`] gives the numeric id TMDB
//! uses in `genre_ids` / `with_genres`, and [`Genre::from_code`] maps it back.
//! Codes outside the table have no genre and are dropped by the adapter.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CatalogError;

/// Movie genres, in the order the front-end lists them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Genre {
    Action,
    Adventure,
    Animation,
    Comedy,
    Crime,
    Documentary,
    Drama,
    Family,
    Fantasy,
    History,
    Horror,
    Music,
    Mystery,
    Romance,
    #[serde(rename = "Science Fiction")]
    ScienceFiction,
    #[serde(rename = "TV Movie")]
    TvMovie,
    Thriller,
    War,
    Western,
}

/// (genre, TMDB code) pairs. Single source of truth for both directions.
const GENRE_CODES: [(Genre, u32); 19] = [
    (Genre::Action, 28),
    (Genre::Adventure, 12),
    (Genre::Animation, 16),
    (Genre::Comedy, 35),
    (Genre::Crime, 80),
    (Genre::Documentary, 99),
    (Genre::Drama, 18),
    (Genre::Family, 10751),
    (Genre::Fantasy, 14),
    (Genre::History, 36),
    (Genre::Horror, 27),
    (Genre::Music, 10402),
    (Genre::Mystery, 9648),
    (Genre::Romance, 10749),
    (Genre::ScienceFiction, 878),
    (Genre::TvMovie, 10770),
    (Genre::Thriller, 53),
    (Genre::War, 10752),
    (Genre::Western, 37),
];

impl Genre {
    /// All genres in enumeration order.
    pub const ALL: [Genre; 19] = [
        Genre::Action,
        Genre::Adventure,
        Genre::Animation,
        Genre::Comedy,
        Genre::Crime,
        Genre::Documentary,
        Genre::Drama,
        Genre::Family,
        Genre::Fantasy,
        Genre::History,
        Genre::Horror,
        Genre::Music,
        Genre::Mystery,
        Genre::Romance,
        Genre::ScienceFiction,
        Genre::TvMovie,
        Genre::Thriller,
        Genre::War,
        Genre::Western,
    ];

    /// Human-readable name, e.g. `"Science Fiction"`.
    pub fn name(self) -> &'static str {
        match self {
            Genre::Action => "Action",
            Genre::Adventure => "Adventure",
            Genre::Animation => "Animation",
            Genre::Comedy => "Comedy",
            Genre::Crime => "Crime",
            Genre::Documentary => "Documentary",
            Genre::Drama => "Drama",
            Genre::Family => "Family",
            Genre::Fantasy => "Fantasy",
            Genre::History => "History",
            Genre::Horror => "Horror",
            Genre::Music => "Music",
            Genre::Mystery => "Mystery",
            Genre::Romance => "Romance",
            Genre::ScienceFiction => "Science Fiction",
            Genre::TvMovie => "TV Movie",
            Genre::Thriller => "Thriller",
            Genre::War => "War",
            Genre::Western => "Western",
        }
    }

    /// TMDB genre code for this genre.
    pub fn code(self) -> u32 {
        GENRE_CODES
            .iter()
            .find(|(genre, _)| *genre == self)
            .map(|&(_, code)| code)
            .unwrap_or_default()
    }

    /// Genre for a TMDB code, or `None` when the code is not in the table.
    pub fn from_code(code: u32) -> Option<Genre> {
        GENRE_CODES
            .iter()
            .find(|&&(_, c)| c == code)
            .map(|&(genre, _)| genre)
    }

    /// Looks up a genre by display name, ignoring ASCII case.
    ///
    /// Also accepts the name with spaces removed or replaced by `-`/`_`
    /// (`"science-fiction"`, `"tvmovie"`), which is handy on a command line.
    pub fn from_name(name: &str) -> Option<Genre> {
        let wanted = normalize(name);
        Genre::ALL
            .iter()
            .copied()
            .find(|genre| normalize(genre.name()) == wanted)
    }
}

fn normalize(name: &str) -> String {
    name.chars()
        .filter(|c| !matches!(c, ' ' | '-' | '_'))
        .flat_map(char::to_lowercase)
        .collect()
}

impl fmt::Display for Genre {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Genre {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Genre::from_name(s).ok_or_else(|| CatalogError::UnknownGenre(s.to_string()))
    }
}
