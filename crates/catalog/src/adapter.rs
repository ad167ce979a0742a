//! The catalog adapter: raw source records in, normalized [`Movie`]s out.
//!
//! Two record shapes are accepted:
//! - fixture records, which already use the internal field names
//! - TMDB records (`poster_path`, `vote_average`, `genre_ids`, ...)
//!
//! Each raw record yields exactly one movie, or none when it has no id or
//! no title. Nothing here returns an error. Unknown genres are dropped,
//! missing or malformed optional fields are left unset.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Deserializer};
use tracing::debug;

use crate::genre::Genre;
use crate::types::{Movie, MovieId};

// =============================================================================
// Raw TMDB records
// =============================================================================

/// A movie as it appears in TMDB list endpoints (popular, search, discover...).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawMovie {
    pub id: Option<MovieId>,
    pub title: Option<String>,
    pub overview: Option<String>,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
    pub release_date: Option<String>,
    pub vote_average: Option<f32>,
    pub vote_count: Option<u64>,
    pub popularity: Option<f64>,
    #[serde(deserialize_with = "null_as_default")]
    pub genre_ids: Vec<u32>,
    #[serde(deserialize_with = "null_as_default")]
    pub adult: bool,
}

/// Genre object embedded in a TMDB detail record
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawGenre {
    #[serde(deserialize_with = "null_as_default")]
    pub id: u32,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
}

/// A movie as returned by the TMDB by-id endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawMovieDetails {
    pub id: Option<MovieId>,
    pub title: Option<String>,
    pub overview: Option<String>,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
    pub release_date: Option<String>,
    pub vote_average: Option<f32>,
    pub vote_count: Option<u64>,
    pub popularity: Option<f64>,
    pub runtime: Option<u32>,
    #[serde(deserialize_with = "null_as_default")]
    pub genres: Vec<RawGenre>,
}

/// One page of a TMDB list response.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, bound(deserialize = "T: Deserialize<'de>"))]
pub struct RawPage<T> {
    #[serde(deserialize_with = "null_as_default")]
    pub page: u32,
    #[serde(deserialize_with = "null_as_default")]
    pub results: Vec<T>,
    #[serde(deserialize_with = "null_as_default")]
    pub total_pages: u32,
    #[serde(deserialize_with = "null_as_default")]
    pub total_results: u32,
}

impl<T> Default for RawPage<T> {
    fn default() -> Self {
        Self {
            page: 0,
            results: Vec::new(),
            total_pages: 0,
            total_results: 0,
        }
    }
}

// =============================================================================
// Fixture records
// =============================================================================

/// A fixture movie. Same field names as [`Movie`], but genres are plain
/// strings so unknown names can be dropped instead of failing the file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FixtureRecord {
    pub id: Option<MovieId>,
    pub title: Option<String>,
    pub year: Option<u16>,
    #[serde(deserialize_with = "null_as_default")]
    pub genres: Vec<String>,
    pub poster_url: Option<String>,
    pub backdrop_url: Option<String>,
    pub rating: Option<f32>,
    pub overview: Option<String>,
    pub release_date: Option<String>,
    pub runtime: Option<u32>,
    pub vote_count: Option<u64>,
    pub popularity: Option<f64>,
}

/// An explicit `null` decodes the same as a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

// =============================================================================
// Image URLs
// =============================================================================

/// Image size tokens used when building TMDB image URLs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageSize {
    /// Posters in lists and grids
    ListPoster,
    /// Poster on the details view
    DetailPoster,
    Backdrop,
}

impl ImageSize {
    pub fn token(self) -> &'static str {
        match self {
            ImageSize::ListPoster => "w342",
            ImageSize::DetailPoster => "w500",
            ImageSize::Backdrop => "w1280",
        }
    }
}

/// Where images are served from. Without a base URL no image field is set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImageConfig {
    pub base_url: Option<String>,
}

impl ImageConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: Some(base_url.into()),
        }
    }

    /// `base/size/path`, or `None` if either the base or the path is missing.
    pub fn url(&self, size: ImageSize, path: Option<&str>) -> Option<String> {
        let base = self.base_url.as_deref().map(str::trim).filter(|b| !b.is_empty())?;
        let path = path.map(str::trim).filter(|p| !p.is_empty())?;
        let base = base.trim_end_matches('/');
        if path.starts_with('/') {
            Some(format!("{}/{}{}", base, size.token(), path))
        } else {
            Some(format!("{}/{}/{}", base, size.token(), path))
        }
    }
}

// =============================================================================
// Adapter
// =============================================================================

/// Converts raw records into normalized movies.
#[derive(Debug, Clone, Default)]
pub struct Adapter {
    images: ImageConfig,
}

impl Adapter {
    pub fn new(images: ImageConfig) -> Self {
        Self { images }
    }

    /// Adapt one TMDB list record.
    pub fn adapt(&self, raw: RawMovie) -> Option<Movie> {
        let (id, title) = usable(raw.id, raw.title)?;

        let genres = genres_from_codes(&raw.genre_ids);

        Some(Movie {
            id,
            title,
            year: raw.release_date.as_deref().and_then(parse_release_year),
            genres,
            poster_url: self.images.url(ImageSize::ListPoster, raw.poster_path.as_deref()),
            backdrop_url: self.images.url(ImageSize::Backdrop, raw.backdrop_path.as_deref()),
            rating: raw.vote_average.and_then(valid_rating),
            overview: non_blank(raw.overview),
            release_date: non_blank(raw.release_date),
            runtime: None,
            vote_count: raw.vote_count,
            popularity: raw.popularity.filter(|p| p.is_finite()),
        })
    }

    /// Adapt a TMDB detail record (by-id endpoint).
    pub fn adapt_details(&self, raw: RawMovieDetails) -> Option<Movie> {
        let (id, title) = usable(raw.id, raw.title)?;

        let codes: Vec<u32> = raw.genres.iter().map(|g| g.id).collect();

        Some(Movie {
            id,
            title,
            year: raw.release_date.as_deref().and_then(parse_release_year),
            genres: genres_from_codes(&codes),
            poster_url: self.images.url(ImageSize::DetailPoster, raw.poster_path.as_deref()),
            backdrop_url: self.images.url(ImageSize::Backdrop, raw.backdrop_path.as_deref()),
            rating: raw.vote_average.and_then(valid_rating),
            overview: non_blank(raw.overview),
            release_date: non_blank(raw.release_date),
            runtime: raw.runtime.filter(|&r| r > 0),
            vote_count: raw.vote_count,
            popularity: raw.popularity.filter(|p| p.is_finite()),
        })
    }

    /// Adapt every record of a page, skipping unusable ones.
    pub fn adapt_page(&self, page: RawPage<RawMovie>) -> Vec<Movie> {
        let total = page.results.len();
        let movies: Vec<Movie> = page
            .results
            .into_iter()
            .filter_map(|raw| self.adapt(raw))
            .collect();
        if movies.len() != total {
            debug!("Skipped {} unusable records of {}", total - movies.len(), total);
        }
        movies
    }
}

/// Adapt a fixture record. Fixture records already carry the internal
/// shape; only genre names are checked against the enumeration.
pub fn adapt_fixture(record: FixtureRecord) -> Option<Movie> {
    let (id, title) = usable(record.id, record.title)?;

    let genres = record
        .genres
        .iter()
        .filter_map(|name| {
            let genre = Genre::from_name(name);
            if genre.is_none() {
                debug!("Dropping unknown genre {:?} on movie {}", name, id);
            }
            genre
        })
        .collect();

    let year = record
        .year
        .or_else(|| record.release_date.as_deref().and_then(parse_release_year));

    Some(Movie {
        id,
        title,
        year,
        genres,
        poster_url: non_blank(record.poster_url),
        backdrop_url: non_blank(record.backdrop_url),
        rating: record.rating.and_then(valid_rating),
        overview: non_blank(record.overview),
        release_date: non_blank(record.release_date),
        runtime: record.runtime,
        vote_count: record.vote_count,
        popularity: record.popularity.filter(|p| p.is_finite()),
    })
}

/// Map TMDB genre codes to genres, dropping codes outside the table.
pub fn genres_from_codes(codes: &[u32]) -> Vec<Genre> {
    codes.iter().filter_map(|&code| Genre::from_code(code)).collect()
}

/// Year of a `YYYY-MM-DD` date, or `None` if the text is empty or not a date.
pub fn parse_release_year(date: &str) -> Option<u16> {
    let date = NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d").ok()?;
    u16::try_from(date.year()).ok()
}

fn usable(id: Option<MovieId>, title: Option<String>) -> Option<(MovieId, String)> {
    let Some(id) = id else {
        debug!("Skipping record without id");
        return None;
    };
    match non_blank(title) {
        Some(title) => Some((id, title)),
        None => {
            debug!("Skipping record {} without title", id);
            None
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn valid_rating(rating: f32) -> Option<f32> {
    (rating.is_finite() && (0.0..=10.0).contains(&rating)).then_some(rating)
}
