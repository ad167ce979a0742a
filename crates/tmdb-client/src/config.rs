//! Environment configuration for the TMDB client.
//!
//! Variables:
//! - `TMDB_API_KEY`: API key sent as the `api_key` query parameter
//! - `TMDB_BASE_URL`: API root, e.g. `https://api.themoviedb.org/3`
//! - `TMDB_IMAGE_BASE_URL`: image root, e.g. `https://image.tmdb.org/t/p`
//! - `TMDB_TIMEOUT_SECS`: optional per-request timeout; unset means none
//!
//! A `.env` file in the working directory is honored. A missing key or base
//! URL is not an error here: the client degrades every fetch to an empty
//! result instead.

use std::time::Duration;

use catalog::ImageConfig;
use tracing::{debug, warn};

use crate::error::{Result, TmdbError};

pub const API_KEY_VAR: &str = "TMDB_API_KEY";
pub const BASE_URL_VAR: &str = "TMDB_BASE_URL";
pub const IMAGE_BASE_URL_VAR: &str = "TMDB_IMAGE_BASE_URL";
pub const TIMEOUT_VAR: &str = "TMDB_TIMEOUT_SECS";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TmdbConfig {
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub image_base_url: Option<String>,
    pub timeout: Option<Duration>,
}

impl TmdbConfig {
    pub fn new(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            api_key: Some(api_key.into()),
            base_url: Some(base_url.into()),
            ..Self::default()
        }
    }

    pub fn with_image_base_url(mut self, url: impl Into<String>) -> Self {
        self.image_base_url = Some(url.into());
        self
    }

    /// Load `.env` (if any) and read the process environment.
    pub fn from_env() -> Result<Self> {
        match dotenvy::dotenv() {
            Ok(path) => debug!("Loaded environment from {}", path.display()),
            Err(e) if e.not_found() => {}
            Err(e) => warn!("Failed to load .env file: {}", e),
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable lookup. Blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let read = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let timeout = match read(TIMEOUT_VAR) {
            Some(raw) => {
                let secs = raw.parse::<u64>().map_err(|_| TmdbError::InvalidConfig {
                    key: TIMEOUT_VAR,
                    value: raw.clone(),
                })?;
                Some(Duration::from_secs(secs))
            }
            None => None,
        };

        Ok(Self {
            api_key: read(API_KEY_VAR),
            base_url: read(BASE_URL_VAR),
            image_base_url: read(IMAGE_BASE_URL_VAR),
            timeout,
        })
    }

    /// Key and base URL are both present
    pub fn is_configured(&self) -> bool {
        self.api_key.is_some() && self.base_url.is_some()
    }

    /// The key and base URL, or the first missing variable.
    pub(crate) fn credentials(&self) -> Result<(&str, &str)> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(TmdbError::MissingConfig(API_KEY_VAR))?;
        let base_url = self
            .base_url
            .as_deref()
            .ok_or(TmdbError::MissingConfig(BASE_URL_VAR))?;
        Ok((api_key, base_url.trim_end_matches('/')))
    }

    pub fn image_config(&self) -> ImageConfig {
        ImageConfig {
            base_url: self.image_base_url.clone(),
        }
    }
}
