//! Profile summary derived from ratings and the watchlist.

use std::collections::HashMap;

use catalog::{Genre, Movie};

use crate::state::{Ratings, Watchlist};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Profile {
    pub watchlist: Vec<Movie>,
    pub rated_count: usize,
    /// Most frequent genres first
    pub favorite_genres: Vec<(Genre, usize)>,
}

impl Profile {
    /// Build from the resolved movies of every rated or watchlisted id.
    ///
    /// `movies` must be in catalog order; the watchlist keeps that order.
    pub fn build(movies: &[Movie], ratings: &Ratings, watchlist: &Watchlist) -> Self {
        let watchlisted: Vec<Movie> = movies
            .iter()
            .filter(|m| watchlist.contains(&m.id))
            .cloned()
            .collect();

        Self {
            watchlist: watchlisted,
            rated_count: ratings.len(),
            favorite_genres: favorite_genres(
                movies
                    .iter()
                    .filter(|m| ratings.contains_key(&m.id) || watchlist.contains(&m.id)),
            ),
        }
    }

    pub fn top_genres(&self, n: usize) -> impl Iterator<Item = Genre> + '_ {
        self.favorite_genres.iter().take(n).map(|(genre, _)| *genre)
    }
}

/// Genre occurrence counts, descending; ties in enumeration order.
pub fn favorite_genres<'a>(movies: impl IntoIterator<Item = &'a Movie>) -> Vec<(Genre, usize)> {
    let mut counts: HashMap<Genre, usize> = HashMap::new();
    for movie in movies {
        for genre in &movie.genres {
            *counts.entry(*genre).or_default() += 1;
        }
    }

    let mut ranked: Vec<(Genre, usize)> = counts.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::Stars;

    fn movies() -> Vec<Movie> {
        vec![
            Movie::new(1, "a").with_genres([Genre::Drama, Genre::Crime]),
            Movie::new(2, "b").with_genres([Genre::Action, Genre::Drama]),
            Movie::new(3, "c").with_genres([Genre::Action, Genre::Crime]),
            Movie::new(4, "d").with_genres([Genre::Comedy]),
        ]
    }

    #[test]
    fn test_favorite_genres_ranking() {
        let ranked = favorite_genres(&movies());
        assert_eq!(
            ranked,
            vec![
                (Genre::Action, 2),
                (Genre::Crime, 2),
                (Genre::Drama, 2),
                (Genre::Comedy, 1),
            ]
        );
    }

    #[test]
    fn test_build_profile() {
        let ratings: Ratings = [(2, Stars::new(4).unwrap())].into_iter().collect();
        let watchlist: Watchlist = [3, 1].into_iter().collect();

        let profile = Profile::build(&movies(), &ratings, &watchlist);

        assert_eq!(profile.rated_count, 1);
        let ids: Vec<_> = profile.watchlist.iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![1, 3]);
        // Comedy belongs to neither list
        assert!(profile.favorite_genres.iter().all(|(g, _)| *g != Genre::Comedy));
        assert_eq!(profile.top_genres(1).collect::<Vec<_>>(), vec![Genre::Action]);
    }
}
