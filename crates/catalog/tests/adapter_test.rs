//! Integration tests for the adapter over whole TMDB pages.

use catalog::{Adapter, Catalog, Genre, ImageConfig, RawMovie, RawPage};

fn tmdb_page() -> RawPage<RawMovie> {
    let json = r#"{
        "page": 1,
        "total_pages": 1,
        "total_results": 4,
        "results": [
            {
                "id": 27205, "title": "Inception", "overview": "Dreams within dreams.",
                "poster_path": "/inception.jpg", "backdrop_path": "/inception-bg.jpg",
                "release_date": "2010-07-15", "vote_average": 8.4, "vote_count": 35000,
                "popularity": 120.5, "genre_ids": [28, 878, 12], "adult": false
            },
            {
                "id": 603, "title": "The Matrix", "overview": "",
                "poster_path": null, "backdrop_path": null,
                "release_date": "1999-03-30", "vote_average": 8.2, "vote_count": 25000,
                "popularity": 80.1, "genre_ids": [28, 99999], "adult": false
            },
            {
                "id": 11, "title": "Untitled Project", "release_date": "",
                "genre_ids": [], "vote_average": 0.0
            },
            {
                "id": 603, "title": "The Matrix (duplicate)", "genre_ids": [28]
            }
        ]
    }"#;
    serde_json::from_str(json).unwrap()
}

#[test]
fn test_page_adaptation_end_to_end() {
    let adapter = Adapter::new(ImageConfig::new("https://image.tmdb.org/t/p"));
    let movies = adapter.adapt_page(tmdb_page());
    assert_eq!(movies.len(), 4);

    let inception = &movies[0];
    assert_eq!(inception.year, Some(2010));
    assert_eq!(
        inception.genres,
        vec![Genre::Action, Genre::ScienceFiction, Genre::Adventure]
    );
    assert_eq!(
        inception.backdrop_url.as_deref(),
        Some("https://image.tmdb.org/t/p/w1280/inception-bg.jpg")
    );

    let matrix = &movies[1];
    // one unknown code dropped
    assert_eq!(matrix.genres, vec![Genre::Action]);
    assert_eq!(matrix.poster_url, None);
    assert_eq!(matrix.overview, None);

    let untitled = &movies[2];
    assert_eq!(untitled.year, None);
    assert!(untitled.genres.is_empty());
}

#[test]
fn test_catalog_from_page_keeps_first_duplicate() {
    let adapter = Adapter::default();
    let catalog = Catalog::from_movies(adapter.adapt_page(tmdb_page()));

    assert_eq!(catalog.len(), 3);
    assert_eq!(catalog.get_movie(603).unwrap().title, "The Matrix");
}

#[test]
fn test_genre_count_drops_exactly_unknown_codes() {
    let adapter = Adapter::default();
    let codes = vec![28, 1, 35, 2, 18, 3];
    let unknown = codes.iter().filter(|&&c| Genre::from_code(c).is_none()).count();

    let record = RawMovie {
        id: Some(1),
        title: Some("Codes".to_string()),
        genre_ids: codes.clone(),
        ..RawMovie::default()
    };

    let movie = adapter.adapt(record).unwrap();
    assert_eq!(movie.genres.len(), codes.len() - unknown);
}
