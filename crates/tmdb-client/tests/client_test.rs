//! HTTP-level tests for the TMDB client against a mock server.

use catalog::Genre;
use query_engine::{Query, SortKey};
use serde_json::{Value, json};
use tmdb_client::{DiscoverOptions, TimeWindow, TmdbClient, TmdbConfig, TmdbError};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const IMAGES: &str = "https://img.example.org/t/p";

fn client_for(server: &MockServer) -> TmdbClient {
    let config = TmdbConfig::new("test-key", server.uri()).with_image_base_url(IMAGES);
    TmdbClient::new(config).unwrap()
}

fn page(results: Value) -> Value {
    json!({
        "page": 1,
        "results": results,
        "total_pages": 1,
        "total_results": 3
    })
}

fn search_results() -> Value {
    page(json!([
        {
            "id": 27205,
            "title": "Inception",
            "overview": "A thief who steals corporate secrets.",
            "poster_path": "/inception.jpg",
            "backdrop_path": "/inception-bg.jpg",
            "release_date": "2010-07-15",
            "vote_average": 8.4,
            "vote_count": 35000,
            "popularity": 90.5,
            "genre_ids": [28, 878, 12],
            "adult": false
        },
        {
            "id": 64956,
            "title": "Inception: The Cobol Job",
            "overview": "",
            "poster_path": null,
            "backdrop_path": null,
            "release_date": "",
            "vote_average": 7.2,
            "vote_count": 300,
            "popularity": 5.1,
            "genre_ids": [16, 99999],
            "adult": false
        },
        {
            "id": 613092,
            "title": "El final del Inception",
            "overview": "Commentary.",
            "poster_path": null,
            "backdrop_path": null,
            "release_date": "2016-01-01",
            "vote_average": 9.0,
            "vote_count": 2,
            "popularity": 0.6,
            "genre_ids": [28],
            "adult": false
        }
    ]))
}

#[tokio::test]
async fn test_popular_sends_standard_params_and_adapts() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/movie/popular"))
        .and(query_param("api_key", "test-key"))
        .and(query_param("language", "en-US"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(search_results()))
        .expect(1)
        .mount(&server)
        .await;

    let movies = client_for(&server).popular(2).await;
    assert_eq!(movies.len(), 3);

    let inception = &movies[0];
    assert_eq!(inception.id, 27205);
    assert_eq!(inception.year, Some(2010));
    assert_eq!(
        inception.genres,
        vec![Genre::Action, Genre::ScienceFiction, Genre::Adventure]
    );
    assert_eq!(
        inception.poster_url.as_deref(),
        Some("https://img.example.org/t/p/w342/inception.jpg")
    );
    assert_eq!(
        inception.backdrop_url.as_deref(),
        Some("https://img.example.org/t/p/w1280/inception-bg.jpg")
    );

    let short = &movies[1];
    assert_eq!(short.year, None);
    assert_eq!(short.genres, vec![Genre::Animation]);
    assert_eq!(short.poster_url, None);
    assert_eq!(short.overview, None);
}

#[tokio::test]
async fn test_trending_uses_window_in_path() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/trending/movie/week"))
        .respond_with(ResponseTemplate::new(200).set_body_json(search_results()))
        .expect(1)
        .mount(&server)
        .await;

    let movies = client_for(&server).trending(TimeWindow::Week).await;
    assert_eq!(movies.len(), 3);
}

#[tokio::test]
async fn test_blank_search_sends_no_request() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search/movie"))
        .respond_with(ResponseTemplate::new(200).set_body_json(search_results()))
        .expect(0)
        .mount(&server)
        .await;

    let client = client_for(&server);
    assert!(client.search("", 1).await.is_empty());
    assert!(client.search("   ", 1).await.is_empty());
}

#[tokio::test]
async fn test_discover_sends_genres_and_sort() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/discover/movie"))
        .and(query_param("with_genres", "35,18"))
        .and(query_param("sort_by", "vote_average.desc"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(json!([]))))
        .expect(1)
        .mount(&server)
        .await;

    let options = DiscoverOptions {
        genres: vec![Genre::Comedy, Genre::Drama],
        sort: Some(SortKey::Rating),
        page: 1,
    };
    assert!(client_for(&server).try_discover(&options).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_server_error_degrades_to_empty() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/movie/top_rated"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = client_for(&server);
    assert!(client.top_rated(1).await.is_empty());

    let err = client.try_top_rated(1).await.unwrap_err();
    assert!(matches!(err, TmdbError::Status { status, .. } if status.as_u16() == 500));
}

#[tokio::test]
async fn test_malformed_body_degrades_to_empty() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/movie/upcoming"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let client = client_for(&server);
    assert!(client.upcoming(1).await.is_empty());
    assert!(matches!(
        client.try_upcoming(1).await,
        Err(TmdbError::Decode { .. })
    ));
}

#[tokio::test]
async fn test_unreachable_server_degrades_to_empty() {
    // Bind then release a port so nothing is listening on it.
    let addr = std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap();
    let config = TmdbConfig::new("test-key", format!("http://{}", addr));
    let client = TmdbClient::new(config).unwrap();

    assert!(client.popular(1).await.is_empty());
    assert!(client.details(27205).await.is_none());
    assert!(matches!(
        client.try_popular(1).await,
        Err(TmdbError::Network { endpoint, .. }) if endpoint == "/movie/popular"
    ));
}

#[tokio::test]
async fn test_details_adapts_detail_record() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/movie/27205"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 27205,
            "title": "Inception",
            "overview": "Dreams within dreams.",
            "poster_path": "/inception.jpg",
            "backdrop_path": null,
            "release_date": "2010-07-15",
            "vote_average": 8.4,
            "vote_count": 35000,
            "popularity": 90.5,
            "runtime": 148,
            "genres": [
                {"id": 28, "name": "Action"},
                {"id": 878, "name": "Science Fiction"}
            ]
        })))
        .mount(&server)
        .await;

    let movie = client_for(&server).details(27205).await.unwrap();
    assert_eq!(movie.runtime, Some(148));
    assert_eq!(movie.genres, vec![Genre::Action, Genre::ScienceFiction]);
    assert_eq!(
        movie.poster_url.as_deref(),
        Some("https://img.example.org/t/p/w500/inception.jpg")
    );
    assert_eq!(movie.backdrop_url, None);
}

#[tokio::test]
async fn test_details_not_found_is_none() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/movie/1"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    assert!(client_for(&server).details(1).await.is_none());
}

#[tokio::test]
async fn test_similar_requests_first_page() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/movie/27205/similar"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(search_results()))
        .expect(1)
        .mount(&server)
        .await;

    assert_eq!(client_for(&server).similar(27205).await.len(), 3);
}

#[tokio::test]
async fn test_missing_key_sends_no_request() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(search_results()))
        .expect(0)
        .mount(&server)
        .await;

    let config = TmdbConfig {
        base_url: Some(server.uri()),
        ..TmdbConfig::default()
    };
    let client = TmdbClient::new(config).unwrap();

    assert!(client.now_playing(1).await.is_empty());
    assert!(matches!(
        client.try_now_playing(1).await,
        Err(TmdbError::MissingConfig("TMDB_API_KEY"))
    ));
}

#[tokio::test]
async fn test_search_and_filter_applies_genres_and_sort_locally() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search/movie"))
        .and(query_param("query", "inception"))
        .respond_with(ResponseTemplate::new(200).set_body_json(search_results()))
        .expect(1)
        .mount(&server)
        .await;

    let query = Query::new()
        .with_text("inception")
        .with_genre(Genre::Action)
        .sorted_by(SortKey::Rating);
    let movies = client_for(&server).search_and_filter(&query).await;

    let ids: Vec<_> = movies.iter().map(|m| m.id).collect();
    assert_eq!(ids, vec![613092, 27205]);
}

#[tokio::test]
async fn test_search_and_filter_without_text_discovers() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/discover/movie"))
        .and(query_param("sort_by", "popularity.desc"))
        .and(query_param("with_genres", "27"))
        .respond_with(ResponseTemplate::new(200).set_body_json(search_results()))
        .expect(1)
        .mount(&server)
        .await;

    let query = Query::new().with_genre(Genre::Horror);
    let movies = client_for(&server).search_and_filter(&query).await;
    // discover results are returned as the server ordered them
    assert_eq!(movies.len(), 3);
    assert_eq!(movies[0].id, 27205);
}
