//! End-to-end tests for the session driver.

use std::sync::Arc;

use anyhow::{Result, anyhow};
use async_trait::async_trait;
use catalog::{Genre, Movie, MovieId};
use query_engine::Query;
use serde_json::json;
use session::{
    Action, CatalogSource, Effect, LiveSource, MockSource, Session, Stars, View, fetch_home,
};
use tmdb_client::{TimeWindow, TmdbClient, TmdbConfig};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn mock_session() -> Session {
    let source = MockSource::with_default_fixtures().unwrap();
    Session::new(Arc::new(source))
}

fn ids(movies: &[Movie]) -> Vec<MovieId> {
    movies.iter().map(|m| m.id).collect()
}

/// Mock source whose trending list always fails.
struct BrokenTrending(MockSource);

#[async_trait]
impl CatalogSource for BrokenTrending {
    fn name(&self) -> &str {
        "broken-trending"
    }

    async fn recommended(&self, limit: usize) -> Result<Vec<Movie>> {
        self.0.recommended(limit).await
    }

    async fn trending(&self, _limit: usize) -> Result<Vec<Movie>> {
        Err(anyhow!("connection reset"))
    }

    async fn search(&self, query: &Query) -> Result<Vec<Movie>> {
        self.0.search(query).await
    }

    async fn details(&self, id: MovieId) -> Result<Option<Movie>> {
        self.0.details(id).await
    }

    async fn similar(&self, id: MovieId) -> Result<Vec<Movie>> {
        self.0.similar(id).await
    }

    async fn resolve(&self, ids: &[MovieId]) -> Result<Vec<Movie>> {
        self.0.resolve(ids).await
    }
}

#[tokio::test]
async fn test_landing_on_home_loads_feed() {
    let mut session = mock_session().with_home_limit(5);
    session.navigate(View::Home).await;

    let feed = session.state().home.clone().unwrap();
    assert_eq!(feed.recommended.len(), 5);
    assert_eq!(feed.trending.len(), 5);
    assert_eq!(feed.recommended[0].title, "The Shawshank Redemption");
    assert_eq!(feed.trending[0].title, "Avengers: Endgame");
    assert!(!session.state().is_loading(View::Home));
}

#[tokio::test]
async fn test_landing_on_browse_runs_default_query() {
    let mut session = mock_session();
    session.navigate(View::Browse).await;

    let results = session.state().browse.results.clone().unwrap();
    assert_eq!(results.len(), 20);
}

#[tokio::test]
async fn test_browse_by_genre() {
    let mut session = mock_session();
    let results = session.browse(Query::new().with_genre(Genre::Comedy)).await;
    assert_eq!(ids(&results), vec![11, 19]);
}

#[tokio::test]
async fn test_one_failing_home_list_keeps_the_other() {
    let source = BrokenTrending(MockSource::with_default_fixtures().unwrap());
    let feed = fetch_home(&source, 4).await;

    assert_eq!(feed.recommended.len(), 4);
    assert!(feed.trending.is_empty());
}

#[tokio::test]
async fn test_out_of_order_completion_keeps_latest_query() {
    let mut session = mock_session();

    let first = session
        .dispatch(Action::SetQuery(Query::new().with_text("incep")))
        .unwrap();
    let second = session
        .dispatch(Action::SetQuery(Query::new().with_genre(Genre::Music)))
        .unwrap();
    assert!(matches!(first, Effect::RunQuery { .. }));

    let second_done = session.run_effect(second).await;
    let first_done = session.run_effect(first).await;

    session.dispatch(second_done);
    session.dispatch(first_done);

    let results = session.state().browse.results.clone().unwrap();
    assert_eq!(ids(&results), vec![14]);
}

#[tokio::test]
async fn test_profile_from_ratings_and_watchlist() {
    let mut session = mock_session();
    session.rate(6, Stars::new(5).unwrap());
    session.rate(7, Stars::new(4).unwrap());
    session.add_to_watchlist(19);
    session.add_to_watchlist(9);
    session.toggle_watchlist(404);

    let profile = session.profile().await.unwrap();
    assert_eq!(profile.rated_count, 2);
    // unknown ids are skipped, order follows the catalog
    assert_eq!(ids(&profile.watchlist), vec![9, 19]);
    assert_eq!(
        profile.top_genres(1).collect::<Vec<_>>(),
        vec![Genre::ScienceFiction]
    );
}

#[tokio::test]
async fn test_live_home_with_failing_endpoint() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/movie/top_rated"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/trending/movie/week"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "page": 1,
            "results": [
                {"id": 1, "title": "First", "genre_ids": [28], "popularity": 10.0},
                {"id": 2, "title": "Second", "genre_ids": [], "popularity": 5.0}
            ],
            "total_pages": 1,
            "total_results": 2
        })))
        .mount(&server)
        .await;

    let client = TmdbClient::new(TmdbConfig::new("key", server.uri())).unwrap();
    let mut session = Session::new(Arc::new(LiveSource::new(client)));

    let feed = session.home().await;
    assert!(feed.recommended.is_empty());
    assert_eq!(ids(&feed.trending), vec![1, 2]);
}

#[tokio::test]
async fn test_live_trending_uses_selected_window() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/trending/movie/day"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "page": 1,
            "results": [{"id": 7, "title": "Today", "genre_ids": [18], "popularity": 3.0}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/trending/movie/week"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"results": []})))
        .expect(0)
        .mount(&server)
        .await;

    let client = TmdbClient::new(TmdbConfig::new("key", server.uri())).unwrap();
    let source = LiveSource::new(client).with_window(TimeWindow::Day);

    let trending = source.trending(5).await.unwrap();
    assert_eq!(ids(&trending), vec![7]);
}
