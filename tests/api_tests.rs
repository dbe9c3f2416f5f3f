use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use axum_test::TestServer;
use chrono::Utc;

use cinematch_api::data::{Catalog, SimilarityMatrix};
use cinematch_api::error::{AppError, AppResult};
use cinematch_api::models::{MovieDetails, MovieEntry, TrendingMovie, PLACEHOLDER_POSTER};
use cinematch_api::routes::{create_router, AppState};
use cinematch_api::services::{Enricher, MetadataProvider, SimilarityIndex};

/// Provider stub with a configurable set of failing movie ids
struct StubProvider {
    failing_ids: HashSet<u64>,
    trending_fails: bool,
}

impl StubProvider {
    fn new() -> Self {
        Self {
            failing_ids: HashSet::new(),
            trending_fails: false,
        }
    }

    fn failing(ids: &[u64]) -> Self {
        Self {
            failing_ids: ids.iter().copied().collect(),
            trending_fails: false,
        }
    }
}

#[async_trait::async_trait]
impl MetadataProvider for StubProvider {
    async fn fetch_details(&self, movie_id: u64) -> AppResult<MovieDetails> {
        if self.failing_ids.contains(&movie_id) {
            return Err(AppError::ExternalApi("provider unreachable".to_string()));
        }
        Ok(MovieDetails {
            movie_id,
            poster_url: format!("https://image.test/{}.jpg", movie_id),
            rating: Some(7.0),
            release_year: Some("2010".to_string()),
            overview: Some("a movie".to_string()),
            genres: vec!["Drama".to_string()],
            runtime_minutes: Some(100),
            trailer_url: Some("https://www.youtube.com/embed/abc".to_string()),
            cached_at: Utc::now(),
        })
    }

    async fn fetch_trending(&self) -> AppResult<Vec<TrendingMovie>> {
        if self.trending_fails {
            return Err(AppError::ExternalApi("provider unreachable".to_string()));
        }
        Ok(vec![TrendingMovie {
            id: 999,
            title: "Trending Now".to_string(),
            poster_path: Some("/t.jpg".to_string()),
            vote_average: Some(8.1),
            release_date: Some("2026-01-01".to_string()),
            overview: None,
        }])
    }

    fn name(&self) -> &'static str {
        "stub"
    }
}

fn fixture_catalog() -> Catalog {
    Catalog::new(vec![
        MovieEntry {
            movie_id: 10,
            title: "A".to_string(),
            year: Some(1999),
            genres: Some(vec!["Drama".to_string()]),
            rating: Some(8.0),
        },
        MovieEntry {
            movie_id: 20,
            title: "B".to_string(),
            year: Some(2005),
            genres: Some(vec!["Comedy".to_string()]),
            rating: Some(6.5),
        },
        MovieEntry {
            movie_id: 30,
            title: "C".to_string(),
            year: Some(2012),
            genres: Some(vec!["Drama".to_string(), "Thriller".to_string()]),
            rating: Some(7.2),
        },
        MovieEntry {
            movie_id: 40,
            title: "D".to_string(),
            year: Some(2020),
            genres: None,
            rating: None,
        },
    ])
}

fn fixture_matrix() -> SimilarityMatrix {
    SimilarityMatrix::new(vec![
        vec![1.0, 0.9, 0.2, 0.5],
        vec![0.9, 1.0, 0.4, 0.3],
        vec![0.2, 0.4, 1.0, 0.6],
        vec![0.5, 0.3, 0.6, 1.0],
    ])
    .unwrap()
}

fn create_test_server_with(provider: StubProvider) -> TestServer {
    let index = Arc::new(SimilarityIndex::new(fixture_catalog(), fixture_matrix()).unwrap());
    let provider: Arc<dyn MetadataProvider> = Arc::new(provider);
    let enricher = Enricher::new(provider.clone(), 4, Duration::from_secs(1));

    let state = Arc::new(AppState {
        index,
        enricher,
        provider,
    });

    TestServer::new(create_router(state)).unwrap()
}

fn create_test_server() -> TestServer {
    create_test_server_with(StubProvider::new())
}

#[tokio::test]
async fn test_health_check() {
    let server = create_test_server();
    let response = server.get("/health").await;
    response.assert_status_ok();
}

#[tokio::test]
async fn test_recommendations_top_two() {
    let server = create_test_server();

    let response = server
        .get("/api/v1/recommendations")
        .add_query_param("title", "A")
        .add_query_param("k", "2")
        .await;
    response.assert_status_ok();

    let body: serde_json::Value = response.json();
    assert_eq!(body["query"]["title"], "A");

    let results = body["results"].as_array().unwrap();
    assert_eq!(results.len(), 2);
    assert_eq!(results[0]["title"], "B");
    assert_eq!(results[0]["score"], 0.9);
    assert_eq!(results[1]["title"], "D");
    assert_eq!(results[1]["score"], 0.5);
}

#[tokio::test]
async fn test_recommendations_default_k_excludes_query() {
    let server = create_test_server();

    let response = server
        .get("/api/v1/recommendations")
        .add_query_param("title", "A")
        .await;
    response.assert_status_ok();

    let body: serde_json::Value = response.json();
    let results = body["results"].as_array().unwrap();
    // Default k is 5, but only 3 other movies exist and the query is excluded
    assert_eq!(results.len(), 3);
    for result in results {
        assert_ne!(result["title"], "A");
    }
}

#[tokio::test]
async fn test_recommendations_enriched_details() {
    let server = create_test_server();

    let response = server
        .get("/api/v1/recommendations")
        .add_query_param("title", "A")
        .add_query_param("k", "1")
        .await;
    response.assert_status_ok();

    let body: serde_json::Value = response.json();
    assert_eq!(
        body["results"][0]["details"]["poster_url"],
        "https://image.test/20.jpg"
    );
    assert_eq!(body["query"]["details"]["poster_url"], "https://image.test/10.jpg");
}

#[tokio::test]
async fn test_recommendations_unknown_title() {
    let server = create_test_server();

    let response = server
        .get("/api/v1/recommendations")
        .add_query_param("title", "does-not-exist")
        .await;
    response.assert_status(axum::http::StatusCode::NOT_FOUND);

    let body: serde_json::Value = response.json();
    assert!(body["error"].as_str().unwrap().contains("does-not-exist"));
}

#[tokio::test]
async fn test_recommendations_invalid_input() {
    let server = create_test_server();

    let response = server
        .get("/api/v1/recommendations")
        .add_query_param("title", "  ")
        .await;
    response.assert_status(axum::http::StatusCode::BAD_REQUEST);

    let response = server
        .get("/api/v1/recommendations")
        .add_query_param("title", "A")
        .add_query_param("k", "0")
        .await;
    response.assert_status(axum::http::StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_recommendations_provider_failure_degrades_to_placeholder() {
    // Provider fails for movie 20 (title B) only
    let server = create_test_server_with(StubProvider::failing(&[20]));

    let response = server
        .get("/api/v1/recommendations")
        .add_query_param("title", "A")
        .add_query_param("k", "2")
        .await;
    response.assert_status_ok();

    let body: serde_json::Value = response.json();
    let results = body["results"].as_array().unwrap();

    // The lookup result is unaffected, only B's details degrade
    assert_eq!(results[0]["title"], "B");
    assert_eq!(results[0]["details"]["poster_url"], PLACEHOLDER_POSTER);
    assert_eq!(results[1]["title"], "D");
    assert_eq!(
        results[1]["details"]["poster_url"],
        "https://image.test/40.jpg"
    );
}

#[tokio::test]
async fn test_movies_listing_and_filters() {
    let server = create_test_server();

    let response = server.get("/api/v1/movies").await;
    response.assert_status_ok();
    let all: Vec<serde_json::Value> = response.json();
    assert_eq!(all.len(), 4);

    let response = server
        .get("/api/v1/movies")
        .add_query_param("genre", "drama")
        .await;
    let drama: Vec<serde_json::Value> = response.json();
    // A and C are Drama; D has no genre data and passes through
    let titles: Vec<&str> = drama.iter().map(|m| m["title"].as_str().unwrap()).collect();
    assert_eq!(titles, vec!["A", "C", "D"]);

    let response = server
        .get("/api/v1/movies")
        .add_query_param("year_min", "2000")
        .add_query_param("year_max", "2015")
        .add_query_param("rating_min", "7.0")
        .await;
    let filtered: Vec<serde_json::Value> = response.json();
    let titles: Vec<&str> = filtered
        .iter()
        .map(|m| m["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["C"]);
}

#[tokio::test]
async fn test_movie_search() {
    let server = create_test_server();

    let response = server
        .get("/api/v1/movies/search")
        .add_query_param("q", "b")
        .await;
    response.assert_status_ok();
    let hits: Vec<serde_json::Value> = response.json();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0]["title"], "B");

    let response = server
        .get("/api/v1/movies/search")
        .add_query_param("q", " ")
        .await;
    response.assert_status(axum::http::StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_movie_by_id() {
    let server = create_test_server();

    let response = server.get("/api/v1/movies/30").await;
    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["title"], "C");
    assert_eq!(body["details"]["poster_url"], "https://image.test/30.jpg");

    let response = server.get("/api/v1/movies/12345").await;
    response.assert_status(axum::http::StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_trending() {
    let server = create_test_server();

    let response = server.get("/api/v1/trending").await;
    response.assert_status_ok();
    let trending: Vec<serde_json::Value> = response.json();
    assert_eq!(trending.len(), 1);
    assert_eq!(trending[0]["title"], "Trending Now");
}

#[tokio::test]
async fn test_trending_provider_failure_returns_empty_list() {
    let mut provider = StubProvider::new();
    provider.trending_fails = true;
    let server = create_test_server_with(provider);

    let response = server.get("/api/v1/trending").await;
    response.assert_status_ok();
    let trending: Vec<serde_json::Value> = response.json();
    assert!(trending.is_empty());
}

#[tokio::test]
async fn test_request_id_header_echoed() {
    let server = create_test_server();
    let response = server.get("/health").await;
    assert!(response.headers().contains_key("x-request-id"));
}
