use std::sync::Arc;

use axum::{
    http::StatusCode,
    middleware,
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    middleware::request_id::{make_span_with_request_id, request_id_middleware},
    services::{Enricher, MetadataProvider, SimilarityIndex},
};

pub mod movies;
pub mod recommendations;
pub mod trending;

/// Shared application state
///
/// The similarity index is read-only after startup, so handlers share it
/// without locking.
pub struct AppState {
    pub index: Arc<SimilarityIndex>,
    pub enricher: Enricher,
    pub provider: Arc<dyn MetadataProvider>,
}

/// Creates the application router with all routes
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .nest("/api/v1", api_routes(state))
        .layer(TraceLayer::new_for_http().make_span_with(make_span_with_request_id))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(CorsLayer::permissive())
}

/// API routes under /api/v1
fn api_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/movies", get(movies::list))
        .route("/movies/search", get(movies::search))
        .route("/movies/:id", get(movies::get_by_id))
        .route("/recommendations", get(recommendations::recommend))
        .route("/trending", get(trending::trending))
        .with_state(state)
}

/// Health check endpoint
async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}
