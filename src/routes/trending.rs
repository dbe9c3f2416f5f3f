use axum::{extract::State, Json};
use std::sync::Arc;

use crate::{models::TrendingMovie, routes::AppState};

/// Handler for this week's trending movies
///
/// Pure provider pass-through; an unreachable provider degrades to an empty
/// list rather than an error so the landing view still renders.
pub async fn trending(State(state): State<Arc<AppState>>) -> Json<Vec<TrendingMovie>> {
    match state.provider.fetch_trending().await {
        Ok(movies) => Json(movies),
        Err(e) => {
            tracing::warn!(error = %e, "Trending fetch failed");
            Json(Vec::new())
        }
    }
}
