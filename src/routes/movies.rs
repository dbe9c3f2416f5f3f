use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::{
    error::{AppError, AppResult},
    models::{MovieDetails, MovieEntry},
    routes::AppState,
};

/// Catalog listing filters, mirroring the year/genre/rating search options
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub year_min: Option<i32>,
    pub year_max: Option<i32>,
    pub genre: Option<String>,
    pub rating_min: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    q: String,
}

#[derive(Debug, Serialize)]
pub struct MovieResponse {
    #[serde(flatten)]
    pub entry: MovieEntry,
    pub details: MovieDetails,
}

/// Applies optional year/genre/rating filters to a catalog entry
///
/// Entries missing the filtered field pass through, matching the original
/// behavior of only filtering when the column is present.
fn matches_filters(entry: &MovieEntry, query: &ListQuery) -> bool {
    if let (Some(min), Some(year)) = (query.year_min, entry.year) {
        if year < min {
            return false;
        }
    }
    if let (Some(max), Some(year)) = (query.year_max, entry.year) {
        if year > max {
            return false;
        }
    }
    if let (Some(wanted), Some(genres)) = (query.genre.as_deref(), entry.genres.as_deref()) {
        if !genres.iter().any(|g| g.eq_ignore_ascii_case(wanted)) {
            return false;
        }
    }
    if let (Some(min), Some(rating)) = (query.rating_min, entry.rating) {
        if rating < min {
            return false;
        }
    }
    true
}

/// Handler for the filtered catalog listing
pub async fn list(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListQuery>,
) -> Json<Vec<MovieEntry>> {
    let movies: Vec<MovieEntry> = state
        .index
        .catalog()
        .entries()
        .iter()
        .filter(|e| matches_filters(e, &query))
        .cloned()
        .collect();

    Json(movies)
}

/// Handler for case-insensitive substring title search
pub async fn search(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchQuery>,
) -> AppResult<Json<Vec<MovieEntry>>> {
    let needle = params.q.trim().to_lowercase();
    if needle.is_empty() {
        return Err(AppError::InvalidInput(
            "Search query cannot be empty".to_string(),
        ));
    }

    let movies: Vec<MovieEntry> = state
        .index
        .catalog()
        .entries()
        .iter()
        .filter(|e| e.title.to_lowercase().contains(&needle))
        .cloned()
        .collect();

    Ok(Json(movies))
}

/// Handler for a single catalog entry with enriched details
pub async fn get_by_id(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u64>,
) -> AppResult<Json<MovieResponse>> {
    let index = state.index.resolve_id(id)?;
    let entry = state
        .index
        .catalog()
        .get(index)
        .cloned()
        .ok_or_else(|| AppError::Internal(format!("catalog row {} vanished", index)))?;

    let details = state.enricher.enrich_one(id).await;

    Ok(Json(MovieResponse { entry, details }))
}
