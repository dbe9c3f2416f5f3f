use axum::{
    extract::{Query, State},
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::{
    error::{AppError, AppResult},
    middleware::request_id::RequestId,
    models::{MovieDetails, MovieEntry},
    routes::AppState,
    services::similarity::DEFAULT_K,
};

#[derive(Debug, Deserialize)]
pub struct RecommendationQuery {
    pub title: String,
    pub k: Option<usize>,
}

/// One recommended movie with its similarity score and display metadata
#[derive(Debug, Serialize)]
pub struct RecommendedMovie {
    #[serde(flatten)]
    pub entry: MovieEntry,
    pub score: f64,
    pub details: MovieDetails,
}

#[derive(Debug, Serialize)]
pub struct RecommendationResponse {
    /// The resolved query movie, enriched like the results
    pub query: QueryMovie,
    pub results: Vec<RecommendedMovie>,
}

#[derive(Debug, Serialize)]
pub struct QueryMovie {
    #[serde(flatten)]
    pub entry: MovieEntry,
    pub details: MovieDetails,
}

/// Handler for the recommendations endpoint
///
/// The similarity lookup is authoritative: enrichment failures degrade to
/// placeholder details without affecting the result list.
pub async fn recommend(
    State(state): State<Arc<AppState>>,
    Extension(request_id): Extension<RequestId>,
    Query(params): Query<RecommendationQuery>,
) -> AppResult<Json<RecommendationResponse>> {
    let title = params.title.trim();
    if title.is_empty() {
        return Err(AppError::InvalidInput(
            "Query title cannot be empty".to_string(),
        ));
    }

    let k = params.k.unwrap_or(DEFAULT_K);
    if k == 0 {
        return Err(AppError::InvalidInput(
            "k must be at least 1".to_string(),
        ));
    }

    tracing::info!(request_id = %request_id, title = %title, k, "Processing recommendation request");

    let query_index = state.index.resolve_index(title)?;
    let recommendations = state.index.recommend(title, k)?;

    let query_entry = state
        .index
        .catalog()
        .get(query_index)
        .cloned()
        .ok_or_else(|| AppError::Internal(format!("catalog row {} vanished", query_index)))?;

    // Enrich the query movie and the results in one bounded-parallel batch
    let mut ids: Vec<u64> = Vec::with_capacity(recommendations.len() + 1);
    ids.push(query_entry.movie_id);
    ids.extend(recommendations.iter().map(|r| r.entry.movie_id));

    let mut details = state.enricher.enrich_batch(&ids).await;
    let query_details = details.remove(0);

    let results: Vec<RecommendedMovie> = recommendations
        .into_iter()
        .zip(details)
        .map(|(rec, details)| RecommendedMovie {
            entry: rec.entry,
            score: rec.score,
            details,
        })
        .collect();

    tracing::info!(
        request_id = %request_id,
        results = results.len(),
        "Recommendation completed"
    );

    Ok(Json(RecommendationResponse {
        query: QueryMovie {
            entry: query_entry,
            details: query_details,
        },
        results,
    }))
}
