/// Metadata provider abstraction
///
/// This module provides a pluggable architecture for movie metadata sources.
/// The similarity lookup only produces catalog entries; providers supply the
/// display metadata (poster, rating, overview, trailer) keyed by the numeric
/// movie identifier. Recommendations must never depend on provider
/// availability.
use crate::{
    error::AppResult,
    models::{MovieDetails, TrendingMovie},
};

pub mod tmdb;

pub use tmdb::TmdbProvider;

/// Trait for movie metadata providers
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait MetadataProvider: Send + Sync {
    /// Fetch display metadata for a movie, trailer included
    async fn fetch_details(&self, movie_id: u64) -> AppResult<MovieDetails>;

    /// Fetch this week's trending movies
    async fn fetch_trending(&self) -> AppResult<Vec<TrendingMovie>>;

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}
