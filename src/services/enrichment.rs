use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Semaphore;

use crate::{models::MovieDetails, services::providers::MetadataProvider};

/// Parallel metadata enrichment with bounded concurrency
///
/// Each movie is fetched in its own task behind a shared semaphore and a
/// per-fetch timeout. A failed or timed out fetch degrades to placeholder
/// details for that movie only; it never invalidates the rest of the batch
/// or the recommendation result that produced it.
#[derive(Clone)]
pub struct Enricher {
    provider: Arc<dyn MetadataProvider>,
    limit: Arc<Semaphore>,
    timeout: Duration,
}

impl Enricher {
    pub fn new(provider: Arc<dyn MetadataProvider>, concurrency: usize, timeout: Duration) -> Self {
        Self {
            provider,
            limit: Arc::new(Semaphore::new(concurrency.max(1))),
            timeout,
        }
    }

    /// Fetches details for one movie, placeholder on any failure
    pub async fn enrich_one(&self, movie_id: u64) -> MovieDetails {
        let _permit = match self.limit.clone().acquire_owned().await {
            Ok(permit) => permit,
            Err(_) => return MovieDetails::placeholder(movie_id),
        };

        match tokio::time::timeout(self.timeout, self.provider.fetch_details(movie_id)).await {
            Ok(Ok(details)) => details,
            Ok(Err(e)) => {
                tracing::warn!(movie_id, error = %e, "Metadata fetch failed, using placeholder");
                MovieDetails::placeholder(movie_id)
            }
            Err(_) => {
                tracing::warn!(movie_id, timeout = ?self.timeout, "Metadata fetch timed out, using placeholder");
                MovieDetails::placeholder(movie_id)
            }
        }
    }

    /// Fetches details for a batch of movies in parallel
    ///
    /// Output order matches input order regardless of completion order.
    pub async fn enrich_batch(&self, movie_ids: &[u64]) -> Vec<MovieDetails> {
        let mut tasks = Vec::with_capacity(movie_ids.len());

        for &movie_id in movie_ids {
            let enricher = self.clone();
            tasks.push(tokio::spawn(
                async move { enricher.enrich_one(movie_id).await },
            ));
        }

        let mut results = Vec::with_capacity(movie_ids.len());
        for (task, &movie_id) in tasks.into_iter().zip(movie_ids) {
            match task.await {
                Ok(details) => results.push(details),
                Err(e) => {
                    tracing::error!(movie_id, error = %e, "Enrichment task join error");
                    results.push(MovieDetails::placeholder(movie_id));
                }
            }
        }

        results
    }
}
