/// TMDB metadata provider
///
/// Fetches display metadata for catalog movies from The Movie Database.
///
/// API Flow:
/// 1. Details: /movie/{id} → poster path, rating, overview, genres, runtime
/// 2. Trailer: /movie/{id}/videos → first YouTube video of type "trailer"
/// 3. Trending: /trending/movie/week → this week's top movies
///
/// All responses are memoized in the process-lifetime cache, keyed by movie
/// identifier, since the catalog never changes within a run.
use crate::{
    cache::{Cache, CacheKey},
    cached,
    error::{AppError, AppResult},
    models::{MovieDetails, TmdbMovie, TmdbTrendingResponse, TmdbVideosResponse, TrendingMovie},
    services::providers::MetadataProvider,
};
use reqwest::Client as HttpClient;

/// TMDB id used for the startup connectivity probe (Fight Club)
const PROBE_MOVIE_ID: u64 = 550;

#[derive(Clone)]
pub struct TmdbProvider {
    http_client: HttpClient,
    api_key: String,
    api_url: String,
    image_url: String,
    cache: Cache,
}

impl TmdbProvider {
    pub fn new(cache: Cache, api_key: String, api_url: String, image_url: String) -> Self {
        Self {
            http_client: HttpClient::new(),
            api_key,
            api_url,
            image_url,
            cache,
        }
    }

    /// Checks that the TMDB API is reachable with the configured key
    ///
    /// Failure is reported to the caller for logging; the service still
    /// starts, recommendations degrade to placeholder metadata.
    pub async fn probe(&self) -> AppResult<()> {
        let url = format!("{}/movie/{}", self.api_url, PROBE_MOVIE_ID);

        let response = self
            .http_client
            .get(&url)
            .query(&[("api_key", self.api_key.as_str())])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(AppError::ExternalApi(format!(
                "TMDB probe returned status {}",
                response.status()
            )));
        }

        Ok(())
    }

    async fn get_movie(&self, movie_id: u64) -> AppResult<TmdbMovie> {
        let url = format!("{}/movie/{}", self.api_url, movie_id);

        let response = self
            .http_client
            .get(&url)
            .query(&[("api_key", self.api_key.as_str())])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalApi(format!(
                "TMDB API returned status {}: {}",
                status, body
            )));
        }

        Ok(response.json().await?)
    }

    async fn get_trailer(&self, movie_id: u64) -> AppResult<Option<String>> {
        cached!(self.cache, CacheKey::Trailer(movie_id), async move {
            let url = format!("{}/movie/{}/videos", self.api_url, movie_id);

            let response = self
                .http_client
                .get(&url)
                .query(&[("api_key", self.api_key.as_str())])
                .send()
                .await?;

            if !response.status().is_success() {
                let status = response.status();
                let body = response.text().await.unwrap_or_default();
                return Err(AppError::ExternalApi(format!(
                    "TMDB API returned status {}: {}",
                    status, body
                )));
            }

            let videos: TmdbVideosResponse = response.json().await?;
            Ok(select_trailer(&videos))
        })
    }
}

/// Picks the embed URL of the first YouTube trailer, `None` if there is none
fn select_trailer(videos: &TmdbVideosResponse) -> Option<String> {
    videos
        .results
        .iter()
        .find(|v| v.site == "YouTube" && v.video_type.eq_ignore_ascii_case("trailer"))
        .map(|v| format!("https://www.youtube.com/embed/{}", v.key))
}

#[async_trait::async_trait]
impl MetadataProvider for TmdbProvider {
    async fn fetch_details(&self, movie_id: u64) -> AppResult<MovieDetails> {
        cached!(self.cache, CacheKey::Details(movie_id), async move {
            let movie = self.get_movie(movie_id).await?;

            // A missing trailer is not an error; only log it
            let trailer = match self.get_trailer(movie_id).await {
                Ok(trailer) => trailer,
                Err(e) => {
                    tracing::warn!(movie_id, error = %e, "Trailer fetch failed");
                    None
                }
            };

            let details = movie.into_details(&self.image_url, trailer);

            tracing::info!(
                movie_id,
                has_trailer = details.trailer_url.is_some(),
                provider = "tmdb",
                "Details fetched"
            );

            Ok::<_, AppError>(details)
        })
    }

    async fn fetch_trending(&self) -> AppResult<Vec<TrendingMovie>> {
        cached!(self.cache, CacheKey::Trending, async move {
            let url = format!("{}/trending/movie/week", self.api_url);

            let response = self
                .http_client
                .get(&url)
                .query(&[("api_key", self.api_key.as_str())])
                .send()
                .await?;

            if !response.status().is_success() {
                let status = response.status();
                let body = response.text().await.unwrap_or_default();
                return Err(AppError::ExternalApi(format!(
                    "TMDB API returned status {}: {}",
                    status, body
                )));
            }

            let trending: TmdbTrendingResponse = response.json().await?;
            let movies: Vec<TrendingMovie> = trending.results.into_iter().take(5).collect();

            tracing::info!(results = movies.len(), provider = "tmdb", "Trending fetched");

            Ok(movies)
        })
    }

    fn name(&self) -> &'static str {
        "tmdb"
    }
}
