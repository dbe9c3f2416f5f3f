use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Placeholder poster shown when TMDB has no image or the fetch failed
pub const PLACEHOLDER_POSTER: &str = "https://via.placeholder.com/500x750?text=Poster+Not+Available";

/// Display metadata for a single movie, fetched from the metadata provider
///
/// Every field degrades to a placeholder when the provider is unreachable, so
/// an enrichment failure never invalidates a recommendation result.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MovieDetails {
    pub movie_id: u64,
    pub poster_url: String,
    pub rating: Option<f64>,
    pub release_year: Option<String>,
    pub overview: Option<String>,
    pub genres: Vec<String>,
    pub runtime_minutes: Option<u32>,
    pub trailer_url: Option<String>,
    pub cached_at: DateTime<Utc>,
}

impl MovieDetails {
    /// Details used when the provider fails or times out for this movie
    pub fn placeholder(movie_id: u64) -> Self {
        Self {
            movie_id,
            poster_url: PLACEHOLDER_POSTER.to_string(),
            rating: None,
            release_year: None,
            overview: None,
            genres: Vec::new(),
            runtime_minutes: None,
            trailer_url: None,
            cached_at: Utc::now(),
        }
    }

    pub fn is_placeholder(&self) -> bool {
        self.poster_url == PLACEHOLDER_POSTER && self.rating.is_none() && self.overview.is_none()
    }
}

// ============================================================================
// TMDB API Types
// ============================================================================

/// Raw movie detail payload from `GET /movie/{id}`
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbMovie {
    pub id: u64,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub vote_average: Option<f64>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub genres: Vec<TmdbGenre>,
    #[serde(default)]
    pub runtime: Option<u32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TmdbGenre {
    pub name: String,
}

/// One entry of `GET /movie/{id}/videos`
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbVideo {
    pub key: String,
    pub site: String,
    #[serde(rename = "type")]
    pub video_type: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TmdbVideosResponse {
    #[serde(default)]
    pub results: Vec<TmdbVideo>,
}

/// One entry of `GET /trending/movie/week`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TrendingMovie {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub vote_average: Option<f64>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub overview: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TmdbTrendingResponse {
    #[serde(default)]
    pub results: Vec<TrendingMovie>,
}

impl TmdbMovie {
    /// Converts the raw TMDB payload into display details
    ///
    /// `image_base` is prepended to `poster_path`; a missing poster falls back
    /// to the placeholder image. The release year is the leading four digits
    /// of `release_date`.
    pub fn into_details(self, image_base: &str, trailer_url: Option<String>) -> MovieDetails {
        let poster_url = match self.poster_path {
            Some(path) => format!("{}{}", image_base, path),
            None => PLACEHOLDER_POSTER.to_string(),
        };

        let release_year = self
            .release_date
            .as_deref()
            .and_then(|d| d.get(..4))
            .map(str::to_string);

        MovieDetails {
            movie_id: self.id,
            poster_url,
            rating: self.vote_average.map(|v| (v * 10.0).round() / 10.0),
            release_year,
            overview: self.overview.filter(|o| !o.is_empty()),
            genres: self.genres.into_iter().map(|g| g.name).collect(),
            runtime_minutes: self.runtime.filter(|r| *r > 0),
            trailer_url,
            cached_at: Utc::now(),
        }
    }
}
