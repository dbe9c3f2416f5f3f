use serde::Deserialize;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Path to the serialized movie catalog (JSON array of entries)
    #[serde(default = "default_catalog_path")]
    pub catalog_path: String,

    /// Path to the serialized similarity matrix (JSON array of rows)
    #[serde(default = "default_similarity_path")]
    pub similarity_path: String,

    /// TMDB API key
    pub tmdb_api_key: String,

    /// TMDB API base URL
    #[serde(default = "default_tmdb_api_url")]
    pub tmdb_api_url: String,

    /// TMDB image base URL (w500 posters)
    #[serde(default = "default_tmdb_image_url")]
    pub tmdb_image_url: String,

    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Maximum number of concurrent metadata fetches
    #[serde(default = "default_enrichment_concurrency")]
    pub enrichment_concurrency: usize,

    /// Per-movie metadata fetch timeout in seconds
    #[serde(default = "default_enrichment_timeout_secs")]
    pub enrichment_timeout_secs: u64,
}

fn default_catalog_path() -> String {
    "data/movie_list.json".to_string()
}

fn default_similarity_path() -> String {
    "data/similarity.json".to_string()
}

fn default_tmdb_api_url() -> String {
    "https://api.themoviedb.org/3".to_string()
}

fn default_tmdb_image_url() -> String {
    "https://image.tmdb.org/t/p/w500".to_string()
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_enrichment_concurrency() -> usize {
    8
}

fn default_enrichment_timeout_secs() -> u64 {
    10
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }
}
