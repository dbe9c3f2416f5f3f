use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use cinematch_api::{
    cache::Cache,
    config::Config,
    data::{load_catalog, load_similarity},
    routes::{create_router, AppState},
    services::{providers::TmdbProvider, Enricher, MetadataProvider, SimilarityIndex},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("cinematch_api=info,tower_http=info")),
        )
        .init();

    let config = Config::from_env()?;

    // Artifacts are loaded once; any load failure is fatal
    let catalog = load_catalog(&config.catalog_path).context("loading movie catalog")?;
    let matrix = load_similarity(&config.similarity_path).context("loading similarity matrix")?;
    let index = Arc::new(SimilarityIndex::new(catalog, matrix).context("building similarity index")?);

    tracing::info!(movies = index.catalog().len(), "Similarity index ready");

    let cache = Cache::new();
    let provider = Arc::new(TmdbProvider::new(
        cache,
        config.tmdb_api_key.clone(),
        config.tmdb_api_url.clone(),
        config.tmdb_image_url.clone(),
    ));

    // Degraded metadata is acceptable; a failed probe only warns
    if let Err(e) = provider.probe().await {
        tracing::warn!(error = %e, "TMDB connectivity check failed, metadata may be degraded");
    }

    let provider: Arc<dyn MetadataProvider> = provider;
    let enricher = Enricher::new(
        provider.clone(),
        config.enrichment_concurrency,
        Duration::from_secs(config.enrichment_timeout_secs),
    );

    let state = Arc::new(AppState {
        index,
        enricher,
        provider,
    });

    let app = create_router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("binding {}", addr))?;

    tracing::info!(addr = %addr, "Server running");
    axum::serve(listener, app).await?;

    Ok(())
}
