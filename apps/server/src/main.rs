//! Ferrocast server binary.

use anyhow::Context;
use ferrocast_cache::{CacheConfig, ForecastCache};
use ferrocast_orchestrator::ForecastPipeline;
use ferrocast_server::{router, AppState, ServerConfig};
use ferrocast_store::{open_store, Database, StoreConfig};
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = ServerConfig::from_env().context("server configuration")?;
    let store_config = StoreConfig::from_env().context("artifact store configuration")?;

    // Initialization order: history store and artifact store are required
    // and fail startup; the cache falls back to a disabled state.
    let history =
        Arc::new(Database::open(&config.database_url).context("opening history database")?);
    let store = open_store(&store_config).await.context("opening artifact store")?;
    info!(mode = store.mode().as_str(), "artifact store ready");

    let cache = ForecastCache::connect(CacheConfig::from_env()).await;
    if !cache.is_enabled() {
        warn!("forecast cache disabled; every request will regenerate");
    }

    let pipeline = Arc::new(ForecastPipeline::new(store, cache));
    let app = router(AppState { pipeline, history });

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("binding {}", config.bind_addr))?;
    info!(addr = %config.bind_addr, "ferrocast server listening");
    axum::serve(listener, app).await.context("serving")?;
    Ok(())
}
