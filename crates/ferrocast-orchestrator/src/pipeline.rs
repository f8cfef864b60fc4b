//! The request-serving pipeline.

use ferrocast_cache::ForecastCache;
use ferrocast_core::{generate, Forecast, Provenance, SeriesId};
use ferrocast_store::{ArtifactStore, StorageMode, StoreError, StoreResult};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;
use tracing::{debug, info};

use crate::error::{ServeError, ServeResult};

/// Default bound on one artifact fetch.
const DEFAULT_STORE_TIMEOUT: Duration = Duration::from_secs(10);

/// A forecast ready to be returned to a client, tagged with its provenance
/// and the storage backend that served the artifacts.
#[derive(Debug, Clone)]
pub struct ServedForecast {
    pub series_id: SeriesId,
    pub horizon: i64,
    pub forecast: Forecast,
    pub source: Provenance,
    pub storage_mode: StorageMode,
}

/// Composes cache, artifact store and generator into the serving protocol.
///
/// Both handles are constructed once at startup and shared read-only across
/// concurrent requests. Requests for the same series may race and
/// redundantly regenerate; that is accepted, since generation is idempotent
/// and the only side effect is an advisory cache overwrite.
pub struct ForecastPipeline {
    store: Arc<dyn ArtifactStore>,
    cache: ForecastCache,
    store_timeout: Duration,
}

impl ForecastPipeline {
    pub fn new(store: Arc<dyn ArtifactStore>, cache: ForecastCache) -> Self {
        Self { store, cache, store_timeout: DEFAULT_STORE_TIMEOUT }
    }

    #[must_use]
    pub fn with_store_timeout(mut self, store_timeout: Duration) -> Self {
        self.store_timeout = store_timeout;
        self
    }

    pub fn storage_mode(&self) -> StorageMode {
        self.store.mode()
    }

    /// Serves one forecast request.
    ///
    /// State machine: CacheCheck → ArtifactResolution → Generation →
    /// CachePopulate → respond. At most one cache write happens per miss,
    /// and nothing is ever written to the artifact store on this path.
    pub async fn serve(&self, id: &SeriesId, horizon: i64) -> ServeResult<ServedForecast> {
        if let Some(forecast) = self.cache.get(id, horizon).await {
            debug!(series = %id, horizon, "serving forecast from cache");
            return Ok(self.respond(id, horizon, forecast, Provenance::Cache));
        }

        info!(series = %id, horizon, "generating forecast");
        let model = self.bounded(self.store.load_model(id)).await?;
        let manifest = self.bounded(self.store.load_manifest(id)).await?;
        let forecast = generate(&model, &manifest.last_training_date, horizon)?;

        // Best-effort: a failed write is logged inside the cache and must
        // never block the response.
        self.cache.put(id, horizon, &forecast).await;

        Ok(self.respond(id, horizon, forecast, Provenance::Model))
    }

    fn respond(
        &self,
        id: &SeriesId,
        horizon: i64,
        forecast: Forecast,
        source: Provenance,
    ) -> ServedForecast {
        ServedForecast {
            series_id: id.clone(),
            horizon,
            forecast,
            source,
            storage_mode: self.store.mode(),
        }
    }

    /// Applies the store timeout to one artifact fetch; an elapsed fetch
    /// surfaces as an unavailable backend.
    async fn bounded<T>(
        &self,
        fetch: impl Future<Output = StoreResult<T>> + Send,
    ) -> ServeResult<T> {
        match timeout(self.store_timeout, fetch).await {
            Ok(result) => result.map_err(ServeError::from),
            Err(_) => Err(ServeError::Store(StoreError::Unavailable(
                "artifact fetch timed out".to_string(),
            ))),
        }
    }
}
