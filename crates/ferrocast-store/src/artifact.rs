//! The artifact store abstraction.

use async_trait::async_trait;
use ferrocast_core::{ManifestDecodeError, ModelArtifact, ModelManifest, SeriesId};
use std::sync::Arc;

use crate::config::{ConfigError, StorageMode, StoreConfig};
use crate::error::{StoreError, StoreResult};
use crate::local::LocalArtifactStore;
use crate::s3::S3ArtifactStore;

/// Uniform load/save of a (model, manifest) pair.
///
/// Implementations are safe for concurrent read-only use by many
/// simultaneous requests; the serving path only ever calls `load_*`, and
/// `save_model` belongs to the offline training job. The contract for the
/// on-disk/on-bucket layout lives here so that the two backends stay
/// drop-in replacements (see [`crate::layout`]).
#[async_trait]
pub trait ArtifactStore: Send + Sync {
    /// Fetches and deserializes the model blob for `id`.
    async fn load_model(&self, id: &SeriesId) -> StoreResult<ModelArtifact>;

    /// Fetches and parses the manifest for `id`.
    async fn load_manifest(&self, id: &SeriesId) -> StoreResult<ModelManifest>;

    /// Persists both artifacts under the shared naming convention.
    async fn save_model(
        &self,
        id: &SeriesId,
        model: &ModelArtifact,
        manifest: &ModelManifest,
    ) -> StoreResult<()>;

    /// The backend this store was constructed with.
    fn mode(&self) -> StorageMode;
}

/// Builds the artifact store selected by configuration.
///
/// The LOCAL/S3 switch lives here and only here; callers hold an
/// `Arc<dyn ArtifactStore>` and never branch on the backend again.
pub async fn open_store(config: &StoreConfig) -> Result<Arc<dyn ArtifactStore>, ConfigError> {
    match config.mode {
        StorageMode::Local => {
            Ok(Arc::new(LocalArtifactStore::new(config.models_dir.clone())))
        }
        StorageMode::S3 => {
            let bucket = config.bucket.clone().ok_or(ConfigError::MissingBucket)?;
            Ok(Arc::new(S3ArtifactStore::connect(bucket, config.region.clone()).await))
        }
    }
}

/// Deserializes model bytes, mapping failures into the store taxonomy.
pub(crate) fn model_from_bytes(id: &SeriesId, bytes: &[u8]) -> StoreResult<ModelArtifact> {
    serde_json::from_slice(bytes)
        .map_err(|err| StoreError::Corrupt(id.to_string(), err.to_string()))
}

/// Parses manifest bytes, mapping failures into the store taxonomy.
pub(crate) fn manifest_from_bytes(id: &SeriesId, bytes: &[u8]) -> StoreResult<ModelManifest> {
    ModelManifest::decode(bytes).map_err(|err| match err {
        ManifestDecodeError::MissingField(field) => {
            StoreError::ManifestIncomplete(id.to_string(), field.to_string())
        }
        ManifestDecodeError::Malformed(cause) => {
            StoreError::Corrupt(id.to_string(), cause.to_string())
        }
    })
}
