//! Local-filesystem artifact backend.

use async_trait::async_trait;
use ferrocast_core::{ModelArtifact, ModelManifest, SeriesId};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::artifact::{manifest_from_bytes, model_from_bytes, ArtifactStore};
use crate::config::StorageMode;
use crate::error::{StoreError, StoreResult};
use crate::layout::ModelsLayout;

/// Artifact store over a models directory on local disk.
#[derive(Debug, Clone)]
pub struct LocalArtifactStore {
    layout: ModelsLayout,
}

impl LocalArtifactStore {
    #[must_use]
    pub fn new(models_dir: PathBuf) -> Self {
        Self { layout: ModelsLayout::new(models_dir) }
    }

    async fn read_bytes(&self, path: &Path, id: &SeriesId) -> StoreResult<Vec<u8>> {
        tokio::fs::read(path).await.map_err(|err| {
            if err.kind() == ErrorKind::NotFound {
                StoreError::NotFound(id.to_string())
            } else {
                // Report the file name, not the full path.
                let name = path
                    .file_name()
                    .map_or_else(String::new, |n| n.to_string_lossy().into_owned());
                StoreError::Unavailable(format!("reading '{name}': {err}"))
            }
        })
    }

    /// Write-then-rename so a crashed save never leaves a half-written
    /// artifact at the published name.
    async fn write_atomic(path: &Path, bytes: &[u8]) -> StoreResult<()> {
        let tmp = path.with_extension("json.tmp");
        let describe = |err: std::io::Error| {
            let name = path
                .file_name()
                .map_or_else(String::new, |n| n.to_string_lossy().into_owned());
            StoreError::Unavailable(format!("writing '{name}': {err}"))
        };
        tokio::fs::write(&tmp, bytes).await.map_err(describe)?;
        tokio::fs::rename(&tmp, path).await.map_err(describe)
    }
}

#[async_trait]
impl ArtifactStore for LocalArtifactStore {
    async fn load_model(&self, id: &SeriesId) -> StoreResult<ModelArtifact> {
        let path = self.layout.model_path(id);
        debug!(series = %id, path = %path.display(), "loading model from disk");
        let bytes = self.read_bytes(&path, id).await?;
        model_from_bytes(id, &bytes)
    }

    async fn load_manifest(&self, id: &SeriesId) -> StoreResult<ModelManifest> {
        let path = self.layout.manifest_path(id);
        let bytes = self.read_bytes(&path, id).await?;
        manifest_from_bytes(id, &bytes)
    }

    async fn save_model(
        &self,
        id: &SeriesId,
        model: &ModelArtifact,
        manifest: &ModelManifest,
    ) -> StoreResult<()> {
        tokio::fs::create_dir_all(self.layout.root())
            .await
            .map_err(|err| StoreError::Unavailable(format!("creating models dir: {err}")))?;

        let model_bytes = serde_json::to_vec_pretty(model)
            .map_err(|err| StoreError::Corrupt(id.to_string(), err.to_string()))?;
        let manifest_bytes = serde_json::to_vec_pretty(manifest)
            .map_err(|err| StoreError::Corrupt(id.to_string(), err.to_string()))?;

        Self::write_atomic(&self.layout.model_path(id), &model_bytes).await?;
        Self::write_atomic(&self.layout.manifest_path(id), &manifest_bytes).await?;
        debug!(series = %id, "saved model and manifest");
        Ok(())
    }

    fn mode(&self) -> StorageMode {
        StorageMode::Local
    }
}
