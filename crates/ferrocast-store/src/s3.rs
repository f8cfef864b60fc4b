//! S3 artifact backend.
//!
//! Artifacts are small, so reads and writes buffer complete objects in
//! memory; there is no streaming path.

use async_trait::async_trait;
use aws_config::{BehaviorVersion, Region};
use aws_sdk_s3::operation::get_object::GetObjectError;
use aws_sdk_s3::primitives::ByteStream;
use ferrocast_core::{ModelArtifact, ModelManifest, SeriesId};
use tracing::debug;

use crate::artifact::{manifest_from_bytes, model_from_bytes, ArtifactStore};
use crate::config::StorageMode;
use crate::error::{StoreError, StoreResult};
use crate::layout::{manifest_object_key, model_object_key};

/// Artifact store over an S3 bucket.
///
/// Credentials and region come from configuration and the ambient AWS
/// environment, never from the request path. The client is cheap to clone
/// and safe for concurrent use.
#[derive(Debug, Clone)]
pub struct S3ArtifactStore {
    client: aws_sdk_s3::Client,
    bucket: String,
}

impl S3ArtifactStore {
    /// Builds an S3-backed store against `bucket`, loading shared AWS
    /// configuration once at construction.
    pub async fn connect(bucket: String, region: Option<String>) -> Self {
        let mut loader = aws_config::defaults(BehaviorVersion::latest());
        if let Some(region) = region {
            loader = loader.region(Region::new(region));
        }
        let shared = loader.load().await;
        Self { client: aws_sdk_s3::Client::new(&shared), bucket }
    }

    async fn get_bytes(&self, key: &str, id: &SeriesId) -> StoreResult<Vec<u8>> {
        let output = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|err| {
                if err.as_service_error().is_some_and(GetObjectError::is_no_such_key) {
                    StoreError::NotFound(id.to_string())
                } else {
                    StoreError::Unavailable(format!("s3 get '{key}': {err}"))
                }
            })?;
        let data = output
            .body
            .collect()
            .await
            .map_err(|err| StoreError::Unavailable(format!("s3 body '{key}': {err}")))?;
        Ok(data.into_bytes().to_vec())
    }

    async fn put_bytes(&self, key: &str, bytes: Vec<u8>) -> StoreResult<()> {
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .body(ByteStream::from(bytes))
            .send()
            .await
            .map_err(|err| StoreError::Unavailable(format!("s3 put '{key}': {err}")))?;
        Ok(())
    }
}

#[async_trait]
impl ArtifactStore for S3ArtifactStore {
    async fn load_model(&self, id: &SeriesId) -> StoreResult<ModelArtifact> {
        let key = model_object_key(id);
        debug!(series = %id, bucket = %self.bucket, key = %key, "loading model from s3");
        let bytes = self.get_bytes(&key, id).await?;
        model_from_bytes(id, &bytes)
    }

    async fn load_manifest(&self, id: &SeriesId) -> StoreResult<ModelManifest> {
        let key = manifest_object_key(id);
        let bytes = self.get_bytes(&key, id).await?;
        manifest_from_bytes(id, &bytes)
    }

    async fn save_model(
        &self,
        id: &SeriesId,
        model: &ModelArtifact,
        manifest: &ModelManifest,
    ) -> StoreResult<()> {
        let model_bytes = serde_json::to_vec_pretty(model)
            .map_err(|err| StoreError::Corrupt(id.to_string(), err.to_string()))?;
        let manifest_bytes = serde_json::to_vec_pretty(manifest)
            .map_err(|err| StoreError::Corrupt(id.to_string(), err.to_string()))?;

        self.put_bytes(&model_object_key(id), model_bytes).await?;
        self.put_bytes(&manifest_object_key(id), manifest_bytes).await?;
        debug!(series = %id, bucket = %self.bucket, "saved model and manifest");
        Ok(())
    }

    fn mode(&self) -> StorageMode {
        StorageMode::S3
    }
}
