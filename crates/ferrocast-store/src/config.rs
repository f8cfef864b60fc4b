//! Storage configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;

/// Default models root for the local backend.
pub const DEFAULT_MODELS_DIR: &str = "ml/models";

/// Which backend the artifact store was built with.
///
/// Selected once at construction from configuration; serialized into
/// forecast responses for operability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum StorageMode {
    Local,
    S3,
}

impl StorageMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Local => "LOCAL",
            Self::S3 => "S3",
        }
    }
}

impl FromStr for StorageMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "LOCAL" => Ok(Self::Local),
            "S3" => Ok(Self::S3),
            other => Err(ConfigError::UnknownMode(other.to_string())),
        }
    }
}

/// Storage configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("unrecognized ARTIFACT_STORAGE_MODE '{0}' (expected LOCAL or S3)")]
    UnknownMode(String),

    #[error("S3_BUCKET_NAME is required when ARTIFACT_STORAGE_MODE=S3")]
    MissingBucket,
}

/// Environment-sourced configuration for the artifact store.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub mode: StorageMode,
    /// Models root for the local backend.
    pub models_dir: PathBuf,
    /// Bucket name, required iff `mode` is S3.
    pub bucket: Option<String>,
    /// Region override; credentials come from the ambient AWS environment.
    pub region: Option<String>,
}

impl StoreConfig {
    /// Reads configuration from the process environment.
    ///
    /// Recognized variables: `ARTIFACT_STORAGE_MODE` (LOCAL | S3, default
    /// LOCAL), `MODELS_DIR`, `S3_BUCKET_NAME`, `AWS_REGION`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env), with an injectable lookup so
    /// tests never touch process-global state.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mode = match lookup("ARTIFACT_STORAGE_MODE") {
            Some(raw) => raw.parse::<StorageMode>()?,
            None => StorageMode::Local,
        };
        let models_dir =
            PathBuf::from(lookup("MODELS_DIR").unwrap_or_else(|| DEFAULT_MODELS_DIR.to_string()));
        let bucket = lookup("S3_BUCKET_NAME");
        let region = lookup("AWS_REGION");

        if mode == StorageMode::S3 && bucket.is_none() {
            return Err(ConfigError::MissingBucket);
        }

        Ok(Self { mode, models_dir, bucket, region })
    }

    /// A LOCAL-mode configuration rooted at `models_dir`.
    pub fn local(models_dir: impl Into<PathBuf>) -> Self {
        Self {
            mode: StorageMode::Local,
            models_dir: models_dir.into(),
            bucket: None,
            region: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(
        pairs: &'static [(&'static str, &'static str)],
    ) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<&str, &str> = pairs.iter().copied().collect();
        move |key| map.get(key).map(|v| (*v).to_string())
    }

    #[test]
    fn test_defaults_to_local_mode_and_models_dir() {
        let config = StoreConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.mode, StorageMode::Local);
        assert_eq!(config.models_dir, PathBuf::from(DEFAULT_MODELS_DIR));
    }

    #[test]
    fn test_s3_mode_requires_bucket() {
        let err = StoreConfig::from_lookup(lookup(&[("ARTIFACT_STORAGE_MODE", "S3")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::MissingBucket));

        let config = StoreConfig::from_lookup(lookup(&[
            ("ARTIFACT_STORAGE_MODE", "s3"),
            ("S3_BUCKET_NAME", "forecast-artifacts"),
            ("AWS_REGION", "us-east-1"),
        ]))
        .unwrap();
        assert_eq!(config.mode, StorageMode::S3);
        assert_eq!(config.bucket.as_deref(), Some("forecast-artifacts"));
    }

    #[test]
    fn test_unknown_mode_is_rejected() {
        let err = StoreConfig::from_lookup(lookup(&[("ARTIFACT_STORAGE_MODE", "GCS")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::UnknownMode(_)));
    }

    #[test]
    fn test_storage_mode_serializes_uppercase() {
        assert_eq!(serde_json::to_string(&StorageMode::Local).unwrap(), "\"LOCAL\"");
        assert_eq!(serde_json::to_string(&StorageMode::S3).unwrap(), "\"S3\"");
    }
}
