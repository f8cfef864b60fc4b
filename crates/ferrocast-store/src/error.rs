//! Error taxonomy for the artifact store.

use thiserror::Error;

/// Result type alias for artifact-store operations.
pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Failures crossing the artifact-store boundary.
///
/// This taxonomy is the whole contract between backends and the serving
/// path: `NotFound` and `ManifestIncomplete` mean the series has no usable
/// deployed model; `Corrupt` and `Unavailable` are server-side faults.
/// `Unavailable` is retryable in principle, but nothing in this pipeline
/// retries automatically.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backing object/file for the series is absent.
    #[error("no artifact found for series '{0}'")]
    NotFound(String),

    /// The artifact exists but could not be deserialized.
    #[error("artifact for series '{0}' is corrupt: {1}")]
    Corrupt(String, String),

    /// The manifest parsed but is missing a required field.
    #[error("manifest for series '{0}' is incomplete: missing '{1}'")]
    ManifestIncomplete(String, String),

    /// The filesystem or network call itself failed.
    #[error("storage backend unavailable: {0}")]
    Unavailable(String),
}
