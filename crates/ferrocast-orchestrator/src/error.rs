//! Serve-error taxonomy.

use ferrocast_core::GenerationError;
use ferrocast_store::StoreError;
use thiserror::Error;

/// Result type alias for the serving pipeline.
pub type ServeResult<T> = std::result::Result<T, ServeError>;

/// Failures the pipeline reports to the HTTP layer.
///
/// `ModelMissing` means the requested resource (a deployed model for that
/// series) does not exist and maps to a client-visible 404; everything else
/// is a server-side fault. Cache errors never appear here: they are fully
/// absorbed at the cache boundary.
#[derive(Debug, Error)]
pub enum ServeError {
    /// No model/manifest artifact is deployed for the series.
    #[error("no deployed model for series '{0}'")]
    ModelMissing(String),

    /// The artifact store failed (corrupt artifact or unavailable backend).
    #[error(transparent)]
    Store(StoreError),

    /// Forecast generation failed.
    #[error(transparent)]
    Generation(#[from] GenerationError),
}

impl ServeError {
    /// True when the failure means the requested resource does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::ModelMissing(_))
    }
}

impl From<StoreError> for ServeError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(id) | StoreError::ManifestIncomplete(id, _) => {
                Self::ModelMissing(id)
            }
            other => Self::Store(other),
        }
    }
}
