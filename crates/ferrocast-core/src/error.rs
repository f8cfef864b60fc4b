//! Error types for the core domain.

use thiserror::Error;

/// Errors raised by a model artifact when asked for forward steps.
#[derive(Debug, Error)]
pub enum ModelError {
    /// The persisted parameter set cannot produce predictions.
    #[error("degenerate model parameters: {0}")]
    Degenerate(String),
}

/// Errors raised by forecast generation.
///
/// Generation never returns partial output: any of these means no
/// `Forecast` was produced at all.
#[derive(Debug, Error)]
pub enum GenerationError {
    /// The requested horizon is zero or negative.
    #[error("horizon must be a positive number of months, got {0}")]
    InvalidHorizon(i64),

    /// The manifest's last training date could not be parsed.
    #[error("unparseable last training date '{0}'")]
    InvalidDate(String),

    /// The model's forward-step call failed.
    #[error("model forward step failed: {0}")]
    Model(#[from] ModelError),
}
