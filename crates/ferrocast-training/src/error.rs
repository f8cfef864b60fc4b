//! Error types for training.

use ferrocast_store::{HistoryError, StoreError};
use thiserror::Error;

pub type TrainingResult<T> = std::result::Result<T, TrainingError>;

#[derive(Debug, Error)]
pub enum TrainingError {
    /// Fewer observations than a fit needs.
    #[error("not enough history to fit a model: have {have} observations, need {need}")]
    InsufficientData { have: usize, need: usize },

    /// The fit converged on unusable parameters.
    #[error("fit produced degenerate parameters: {0}")]
    Fit(String),

    #[error(transparent)]
    History(#[from] HistoryError),

    #[error(transparent)]
    Store(#[from] StoreError),
}
