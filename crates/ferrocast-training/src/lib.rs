//! Ferrocast Training
//!
//! The offline training path: fit a seasonal model per series from its
//! historical observations and persist the (model, manifest) pair through
//! the artifact store's `save_model` contract. The serving path never calls
//! into this crate.

pub mod error;
pub mod fit;
pub mod trainer;

pub use error::{TrainingError, TrainingResult};
pub use fit::{fit_series, FittedModel, MIN_OBSERVATIONS, SEASON_LENGTH};
pub use trainer::{train_all, train_series, TrainingSummary, MODEL_TYPE};
