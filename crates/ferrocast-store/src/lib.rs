//! Ferrocast Store
//!
//! Persistence for the forecast-serving pipeline:
//! - `ArtifactStore`: uniform load/save of a (model, manifest) pair,
//!   polymorphic over a local-filesystem and an S3 backend selected once at
//!   construction
//! - `Database`: the relational store of historical observations
//!
//! Only the failure taxonomy (`StoreError`) crosses the artifact-store
//! boundary; callers never learn whether they are talking to a disk or a
//! network service.

pub mod artifact;
pub mod config;
pub mod error;
pub mod history;
pub mod layout;
pub mod local;
pub mod s3;

pub use artifact::{open_store, ArtifactStore};
pub use config::{ConfigError, StorageMode, StoreConfig};
pub use error::{StoreError, StoreResult};
pub use history::{Database, HistoryError, HistoryResult};
pub use layout::{manifest_file_name, manifest_object_key, model_file_name, model_object_key, ModelsLayout};
pub use local::LocalArtifactStore;
pub use s3::S3ArtifactStore;
