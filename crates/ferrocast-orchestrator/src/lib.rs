//! Ferrocast Orchestrator
//!
//! Composes the cache, the artifact store and the generator into the
//! request-serving protocol: check cache → on miss, resolve artifacts →
//! generate → populate cache → respond. Internal failure kinds are folded
//! into a serve-error taxonomy the HTTP layer can map onto status codes.

pub mod error;
pub mod pipeline;

pub use error::{ServeError, ServeResult};
pub use pipeline::{ForecastPipeline, ServedForecast};
