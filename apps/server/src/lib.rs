//! Ferrocast Server
//!
//! The HTTP surface of the forecast-serving pipeline. Kept as a library so
//! the router can be exercised in-process by integration tests; `main.rs`
//! only wires configuration and serves.

pub mod config;
pub mod error;
pub mod routes;
pub mod state;

pub use config::{ServerConfig, ServerConfigError};
pub use error::ApiError;
pub use routes::router;
pub use state::AppState;
