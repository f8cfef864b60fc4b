//! Shared application state.

use ferrocast_orchestrator::ForecastPipeline;
use ferrocast_store::Database;
use std::sync::Arc;

/// Handles constructed once at startup and shared read-only by every
/// request handler.
#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<ForecastPipeline>,
    pub history: Arc<Database>,
}
