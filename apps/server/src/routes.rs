//! HTTP routes.

use axum::extract::{Path, Query, State};
use axum::routing::get;
use axum::{Json, Router};
use chrono::NaiveDate;
use ferrocast_core::{Observation, Provenance, SeriesId};
use ferrocast_orchestrator::ServedForecast;
use ferrocast_store::StorageMode;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::time::Duration;
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::error;

use crate::error::ApiError;
use crate::state::AppState;

/// Horizon used when the query string does not carry one.
const DEFAULT_HORIZON: i64 = 12;

/// Bound on a whole request.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Builds the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/materials", get(list_materials))
        .route("/historical-data/:series_id", get(historical_data))
        .route("/forecast", get(forecast))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(REQUEST_TIMEOUT))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// Lists forecastable series from the history store.
///
/// A failed query degrades to an empty list, and an empty list is a 500:
/// a serving instance with no materials is misconfigured, not healthy.
async fn list_materials(State(state): State<AppState>) -> Result<Json<Vec<String>>, ApiError> {
    let history = state.history.clone();
    let materials = tokio::task::spawn_blocking(move || history.distinct_series())
        .await
        .map_err(|err| ApiError::internal(format!("materials query aborted: {err}")))?
        .unwrap_or_else(|err| {
            error!(error = %err, "materials query failed");
            Vec::new()
        });
    if materials.is_empty() {
        return Err(ApiError::internal("Could not retrieve materials from database."));
    }
    Ok(Json(materials))
}

async fn historical_data(
    State(state): State<AppState>,
    Path(series_id): Path<String>,
) -> Result<Json<Vec<Observation>>, ApiError> {
    let not_found = || ApiError::not_found(format!("No historical data found for {series_id}"));
    let id = SeriesId::new(series_id.clone()).map_err(|_| not_found())?;

    let history = state.history.clone();
    let rows = tokio::task::spawn_blocking(move || history.series_history(&id))
        .await
        .map_err(|err| ApiError::internal(format!("history query aborted: {err}")))?
        .unwrap_or_else(|err| {
            error!(series = %series_id, error = %err, "history query failed");
            Vec::new()
        });
    if rows.is_empty() {
        return Err(not_found());
    }
    Ok(Json(rows))
}

#[derive(Debug, Deserialize)]
struct ForecastParams {
    material_id: String,
    #[serde(default = "default_horizon")]
    horizon: i64,
}

fn default_horizon() -> i64 {
    DEFAULT_HORIZON
}

#[derive(Debug, Serialize)]
struct ForecastItem {
    date: NaiveDate,
    forecast: f64,
}

#[derive(Debug, Serialize)]
struct ForecastResponse {
    material_id: String,
    forecast: Vec<ForecastItem>,
    source: Provenance,
    storage_mode: StorageMode,
}

impl From<ServedForecast> for ForecastResponse {
    fn from(served: ServedForecast) -> Self {
        Self {
            material_id: served.series_id.to_string(),
            source: served.source,
            storage_mode: served.storage_mode,
            forecast: served
                .forecast
                .into_points()
                .into_iter()
                .map(|point| ForecastItem { date: point.date, forecast: point.value })
                .collect(),
        }
    }
}

async fn forecast(
    State(state): State<AppState>,
    Query(params): Query<ForecastParams>,
) -> Result<Json<ForecastResponse>, ApiError> {
    let id = SeriesId::new(params.material_id.clone()).map_err(|_| {
        ApiError::not_found(format!("no deployed model for series '{}'", params.material_id))
    })?;
    let served = state.pipeline.serve(&id, params.horizon).await?;
    Ok(Json(ForecastResponse::from(served)))
}
