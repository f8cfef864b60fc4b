//! Forecast output types.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single dated prediction. Immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastPoint {
    pub date: NaiveDate,
    pub value: f64,
}

/// Where a served forecast came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provenance {
    /// Freshly generated from the model artifact.
    Model,
    /// Decoded from a cache entry.
    Cache,
}

/// An ordered run of monthly forecast points.
///
/// Invariant (upheld by the generator): dates are strictly increasing
/// first-of-month dates, one per calendar month, starting the month after
/// the model's last training date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Forecast {
    points: Vec<ForecastPoint>,
}

impl Forecast {
    /// Wraps an already-ordered sequence of points (e.g. one decoded from a
    /// cache entry that was encoded from a generated forecast).
    pub fn from_points(points: Vec<ForecastPoint>) -> Self {
        Self { points }
    }

    pub fn points(&self) -> &[ForecastPoint] {
        &self.points
    }

    pub fn into_points(self) -> Vec<ForecastPoint> {
        self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}
