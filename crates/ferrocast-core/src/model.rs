//! Loadable forecast model artifacts.

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// An opaque, deserializable fitted forecasting model.
///
/// Serialized as a JSON document tagged by `algorithm`, so further
/// algorithms can be added without invalidating stored artifacts. Callers
/// hold a model only for the duration of one request and never mutate it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "algorithm", rename_all = "snake_case")]
pub enum ModelArtifact {
    /// Additive level/trend/seasonal parameter set fitted offline.
    SeasonalAdditive(SeasonalAdditiveParams),
}

impl ModelArtifact {
    /// Asks the model for exactly `steps` forward predictions.
    ///
    /// The returned values are order-significant: the first value belongs to
    /// the first month after the training window, and so on.
    pub fn forecast(&self, steps: usize) -> Result<Vec<f64>, ModelError> {
        match self {
            Self::SeasonalAdditive(params) => params.forecast(steps),
        }
    }
}

/// Parameters of an additive seasonal model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeasonalAdditiveParams {
    /// Smoothed level at the end of the training window.
    pub level: f64,
    /// Per-month trend increment.
    pub trend: f64,
    /// Seasonal offsets, rotated so index 0 is the first forecast month.
    pub seasonals: Vec<f64>,
}

impl SeasonalAdditiveParams {
    fn forecast(&self, steps: usize) -> Result<Vec<f64>, ModelError> {
        if self.seasonals.is_empty() {
            return Err(ModelError::Degenerate("no seasonal components".to_string()));
        }
        if !self.level.is_finite() || !self.trend.is_finite() {
            return Err(ModelError::Degenerate("non-finite level or trend".to_string()));
        }
        let values = (0..steps)
            .map(|step| {
                self.level
                    + (step as f64 + 1.0) * self.trend
                    + self.seasonals[step % self.seasonals.len()]
            })
            .collect();
        Ok(values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params() -> SeasonalAdditiveParams {
        SeasonalAdditiveParams {
            level: 100.0,
            trend: 1.0,
            seasonals: vec![0.5, -0.5, 0.0],
        }
    }

    #[test]
    fn test_forecast_returns_exactly_requested_steps() {
        let model = ModelArtifact::SeasonalAdditive(params());
        assert_eq!(model.forecast(7).unwrap().len(), 7);
        assert!(model.forecast(0).unwrap().is_empty());
    }

    #[test]
    fn test_forecast_applies_trend_and_cycles_seasonals() {
        let model = ModelArtifact::SeasonalAdditive(params());
        let values = model.forecast(4).unwrap();
        assert_eq!(values[0], 100.0 + 1.0 + 0.5);
        assert_eq!(values[1], 100.0 + 2.0 - 0.5);
        assert_eq!(values[2], 100.0 + 3.0);
        // Fourth step wraps back to the first seasonal offset.
        assert_eq!(values[3], 100.0 + 4.0 + 0.5);
    }

    #[test]
    fn test_degenerate_parameters_are_rejected() {
        let empty = ModelArtifact::SeasonalAdditive(SeasonalAdditiveParams {
            level: 1.0,
            trend: 0.0,
            seasonals: vec![],
        });
        assert!(empty.forecast(3).is_err());

        let non_finite = ModelArtifact::SeasonalAdditive(SeasonalAdditiveParams {
            level: f64::NAN,
            trend: 0.0,
            seasonals: vec![0.0],
        });
        assert!(non_finite.forecast(3).is_err());
    }

    #[test]
    fn test_artifact_json_is_algorithm_tagged() {
        let model = ModelArtifact::SeasonalAdditive(params());
        let json = serde_json::to_value(&model).unwrap();
        assert_eq!(json["algorithm"], "seasonal_additive");

        let back: ModelArtifact = serde_json::from_value(json).unwrap();
        assert_eq!(back, model);
    }
}
