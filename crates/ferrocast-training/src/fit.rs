//! Model fitting.
//!
//! Fits an additive level/trend/seasonal parameter set to a monthly series:
//! a least-squares linear trend, then per-calendar-month means of the
//! detrended residuals as seasonal offsets. Deliberately a baseline
//! everywhere: the serving pipeline treats the result as an opaque
//! artifact either way.

use chrono::{Datelike, NaiveDate};
use ferrocast_core::{ModelArtifact, Observation, SeasonalAdditiveParams};

use crate::error::{TrainingError, TrainingResult};

/// Months per seasonal cycle.
pub const SEASON_LENGTH: usize = 12;

/// A fit needs at least two full cycles.
pub const MIN_OBSERVATIONS: usize = 2 * SEASON_LENGTH;

/// A fitted model and the training cutoff that goes into its manifest.
#[derive(Debug, Clone)]
pub struct FittedModel {
    pub artifact: ModelArtifact,
    pub last_training_date: NaiveDate,
}

/// Fits a model to a series' history.
pub fn fit_series(observations: &[Observation]) -> TrainingResult<FittedModel> {
    if observations.len() < MIN_OBSERVATIONS {
        return Err(TrainingError::InsufficientData {
            have: observations.len(),
            need: MIN_OBSERVATIONS,
        });
    }

    let mut obs = observations.to_vec();
    obs.sort_by_key(|o| o.date);

    // Least-squares line through (t, value).
    let n = obs.len() as f64;
    let mean_t = (n - 1.0) / 2.0;
    let mean_value = obs.iter().map(|o| o.value).sum::<f64>() / n;
    let mut numerator = 0.0;
    let mut denominator = 0.0;
    for (t, o) in obs.iter().enumerate() {
        let dt = t as f64 - mean_t;
        numerator += dt * (o.value - mean_value);
        denominator += dt * dt;
    }
    let trend = if denominator == 0.0 { 0.0 } else { numerator / denominator };
    let intercept = mean_value - trend * mean_t;

    // Seasonal offsets: mean detrended residual per calendar month,
    // centered so the offsets sum to zero.
    let mut sums = [0.0; SEASON_LENGTH];
    let mut counts = [0usize; SEASON_LENGTH];
    for (t, o) in obs.iter().enumerate() {
        let residual = o.value - (intercept + trend * t as f64);
        let month = o.date.month0() as usize;
        sums[month] += residual;
        counts[month] += 1;
    }
    let mut offsets = [0.0; SEASON_LENGTH];
    for month in 0..SEASON_LENGTH {
        if counts[month] > 0 {
            offsets[month] = sums[month] / counts[month] as f64;
        }
    }
    let mean_offset = offsets.iter().sum::<f64>() / SEASON_LENGTH as f64;
    for offset in &mut offsets {
        *offset -= mean_offset;
    }

    let last = obs[obs.len() - 1].date;
    let level = intercept + trend * (n - 1.0);
    if !level.is_finite() || !trend.is_finite() {
        return Err(TrainingError::Fit("non-finite level or trend".to_string()));
    }

    // Rotate so index 0 is the first month after the training window,
    // matching how the artifact consumes its seasonals.
    let first_forecast_month = (last.month0() as usize + 1) % SEASON_LENGTH;
    let seasonals = (0..SEASON_LENGTH)
        .map(|step| offsets[(first_forecast_month + step) % SEASON_LENGTH])
        .collect();

    Ok(FittedModel {
        artifact: ModelArtifact::SeasonalAdditive(SeasonalAdditiveParams {
            level,
            trend,
            seasonals,
        }),
        last_training_date: last,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn monthly(start_year: i32, months: usize, value: impl Fn(usize) -> f64) -> Vec<Observation> {
        (0..months)
            .map(|t| {
                let year = start_year + (t / 12) as i32;
                let month = (t % 12) as u32 + 1;
                Observation::new(
                    NaiveDate::from_ymd_opt(year, month, 1).unwrap(),
                    value(t),
                )
            })
            .collect()
    }

    #[test]
    fn test_too_little_history_is_rejected() {
        let obs = monthly(2022, MIN_OBSERVATIONS - 1, |t| t as f64);
        assert!(matches!(
            fit_series(&obs),
            Err(TrainingError::InsufficientData { .. })
        ));
        assert!(matches!(
            fit_series(&[]),
            Err(TrainingError::InsufficientData { have: 0, .. })
        ));
    }

    #[test]
    fn test_recovers_a_pure_linear_trend() {
        let obs = monthly(2020, 36, |t| 100.0 + 2.0 * t as f64);
        let fitted = fit_series(&obs).unwrap();
        assert_eq!(fitted.last_training_date, NaiveDate::from_ymd_opt(2022, 12, 1).unwrap());

        // One step ahead of t = 35 is 100 + 2 * 36 = 172.
        let values = fitted.artifact.forecast(1).unwrap();
        assert!((values[0] - 172.0).abs() < 1e-6, "got {}", values[0]);
    }

    #[test]
    fn test_recovers_a_seasonal_pattern() {
        let pattern = [2.0, 1.0, 0.0, -1.0, -2.0, -3.0, 3.0, 2.0, 1.0, 0.0, -1.0, -2.0];
        let obs = monthly(2020, 36, |t| 100.0 + 0.5 * t as f64 + pattern[t % 12]);
        let fitted = fit_series(&obs).unwrap();

        // Training ends December 2022, so step 0 is January: expected
        // 100 + 0.5 * 36 + pattern[0] = 120.
        let values = fitted.artifact.forecast(12).unwrap();
        assert!((values[0] - 120.0).abs() < 0.5, "got {}", values[0]);
        // July carries the largest positive offset in the pattern.
        let july = values[6];
        let june = values[5];
        assert!(july > june + 4.0, "seasonal swing lost: june {june}, july {july}");
    }

    #[test]
    fn test_unsorted_input_is_handled() {
        let mut obs = monthly(2020, 24, |t| 50.0 + t as f64);
        obs.reverse();
        let fitted = fit_series(&obs).unwrap();
        assert_eq!(fitted.last_training_date, NaiveDate::from_ymd_opt(2021, 12, 1).unwrap());
    }
}
