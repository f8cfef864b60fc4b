//! Forecast generation.
//!
//! A pure transformation from (model, last training date, horizon) to a
//! dated sequence of predictions. No I/O happens here; the orchestrator is
//! responsible for resolving the model and manifest first.

use chrono::{Datelike, NaiveDate, NaiveDateTime};

use crate::error::GenerationError;
use crate::forecast::{Forecast, ForecastPoint};
use crate::model::ModelArtifact;

/// Generates `horizon` monthly predictions from a resolved model.
///
/// Future dates are the `horizon` consecutive first-of-month dates strictly
/// after `last_training_date`, stepping by whole calendar months. Values are
/// rounded to 2 decimal places before being placed in the result; that
/// rounding is part of the forecast format, and the cache round-trip
/// depends on it.
pub fn generate(
    model: &ModelArtifact,
    last_training_date: &str,
    horizon: i64,
) -> Result<Forecast, GenerationError> {
    if horizon <= 0 {
        return Err(GenerationError::InvalidHorizon(horizon));
    }
    let last = parse_calendar_date(last_training_date)
        .ok_or_else(|| GenerationError::InvalidDate(last_training_date.to_string()))?;

    let steps = horizon as usize;
    let values = model.forecast(steps)?;
    debug_assert_eq!(values.len(), steps);

    let mut points = Vec::with_capacity(steps);
    let mut date = first_of_following_month(last);
    for value in values {
        points.push(ForecastPoint { date, value: round2(value) });
        date = first_of_following_month(date);
    }
    Ok(Forecast::from_points(points))
}

/// First day of the month strictly after `date`.
///
/// Steps a whole calendar month regardless of month length, so
/// 2023-01-31 maps to 2023-02-01 and 2023-12-15 to 2024-01-01.
pub fn first_of_following_month(date: NaiveDate) -> NaiveDate {
    let (year, month) = if date.month() == 12 {
        (date.year() + 1, 1)
    } else {
        (date.year(), date.month() + 1)
    };
    NaiveDate::from_ymd_opt(year, month, 1).expect("first of month is always a valid date")
}

/// Parses a calendar date out of an ISO-like string, ignoring any
/// time-of-day component (the training job historically emitted
/// `YYYY-MM-DD HH:MM:SS` strings).
pub fn parse_calendar_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(datetime) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S") {
        return Some(datetime.date());
    }
    if let Ok(datetime) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S") {
        return Some(datetime.date());
    }
    None
}

/// Rounds to the 2-decimal contract of the forecast format.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
