//! Compact textual encoding of a forecast for cache entries.
//!
//! Entries are `YYYY-MM-DD=value` pairs joined with `;`. Values are written
//! with Rust's shortest-round-trip float formatting, so the 2-decimal values
//! the generator emits decode back bit-identical; the codec itself never
//! rounds.

use chrono::NaiveDate;
use ferrocast_core::ForecastPoint;
use thiserror::Error;

/// A cache entry that could not be decoded.
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("malformed cache entry segment '{0}'")]
    Malformed(String),
}

pub fn encode(points: &[ForecastPoint]) -> String {
    points
        .iter()
        .map(|point| format!("{}={}", point.date.format("%Y-%m-%d"), point.value))
        .collect::<Vec<_>>()
        .join(";")
}

pub fn decode(raw: &str) -> Result<Vec<ForecastPoint>, CodecError> {
    // An empty payload never comes from `encode` on a real forecast
    // (horizon is always positive); reject it rather than serve nothing.
    if raw.is_empty() {
        return Err(CodecError::Malformed(String::new()));
    }
    raw.split(';')
        .map(|segment| {
            let (date, value) = segment
                .split_once('=')
                .ok_or_else(|| CodecError::Malformed(segment.to_string()))?;
            let date = NaiveDate::parse_from_str(date, "%Y-%m-%d")
                .map_err(|_| CodecError::Malformed(segment.to_string()))?;
            let value = value
                .parse::<f64>()
                .map_err(|_| CodecError::Malformed(segment.to_string()))?;
            Ok(ForecastPoint { date, value })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(y: i32, m: u32, value: f64) -> ForecastPoint {
        ForecastPoint { date: NaiveDate::from_ymd_opt(y, m, 1).unwrap(), value }
    }

    #[test]
    fn test_round_trip_preserves_dates_and_two_decimal_values() {
        let points = vec![point(2023, 2, 142.13), point(2023, 3, 141.9), point(2023, 4, -0.25)];
        let decoded = decode(&encode(&points)).unwrap();
        assert_eq!(decoded, points);
    }

    #[test]
    fn test_encoded_form_is_the_documented_pair_format() {
        let encoded = encode(&[point(2023, 2, 100.5), point(2023, 3, 101.0)]);
        assert_eq!(encoded, "2023-02-01=100.5;2023-03-01=101");
    }

    #[test]
    fn test_malformed_entries_are_rejected() {
        assert!(decode("").is_err());
        assert!(decode("2023-02-01").is_err());
        assert!(decode("2023-02-01=abc").is_err());
        assert!(decode("not-a-date=1.0").is_err());
        // One bad segment poisons the whole entry.
        assert!(decode("2023-02-01=1.0;garbage").is_err());
    }
}
