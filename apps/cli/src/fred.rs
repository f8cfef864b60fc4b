//! FRED API client.
//!
//! Fetches series observations from the St. Louis Fed's FRED API. FRED
//! encodes missing values as "."; those rows (and anything else that does
//! not parse as a number) are dropped before reaching the history store.

use chrono::NaiveDate;
use ferrocast_core::Observation;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

/// Observations endpoint of the FRED API.
pub const FRED_BASE_URL: &str = "https://api.stlouisfed.org/fred/series/observations";

/// Errors from fetching a series.
#[derive(Debug, Error)]
pub enum FredError {
    #[error("FRED request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unreadable FRED response: {0}")]
    Decode(#[from] serde_json::Error),
}

#[derive(Debug, Deserialize)]
struct ObservationsResponse {
    #[serde(default)]
    observations: Vec<RawObservation>,
}

#[derive(Debug, Deserialize)]
struct RawObservation {
    date: NaiveDate,
    value: String,
}

/// Decodes a FRED observations payload, dropping missing values.
pub fn decode_observations(body: &str) -> Result<Vec<Observation>, serde_json::Error> {
    let payload: ObservationsResponse = serde_json::from_str(body)?;
    Ok(payload
        .observations
        .into_iter()
        .filter_map(|raw| {
            raw.value.parse::<f64>().ok().map(|value| Observation::new(raw.date, value))
        })
        .collect())
}

/// Thin client over the observations endpoint.
pub struct FredClient {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl FredClient {
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, FRED_BASE_URL.to_string())
    }

    /// For pointing at a stand-in endpoint in tests.
    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        Self { client: reqwest::Client::new(), api_key, base_url }
    }

    /// Fetches all observations for one FRED series code.
    pub async fn fetch_series(&self, code: &str) -> Result<Vec<Observation>, FredError> {
        debug!(code, "fetching series from FRED");
        let body = self
            .client
            .get(&self.base_url)
            .query(&[
                ("series_id", code),
                ("api_key", self.api_key.as_str()),
                ("file_type", "json"),
            ])
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        Ok(decode_observations(&body)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_drops_missing_values() {
        let body = r#"{
            "observations": [
                {"date": "2023-01-01", "value": "142.5"},
                {"date": "2023-02-01", "value": "."},
                {"date": "2023-03-01", "value": "143.1"}
            ]
        }"#;
        let obs = decode_observations(body).unwrap();
        assert_eq!(obs.len(), 2);
        assert_eq!(obs[0].value, 142.5);
        assert_eq!(obs[1].date, NaiveDate::from_ymd_opt(2023, 3, 1).unwrap());
    }

    #[test]
    fn test_decode_tolerates_an_empty_series() {
        assert!(decode_observations(r#"{"observations": []}"#).unwrap().is_empty());
        assert!(decode_observations("{}").unwrap().is_empty());
    }

    #[test]
    fn test_decode_rejects_garbage() {
        assert!(decode_observations("<html>rate limited</html>").is_err());
    }
}
