//! `ferrocast ingest`: populate the history store from FRED.

use anyhow::Context;
use ferrocast_core::SeriesId;
use ferrocast_store::Database;
use tracing::{info, warn};

use crate::fred::FredClient;

/// Source tag written into every ingested row.
pub const SOURCE: &str = "FRED";

/// Built-in FRED-code → series-id mappings, covering the construction
/// materials and macro indicators the platform tracks.
pub const DEFAULT_SERIES: &[(&str, &str)] = &[
    ("WPU101702", "PPI_STEEL"),       // Steel Mill Products
    ("WPU102", "PPI_LUMBER"),         // Lumber and Wood Products
    ("PCU327320327320", "PPI_CONCRETE"), // Ready-Mix Concrete
    ("HOUST", "HOUSING_STARTS"),      // Housing Starts
    ("CPIAUCSL", "CPI_ALL"),          // Consumer Price Index
    ("FEDFUNDS", "FED_FUNDS_RATE"),   // Federal Funds Rate
];

/// Parses `CODE=ID` override mappings, falling back to the built-ins.
pub fn resolve_mappings(overrides: &[String]) -> anyhow::Result<Vec<(String, String)>> {
    if overrides.is_empty() {
        return Ok(DEFAULT_SERIES
            .iter()
            .map(|(code, id)| ((*code).to_string(), (*id).to_string()))
            .collect());
    }
    overrides
        .iter()
        .map(|raw| {
            let (code, id) = raw
                .split_once('=')
                .with_context(|| format!("expected CODE=ID, got '{raw}'"))?;
            if code.is_empty() || id.is_empty() {
                anyhow::bail!("expected CODE=ID, got '{raw}'");
            }
            Ok((code.to_string(), id.to_string()))
        })
        .collect()
}

/// Fetches every mapped series and replaces its rows in the history store.
///
/// Per-series fetch failures are logged and skipped; ingestion of the
/// remaining series continues.
pub async fn run(
    db: &Database,
    client: &FredClient,
    mappings: &[(String, String)],
) -> anyhow::Result<()> {
    for (code, series) in mappings {
        match client.fetch_series(code).await {
            Ok(observations) if observations.is_empty() => {
                warn!(code, series, "no observations returned; skipping");
            }
            Ok(observations) => {
                let id = SeriesId::new(series.clone())
                    .with_context(|| format!("invalid series id '{series}'"))?;
                let rows = db.replace_series(&id, &observations, SOURCE)?;
                info!(code, series, rows, "ingested series");
            }
            Err(err) => {
                warn!(code, series, error = %err, "fetch failed; skipping");
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_cover_the_tracked_series() {
        let mappings = resolve_mappings(&[]).unwrap();
        assert_eq!(mappings.len(), 6);
        assert!(mappings.iter().any(|(code, id)| code == "WPU101702" && id == "PPI_STEEL"));
    }

    #[test]
    fn test_overrides_replace_the_defaults() {
        let mappings =
            resolve_mappings(&["GOLDAMGBD228NLBM=GOLD_PRICE".to_string()]).unwrap();
        assert_eq!(mappings, vec![("GOLDAMGBD228NLBM".to_string(), "GOLD_PRICE".to_string())]);
    }

    #[test]
    fn test_malformed_overrides_are_rejected() {
        assert!(resolve_mappings(&["missing-separator".to_string()]).is_err());
        assert!(resolve_mappings(&["=NO_CODE".to_string()]).is_err());
        assert!(resolve_mappings(&["NO_ID=".to_string()]).is_err());
    }
}
