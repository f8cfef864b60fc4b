//! `ferrocast train`: fit and persist forecast models.

use ferrocast_core::SeriesId;
use ferrocast_store::{ArtifactStore, Database};
use ferrocast_training::{train_all, train_series};
use tracing::info;

/// Trains one series, or every series in the history store.
pub async fn run(
    db: &Database,
    store: &dyn ArtifactStore,
    series: Option<String>,
) -> anyhow::Result<()> {
    match series {
        Some(raw) => {
            let id = SeriesId::new(raw)?;
            train_series(db, store, &id).await?;
            info!(series = %id, "training complete");
        }
        None => {
            let summary = train_all(db, store).await?;
            info!(
                trained = summary.trained.len(),
                skipped = summary.skipped.len(),
                "training complete"
            );
        }
    }
    Ok(())
}
