//! Training jobs.

use chrono::Utc;
use ferrocast_core::{ModelManifest, SeriesId};
use ferrocast_store::{ArtifactStore, Database};
use tracing::{info, warn};

use crate::error::{TrainingError, TrainingResult};
use crate::fit::fit_series;

/// Model-type tag written into every manifest.
pub const MODEL_TYPE: &str = "seasonal_additive (12)";

/// Outcome of a train-all run.
#[derive(Debug, Default)]
pub struct TrainingSummary {
    pub trained: Vec<String>,
    pub skipped: Vec<String>,
}

/// Fits and persists a model for one series.
pub async fn train_series(
    db: &Database,
    store: &dyn ArtifactStore,
    id: &SeriesId,
) -> TrainingResult<()> {
    let history = db.series_history(id)?;
    let fitted = fit_series(&history)?;

    let mut manifest = ModelManifest::new(id.as_str(), fitted.last_training_date)
        .with_model_type(MODEL_TYPE)
        .with_trained_at(Utc::now());
    if let Ok(commit) = std::env::var("SOURCE_COMMIT") {
        manifest = manifest.with_source_commit(commit);
    }

    store.save_model(id, &fitted.artifact, &manifest).await?;
    info!(
        series = %id,
        last_training_date = %fitted.last_training_date,
        observations = history.len(),
        "trained and saved model"
    );
    Ok(())
}

/// Fits and persists a model for every series in the history store.
///
/// Per-series failures (usually too little history) are logged and counted,
/// never abort the run.
pub async fn train_all(db: &Database, store: &dyn ArtifactStore) -> TrainingResult<TrainingSummary> {
    let series_list = db.distinct_series()?;
    info!(count = series_list.len(), "training models for all series");

    let mut summary = TrainingSummary::default();
    for raw in series_list {
        let Ok(id) = SeriesId::new(raw.clone()) else {
            warn!(series = %raw, "skipping unusable series identifier");
            summary.skipped.push(raw);
            continue;
        };
        match train_series(db, store, &id).await {
            Ok(()) => summary.trained.push(raw),
            Err(err) => {
                warn!(series = %raw, error = %err, "skipping series");
                summary.skipped.push(raw);
            }
        }
    }
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use ferrocast_core::Observation;
    use ferrocast_store::LocalArtifactStore;
    use tempfile::TempDir;

    fn seeded_db(series: &[(&str, usize)]) -> Database {
        let db = Database::open_in_memory().unwrap();
        for (id, months) in series {
            let obs: Vec<Observation> = (0..*months)
                .map(|t| {
                    let year = 2020 + (t / 12) as i32;
                    let month = (t % 12) as u32 + 1;
                    Observation::new(
                        NaiveDate::from_ymd_opt(year, month, 1).unwrap(),
                        100.0 + t as f64,
                    )
                })
                .collect();
            db.replace_series(&SeriesId::new(*id).unwrap(), &obs, "FRED").unwrap();
        }
        db
    }

    #[tokio::test]
    async fn test_train_series_persists_loadable_artifacts() {
        let dir = TempDir::new().unwrap();
        let store = LocalArtifactStore::new(dir.path().to_path_buf());
        let db = seeded_db(&[("PPI_STEEL", 36)]);
        let id = SeriesId::new("PPI_STEEL").unwrap();

        train_series(&db, &store, &id).await.unwrap();

        let manifest = store.load_manifest(&id).await.unwrap();
        assert_eq!(manifest.last_training_date, "2022-12-01");
        assert_eq!(manifest.model_type.as_deref(), Some(MODEL_TYPE));
        assert!(manifest.trained_at.is_some());

        let model = store.load_model(&id).await.unwrap();
        assert_eq!(model.forecast(12).unwrap().len(), 12);
    }

    #[tokio::test]
    async fn test_train_all_counts_thin_series_as_skipped() {
        let dir = TempDir::new().unwrap();
        let store = LocalArtifactStore::new(dir.path().to_path_buf());
        let db = seeded_db(&[("PPI_STEEL", 36), ("PPI_NEW", 6)]);

        let summary = train_all(&db, &store).await.unwrap();
        assert_eq!(summary.trained, vec!["PPI_STEEL"]);
        assert_eq!(summary.skipped, vec!["PPI_NEW"]);
    }
}
