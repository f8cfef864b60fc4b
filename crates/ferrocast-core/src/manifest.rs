//! Model manifests.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The one field the serving path requires from a manifest.
pub const LAST_TRAINING_DATE: &str = "last_training_date";

/// Metadata persisted alongside a model artifact.
///
/// `last_training_date` is kept as the raw string the training job wrote;
/// it is parsed at generation time. All fields the serving path does not
/// understand are carried in `extra` and written back out unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelManifest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub series_id: Option<String>,
    pub last_training_date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trained_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_commit: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ModelManifest {
    /// Starts a manifest for a freshly trained model.
    pub fn new(series_id: impl Into<String>, last_training_date: NaiveDate) -> Self {
        Self {
            series_id: Some(series_id.into()),
            last_training_date: last_training_date.format("%Y-%m-%d").to_string(),
            model_type: None,
            trained_at: None,
            source_commit: None,
            extra: Map::new(),
        }
    }

    #[must_use]
    pub fn with_model_type(mut self, model_type: impl Into<String>) -> Self {
        self.model_type = Some(model_type.into());
        self
    }

    #[must_use]
    pub fn with_trained_at(mut self, trained_at: DateTime<Utc>) -> Self {
        self.trained_at = Some(trained_at);
        self
    }

    #[must_use]
    pub fn with_source_commit(mut self, commit: impl Into<String>) -> Self {
        self.source_commit = Some(commit.into());
        self
    }

    /// Decodes manifest bytes, distinguishing a malformed document from a
    /// well-formed one that is missing its required field. Both storage
    /// backends go through this so their failure behavior stays symmetric.
    pub fn decode(bytes: &[u8]) -> Result<Self, ManifestDecodeError> {
        let value: Value = serde_json::from_slice(bytes).map_err(ManifestDecodeError::Malformed)?;
        let has_date = value
            .get(LAST_TRAINING_DATE)
            .and_then(Value::as_str)
            .map(str::trim)
            .is_some_and(|raw| !raw.is_empty());
        if !has_date {
            return Err(ManifestDecodeError::MissingField(LAST_TRAINING_DATE));
        }
        serde_json::from_value(value).map_err(ManifestDecodeError::Malformed)
    }
}

/// Why manifest bytes could not be decoded.
#[derive(Debug)]
pub enum ManifestDecodeError {
    /// Not a JSON document (or not the shape of a manifest).
    Malformed(serde_json::Error),
    /// A required field is absent or empty.
    MissingField(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_requires_last_training_date() {
        let err = ModelManifest::decode(br#"{"series_id": "PPI_STEEL"}"#).unwrap_err();
        assert!(matches!(err, ManifestDecodeError::MissingField(LAST_TRAINING_DATE)));

        // An empty date string counts as missing, not malformed.
        let err =
            ModelManifest::decode(br#"{"last_training_date": "  "}"#).unwrap_err();
        assert!(matches!(err, ManifestDecodeError::MissingField(_)));
    }

    #[test]
    fn test_decode_rejects_non_json() {
        let err = ModelManifest::decode(b"not json at all").unwrap_err();
        assert!(matches!(err, ManifestDecodeError::Malformed(_)));
    }

    #[test]
    fn test_unknown_fields_round_trip_through_extra() {
        let bytes = br#"{
            "series_id": "PPI_STEEL",
            "last_training_date": "2023-01-31",
            "model_type": "seasonal_additive (12)",
            "accuracy_mape": 3.2,
            "notes": "baseline"
        }"#;
        let manifest = ModelManifest::decode(bytes).unwrap();
        assert_eq!(manifest.last_training_date, "2023-01-31");
        assert_eq!(manifest.extra["accuracy_mape"], 3.2);
        assert_eq!(manifest.extra["notes"], "baseline");

        let rewritten = serde_json::to_vec(&manifest).unwrap();
        let reparsed = ModelManifest::decode(&rewritten).unwrap();
        assert_eq!(reparsed, manifest);
    }

    #[test]
    fn test_builder_formats_date_as_iso() {
        let manifest = ModelManifest::new(
            "PPI_STEEL",
            NaiveDate::from_ymd_opt(2023, 1, 31).unwrap(),
        );
        assert_eq!(manifest.last_training_date, "2023-01-31");
        assert_eq!(manifest.series_id.as_deref(), Some("PPI_STEEL"));
    }
}
