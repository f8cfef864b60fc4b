//! Artifact naming convention, shared by both backends.
//!
//! One convention, applied uniformly to save and load: `{id}_model.json`
//! and `{id}_manifest.json`. The local backend resolves those names under a
//! models root directory; the S3 backend maps the same names under a
//! `models/` key prefix, so the two backends are drop-in replacements for
//! each other.

use ferrocast_core::SeriesId;
use std::path::{Path, PathBuf};

/// Key prefix for artifacts in an object-storage bucket.
pub const OBJECT_PREFIX: &str = "models";

pub fn model_file_name(id: &SeriesId) -> String {
    format!("{}_model.json", id.as_str())
}

pub fn manifest_file_name(id: &SeriesId) -> String {
    format!("{}_manifest.json", id.as_str())
}

pub fn model_object_key(id: &SeriesId) -> String {
    format!("{OBJECT_PREFIX}/{}", model_file_name(id))
}

pub fn manifest_object_key(id: &SeriesId) -> String {
    format!("{OBJECT_PREFIX}/{}", manifest_file_name(id))
}

/// Filesystem layout for model artifacts under a models root directory.
#[derive(Debug, Clone)]
pub struct ModelsLayout {
    root: PathBuf,
}

impl ModelsLayout {
    #[must_use]
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    #[must_use]
    pub fn model_path(&self, id: &SeriesId) -> PathBuf {
        self.root.join(model_file_name(id))
    }

    #[must_use]
    pub fn manifest_path(&self, id: &SeriesId) -> PathBuf {
        self.root.join(manifest_file_name(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_local_paths_and_object_keys_agree_on_file_names() {
        let id = SeriesId::new("PPI_STEEL").unwrap();
        let layout = ModelsLayout::new(PathBuf::from("ml/models"));

        assert!(layout.model_path(&id).ends_with("PPI_STEEL_model.json"));
        assert!(layout.manifest_path(&id).ends_with("PPI_STEEL_manifest.json"));
        assert_eq!(model_object_key(&id), "models/PPI_STEEL_model.json");
        assert_eq!(manifest_object_key(&id), "models/PPI_STEEL_manifest.json");
    }
}
