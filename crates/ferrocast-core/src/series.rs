//! Series identifiers.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A series identifier was empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("series identifier must be non-empty")]
pub struct InvalidSeriesId;

/// Opaque key naming a forecastable series (e.g. "PPI_STEEL").
///
/// The only structural requirement is being non-empty; beyond that the
/// identifier passes through to artifact keys and database rows verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SeriesId(String);

impl SeriesId {
    /// Creates a series identifier, rejecting empty or whitespace-only input.
    pub fn new(id: impl Into<String>) -> Result<Self, InvalidSeriesId> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(InvalidSeriesId);
        }
        Ok(Self(id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SeriesId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl std::str::FromStr for SeriesId {
    type Err = InvalidSeriesId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}
