//! Error taxonomy for the dashboard pipeline.
//!
//! Only a broken dataset file is fatal for a render cycle. Everything else
//! (absent columns, filters that exclude every row) is a degradation state
//! carried as a [`SkipReason`], not an error.

use std::path::PathBuf;
use thiserror::Error;

/// Failures that abort the current render cycle.
#[derive(Debug, Error)]
pub enum DatasetError {
    /// The dataset file is missing or unreadable. The cycle halts with a
    /// user-visible message; there is no retry and no fallback dataset.
    #[error("dataset file not found: {}", path.display())]
    NotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file exists but is not parseable as headered CSV.
    #[error("failed to read dataset: {0}")]
    Csv(#[from] csv::Error),

    /// An exported artifact (chart spec, filtered view) could not be
    /// written.
    #[error("failed to write output: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to encode chart spec: {0}")]
    Json(#[from] serde_json::Error),
}

/// Why a chart derivation produced no data.
///
/// These are ordinary control-flow states: the presentation layer turns
/// them into informational notices and the rest of the cycle continues.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    MissingTemporalColumn,
    MissingGeographicColumn,
    NoNumericColumns,
    NoRows,
}

impl SkipReason {
    pub fn message(&self) -> &'static str {
        match self {
            SkipReason::MissingTemporalColumn => "missing temporal column",
            SkipReason::MissingGeographicColumn => "missing geographic column",
            SkipReason::NoNumericColumns => "no numeric columns",
            SkipReason::NoRows => "no rows after filtering",
        }
    }
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}
