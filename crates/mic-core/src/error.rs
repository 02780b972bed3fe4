// File: crates/mic-core/src/error.rs
// Summary: Error taxonomy for loading, validating, building and rendering MIC charts.

use thiserror::Error;

use crate::dataset::Antibiotic;

pub type Result<T, E = ChartError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum ChartError {
    /// A MIC value that cannot be log-transformed or classified.
    #[error("non-positive MIC {value} for {species} / {antibiotic}")]
    NonPositiveMic { species: String, antibiotic: Antibiotic, value: f64 },

    #[error("MIC value {0} is not a positive, finite number")]
    InvalidMic(f64),

    /// Annotation points at a (species, antibiotic) pair that is not in the data.
    #[error("annotation '{label}' references {species} / {antibiotic}, which is not in the dataset")]
    DanglingAnnotation { species: String, antibiotic: Antibiotic, label: String },

    #[error("duplicate species '{0}' in dataset")]
    DuplicateSpecies(String),

    #[error("row '{species}' has {got} MIC values, expected {expected}")]
    RowWidth { species: String, expected: usize, got: usize },

    #[error("missing column '{0}'")]
    MissingColumn(String),

    #[error("unknown antibiotic '{0}'")]
    UnknownAntibiotic(String),

    #[error("unknown gram stain '{0}' (expected 'positive' or 'negative')")]
    UnknownGramStain(String),

    #[error("unknown preset '{0}'")]
    UnknownPreset(String),

    #[error("invalid thresholds: {0}")]
    InvalidThresholds(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Long-form rows that cannot be folded back into a wide table.
    #[error("cannot pivot long-form rows: {0}")]
    Pivot(String),

    #[error("no usable fonts found; install a system font package (e.g. fontconfig with DejaVu fonts) and retry")]
    MissingFonts,

    #[error("render failed: {0}")]
    Render(#[source] anyhow::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
