//! Error types for the comparison pipeline

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading, partitioning, or explaining tables
#[derive(Debug, Error)]
pub enum CompareError {
    #[error("not a file: {0}")]
    InputNotFound(PathBuf),

    #[error("no column numbers given so no comparison can be performed on file {0}")]
    NoCompareColumns(PathBuf),

    #[error("{found} input paths less than {min}, the minimum allowed")]
    TooFewInputs { found: usize, min: usize },

    #[error("schema mismatch: reference table has {reference} columns, comparison table has {other}")]
    SchemaMismatch { reference: usize, other: usize },

    #[error("column index {index} out of range for table with {width} columns")]
    ColumnOutOfRange { index: usize, width: usize },

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("invalid run configuration: {0}")]
    Config(#[from] serde_json::Error),
}
