//! Run configuration loaded from a JSON file

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::CompareError;

/// Minimum number of input paths: one reference plus one comparison
pub const MIN_INPUT_PATHS: usize = 2;

/// One input file and how to read and compare it.
///
/// The first descriptor in the configured list is the reference; every
/// other descriptor is compared against it.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InputDescriptor {
    /// Path to the delimited file
    #[serde(rename = "name")]
    pub location: PathBuf,
    /// Whether the first row is a header
    pub has_header: bool,
    /// Carried from the configuration format; not consulted by the
    /// comparison pipeline, which always writes headers.
    pub include_header: bool,
    /// Column positions (in the file) to compare; must be non-empty
    pub columns_to_compare: Vec<usize>,
    /// Column positions (in the projected table) to sort by; the
    /// reference descriptor's entries double as the join key during
    /// mismatch explanation
    pub columns_to_sort_by: Vec<usize>,
}

/// The whole run: an ordered list of inputs plus an output directory
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunConfig {
    pub paths: Vec<InputDescriptor>,
    pub output_directory: PathBuf,
}

impl RunConfig {
    /// Load and deserialize a JSON run configuration
    pub fn from_file(path: &Path) -> Result<Self, CompareError> {
        if !path.is_file() {
            return Err(CompareError::InputNotFound(path.to_path_buf()));
        }
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Check the configuration before any comparison runs.
    ///
    /// Enforces the minimum descriptor count, a non-empty compare-column
    /// list per descriptor, and that every input location is a readable
    /// file. Any violation is fatal; nothing is written.
    pub fn validate(&self) -> Result<(), CompareError> {
        if self.paths.len() < MIN_INPUT_PATHS {
            return Err(CompareError::TooFewInputs {
                found: self.paths.len(),
                min: MIN_INPUT_PATHS,
            });
        }
        for descriptor in &self.paths {
            if !descriptor.location.is_file() {
                return Err(CompareError::InputNotFound(descriptor.location.clone()));
            }
            if descriptor.columns_to_compare.is_empty() {
                return Err(CompareError::NoCompareColumns(descriptor.location.clone()));
            }
        }
        Ok(())
    }
}
