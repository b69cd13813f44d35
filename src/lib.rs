//! csvpart - Set-based comparison for delimited tabular files
//!
//! Partitions the rows of two or more CSV files into reference-only,
//! other-only, and common sets, then diagnoses why key-matched rows fell
//! out of the common set (whitespace damage or genuine value mismatches).

pub mod config;
pub mod error;
pub mod explain;
pub mod loader;
pub mod model;
pub mod output;
pub mod partition;

pub use config::RunConfig;
pub use error::CompareError;
pub use model::Table;
pub use partition::Partition;
