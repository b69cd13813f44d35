//! Persistence of partitions and the diagnostic report

use std::fs;
use std::path::{Path, PathBuf};

use csv::{QuoteStyle, WriterBuilder};

use crate::error::CompareError;
use crate::model::Table;
use crate::partition::Partition;

/// Fixed name of the diagnostic report file
pub const REPORT_FILE_NAME: &str = "unmatching_reasons.csv";

/// Write the three partition tables under `out_dir`, deriving each file
/// name from the comparison file's name, and return the destinations.
///
/// Partition files are written with quoting suppressed, so a field that
/// contains the delimiter corrupts the output. That is a documented
/// limitation the caller accepts by construction of its inputs.
pub fn write_partition(
    partition: &Partition,
    source: &Path,
    out_dir: &Path,
) -> Result<[PathBuf; 3], CompareError> {
    fs::create_dir_all(out_dir)?;

    let stem = source
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let ext = source
        .extension()
        .map(|e| format!(".{}", e.to_string_lossy()))
        .unwrap_or_default();
    let destination = |suffix: &str| out_dir.join(format!("out_{stem}{suffix}{ext}"));

    let paths = [
        destination("_inmainfileonly"),
        destination("_insecondfileonly"),
        destination("_inbothfiles"),
    ];
    let tables = [
        &partition.reference_only,
        &partition.other_only,
        &partition.both,
    ];
    for (table, path) in tables.into_iter().zip(&paths) {
        write_table(table, path, QuoteStyle::Never)?;
    }

    Ok(paths)
}

/// Write the diagnostic report under its fixed name and return the path
pub fn write_report(report: &Table, out_dir: &Path) -> Result<PathBuf, CompareError> {
    fs::create_dir_all(out_dir)?;
    let path = out_dir.join(REPORT_FILE_NAME);
    write_table(report, &path, QuoteStyle::Necessary)?;
    Ok(path)
}

fn write_table(table: &Table, path: &Path, quoting: QuoteStyle) -> Result<(), CompareError> {
    let mut writer = WriterBuilder::new().quote_style(quoting).from_path(path)?;
    writer.write_record(&table.columns)?;
    for row in &table.rows {
        writer.write_record(row)?;
    }
    writer.flush()?;
    Ok(())
}
