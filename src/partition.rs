//! Three-way set partition of table rows

use indexmap::IndexSet;
use rustc_hash::FxBuildHasher;

use crate::error::CompareError;
use crate::model::Table;

/// Insertion-ordered set of borrowed rows
type RowSet<'a> = IndexSet<&'a [String], FxBuildHasher>;

/// The three disjoint row sets produced by one comparison
#[derive(Debug)]
pub struct Partition {
    /// Distinct rows present in the reference table only
    pub reference_only: Table,
    /// Distinct rows present in the other table only
    pub other_only: Table,
    /// Distinct rows present in both tables
    pub both: Table,
}

/// Partition the distinct rows of `reference` and `other` into
/// reference-only, other-only, and common sets.
///
/// Rows are compared positionally by exact string equality over the full
/// row; no trimming or case folding happens here, so the "only" sets
/// reflect literal file content. All three output tables carry the
/// reference table's column names, and each preserves first-occurrence
/// row order from its source table. Duplicate rows collapse to one
/// occurrence (set semantics).
pub fn partition(reference: &Table, other: &Table) -> Result<Partition, CompareError> {
    if reference.column_count() != other.column_count() {
        return Err(CompareError::SchemaMismatch {
            reference: reference.column_count(),
            other: other.column_count(),
        });
    }

    let reference_rows: RowSet = reference.rows.iter().map(Vec::as_slice).collect();
    let other_rows: RowSet = other.rows.iter().map(Vec::as_slice).collect();

    let mut reference_only = Table::new(reference.columns.clone());
    let mut other_only = Table::new(reference.columns.clone());
    let mut both = Table::new(reference.columns.clone());

    for &row in &reference_rows {
        if other_rows.contains(row) {
            both.push_row(row.to_vec());
        } else {
            reference_only.push_row(row.to_vec());
        }
    }
    for &row in &other_rows {
        if !reference_rows.contains(row) {
            other_only.push_row(row.to_vec());
        }
    }

    Ok(Partition {
        reference_only,
        other_only,
        both,
    })
}
