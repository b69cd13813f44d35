//! Mismatch explanation for key-matched rows
//!
//! Rows that land in the reference-only partition may not be genuinely
//! missing from the other file: the same key may exist there with one or
//! more damaged fields. This module re-joins the reference-only rows
//! against the other table by key and classifies each differing field.

use std::fmt;

use rustc_hash::FxHashMap;

use crate::error::CompareError;
use crate::model::Table;

/// Name of the report column holding the concatenated reasons
pub const REASONS_COLUMN: &str = "addl_reasons";

/// Suffix for the reference side of a joined column pair
pub const MAIN_SUFFIX: &str = "_main";

/// Suffix for the comparison side of a joined column pair
pub const OTRO_SUFFIX: &str = "_otro";

/// Why a key-matched field pair differs
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reason {
    /// Values agree once one side's leading whitespace is stripped
    LeadingWhitespace { column: String, value: String },
    /// Values agree once one side's trailing whitespace is stripped
    TrailingWhitespace { column: String, value: String },
    /// Values genuinely differ
    Mismatch {
        column: String,
        main: String,
        otro: String,
    },
}

impl fmt::Display for Reason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reason::LeadingWhitespace { column, value } => {
                write!(f, "leading whitespace on {column}: |{value}|")
            }
            Reason::TrailingWhitespace { column, value } => {
                write!(f, "trailing whitespace on {column}: |{value}|")
            }
            Reason::Mismatch { column, main, otro } => {
                write!(f, "mismatch on {column}: |{main}| <> |{otro}|")
            }
        }
    }
}

/// Classify the difference between a key-matched field pair.
///
/// Whitespace checks run first, so a field is never reported both as a
/// whitespace issue and as a generic mismatch. Identical values produce
/// no reason.
pub fn classify(column: &str, main: &str, otro: &str) -> Option<Reason> {
    if main == otro {
        return None;
    }

    if has_leading_whitespace(main) && main.trim_start() == otro {
        return Some(Reason::LeadingWhitespace {
            column: column.to_string(),
            value: main.to_string(),
        });
    }
    if has_leading_whitespace(otro) && otro.trim_start() == main {
        return Some(Reason::LeadingWhitespace {
            column: column.to_string(),
            value: otro.to_string(),
        });
    }
    if has_trailing_whitespace(main) && main.trim_end() == otro {
        return Some(Reason::TrailingWhitespace {
            column: column.to_string(),
            value: main.to_string(),
        });
    }
    if has_trailing_whitespace(otro) && otro.trim_end() == main {
        return Some(Reason::TrailingWhitespace {
            column: column.to_string(),
            value: otro.to_string(),
        });
    }

    Some(Reason::Mismatch {
        column: column.to_string(),
        main: main.to_string(),
        otro: otro.to_string(),
    })
}

fn has_leading_whitespace(s: &str) -> bool {
    s.chars().next().is_some_and(char::is_whitespace)
}

fn has_trailing_whitespace(s: &str) -> bool {
    s.chars().next_back().is_some_and(char::is_whitespace)
}

/// Join the reference-only partition against the other table on the key
/// columns and annotate every non-key field pair that differs.
///
/// The result has one row per (reference-only row, other row) pair that
/// shares a key: the key fields first, then a `_main`/`_otro` pair for
/// each non-key column, then the concatenated reasons. Pairs with no
/// detected reason still appear, with an empty reasons field, so that
/// unexplained mismatches surface for manual review.
pub fn explain(
    reference_only: &Table,
    other: &Table,
    key_columns: &[usize],
) -> Result<Table, CompareError> {
    let width = reference_only.column_count();
    if other.column_count() != width {
        return Err(CompareError::SchemaMismatch {
            reference: width,
            other: other.column_count(),
        });
    }
    for &k in key_columns {
        if k >= width {
            return Err(CompareError::ColumnOutOfRange { index: k, width });
        }
    }
    let value_columns: Vec<usize> = (0..width).filter(|i| !key_columns.contains(i)).collect();

    let mut columns: Vec<String> = key_columns
        .iter()
        .map(|&k| reference_only.columns[k].clone())
        .collect();
    for &i in &value_columns {
        columns.push(format!("{}{MAIN_SUFFIX}", reference_only.columns[i]));
        columns.push(format!("{}{OTRO_SUFFIX}", reference_only.columns[i]));
    }
    columns.push(REASONS_COLUMN.to_string());
    let mut report = Table::new(columns);

    // Multi-map from key tuple to row positions in the other table; a
    // shared key joins every pairing.
    let mut by_key: FxHashMap<Vec<&str>, Vec<usize>> = FxHashMap::default();
    for (idx, row) in other.rows.iter().enumerate() {
        let key: Vec<&str> = key_columns.iter().map(|&k| row[k].as_str()).collect();
        by_key.entry(key).or_default().push(idx);
    }

    for row in &reference_only.rows {
        let key: Vec<&str> = key_columns.iter().map(|&k| row[k].as_str()).collect();
        let Some(matched) = by_key.get(&key) else {
            continue;
        };
        for &other_idx in matched {
            let other_row = &other.rows[other_idx];
            let mut out: Vec<String> = key.iter().map(|k| k.to_string()).collect();
            let mut reasons: Vec<String> = Vec::new();
            for &i in &value_columns {
                let main = &row[i];
                let otro = &other_row[i];
                out.push(main.clone());
                out.push(otro.clone());
                if let Some(reason) = classify(&reference_only.columns[i], main, otro) {
                    reasons.push(reason.to_string());
                }
            }
            out.push(reasons.join("; "));
            report.push_row(out);
        }
    }

    Ok(report)
}
