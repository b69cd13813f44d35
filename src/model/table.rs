//! In-memory table of text-valued rows

use std::cmp::Ordering;

/// A table of text fields with named columns.
///
/// Every field is a `String`; absent values are represented as the empty
/// string, never as a separate null state. Rows are kept in insertion
/// order and each row has exactly `columns.len()` fields once loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    /// Column names, in field order
    pub columns: Vec<String>,
    /// Row data, one `Vec<String>` per row
    pub rows: Vec<Vec<String>>,
}

impl Table {
    /// Create a new empty table with column names
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// Append a row to the table
    pub fn push_row(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    /// Number of rows
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Check whether the table has no rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Sort rows ascending by the given column positions.
    ///
    /// The sort is stable, so rows with equal keys keep their relative
    /// order. Empty fields sort before any non-empty field, which places
    /// rows with missing sort keys first.
    pub fn sort_by_columns(&mut self, indices: &[usize]) {
        self.rows.sort_by(|a, b| {
            for &i in indices {
                let left = a.get(i).map(String::as_str).unwrap_or("");
                let right = b.get(i).map(String::as_str).unwrap_or("");
                match left.cmp(right) {
                    Ordering::Equal => {}
                    order => return order,
                }
            }
            Ordering::Equal
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(fields: &[&str]) -> Vec<String> {
        fields.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_sort_is_stable_and_ascending() {
        let mut table = Table::new(vec!["k".into(), "v".into()]);
        table.push_row(row(&["2", "first"]));
        table.push_row(row(&["1", "a"]));
        table.push_row(row(&["2", "second"]));

        table.sort_by_columns(&[0]);

        assert_eq!(table.rows[0], row(&["1", "a"]));
        assert_eq!(table.rows[1], row(&["2", "first"]));
        assert_eq!(table.rows[2], row(&["2", "second"]));
    }

    #[test]
    fn test_sort_places_empty_keys_first() {
        let mut table = Table::new(vec!["k".into()]);
        table.push_row(row(&["b"]));
        table.push_row(row(&[""]));
        table.push_row(row(&["a"]));

        table.sort_by_columns(&[0]);

        assert_eq!(table.rows[0], row(&[""]));
        assert_eq!(table.rows[1], row(&["a"]));
        assert_eq!(table.rows[2], row(&["b"]));
    }

    #[test]
    fn test_sort_by_multiple_columns() {
        let mut table = Table::new(vec!["a".into(), "b".into()]);
        table.push_row(row(&["1", "z"]));
        table.push_row(row(&["1", "y"]));
        table.push_row(row(&["0", "z"]));

        table.sort_by_columns(&[0, 1]);

        assert_eq!(table.rows[0], row(&["0", "z"]));
        assert_eq!(table.rows[1], row(&["1", "y"]));
        assert_eq!(table.rows[2], row(&["1", "z"]));
    }
}
