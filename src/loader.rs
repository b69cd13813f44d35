//! CSV table loader

use std::path::Path;

use crate::error::CompareError;
use crate::model::Table;

/// Load a delimited file into a [`Table`].
///
/// Every field is read as text, with no numeric or date coercion, so that
/// comparisons are never corrupted by type inference. Short rows are
/// padded with empty strings. When `has_header` is false, column names
/// `col0..colN` are synthesized.
///
/// `columns`, when given, projects the table to exactly those column
/// indices (positions in the file), in the given order. `sort_by` indices
/// refer to positions in the *projected* table and trigger a stable
/// ascending sort with missing (empty) keys first.
pub fn load(
    location: &Path,
    has_header: bool,
    columns: Option<&[usize]>,
    sort_by: Option<&[usize]>,
) -> Result<Table, CompareError> {
    if !location.is_file() {
        return Err(CompareError::InputNotFound(location.to_path_buf()));
    }

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(has_header)
        .flexible(true)
        .from_path(location)?;

    let mut names: Vec<String> = if has_header {
        reader.headers()?.iter().map(|s| s.to_string()).collect()
    } else {
        Vec::new()
    };

    let mut rows: Vec<Vec<String>> = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(record.iter().map(|s| s.to_string()).collect());
    }

    // Widest row wins; headers and short rows are padded up to it.
    let width = rows
        .iter()
        .map(Vec::len)
        .max()
        .unwrap_or(0)
        .max(names.len());
    if names.len() < width {
        names.extend((names.len()..width).map(|i| format!("col{i}")));
    }
    for row in &mut rows {
        row.resize(width, String::new());
    }

    let mut table = match columns {
        Some(selected) => project(&names, &rows, selected, width)?,
        None => {
            let mut table = Table::new(names);
            table.rows = rows;
            table
        }
    };

    if let Some(keys) = sort_by {
        for &i in keys {
            if i >= table.column_count() {
                return Err(CompareError::ColumnOutOfRange {
                    index: i,
                    width: table.column_count(),
                });
            }
        }
        table.sort_by_columns(keys);
    }

    Ok(table)
}

/// Restrict names and rows to the selected column positions, in order
fn project(
    names: &[String],
    rows: &[Vec<String>],
    selected: &[usize],
    width: usize,
) -> Result<Table, CompareError> {
    for &i in selected {
        if i >= width {
            return Err(CompareError::ColumnOutOfRange { index: i, width });
        }
    }

    let columns = selected.iter().map(|&i| names[i].clone()).collect();
    let mut table = Table::new(columns);
    for row in rows {
        table.push_row(selected.iter().map(|&i| row[i].clone()).collect());
    }
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    use tempfile::NamedTempFile;

    fn csv_file(contents: &str) -> NamedTempFile {
        let mut file = tempfile::Builder::new()
            .suffix(".csv")
            .tempfile()
            .unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_with_header() {
        let file = csv_file("id,name\n1,Alice\n2,Bob\n");
        let table = load(file.path(), true, None, None).unwrap();

        assert_eq!(table.columns, vec!["id", "name"]);
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.rows[0], vec!["1", "Alice"]);
    }

    #[test]
    fn test_load_without_header_synthesizes_names() {
        let file = csv_file("1,Alice\n2,Bob\n");
        let table = load(file.path(), false, None, None).unwrap();

        assert_eq!(table.columns, vec!["col0", "col1"]);
        assert_eq!(table.row_count(), 2);
    }

    #[test]
    fn test_short_rows_padded_with_empty_strings() {
        let file = csv_file("a,b,c\n1,2,3\n4\n");
        let table = load(file.path(), true, None, None).unwrap();

        assert_eq!(table.rows[1], vec!["4", "", ""]);
    }

    #[test]
    fn test_projection_selects_columns_in_given_order() {
        let file = csv_file("a,b,c\n1,2,3\n");
        let table = load(file.path(), true, Some(&[2, 0]), None).unwrap();

        assert_eq!(table.columns, vec!["c", "a"]);
        assert_eq!(table.rows[0], vec!["3", "1"]);
    }

    #[test]
    fn test_projection_out_of_range_is_error() {
        let file = csv_file("a,b\n1,2\n");
        let err = load(file.path(), true, Some(&[5]), None).unwrap_err();

        assert!(matches!(
            err,
            CompareError::ColumnOutOfRange { index: 5, width: 2 }
        ));
    }

    #[test]
    fn test_sort_indices_refer_to_projected_table() {
        let file = csv_file("a,b,c\nx,9,3\ny,8,1\nz,7,2\n");
        let table = load(file.path(), true, Some(&[2, 0]), Some(&[0])).unwrap();

        // Sorted by original column "c", which is position 0 after projection.
        assert_eq!(table.rows[0], vec!["1", "y"]);
        assert_eq!(table.rows[1], vec!["2", "z"]);
        assert_eq!(table.rows[2], vec!["3", "x"]);
    }

    #[test]
    fn test_missing_sort_keys_come_first() {
        let file = csv_file("k,v\nb,1\n,2\na,3\n");
        let table = load(file.path(), true, None, Some(&[0])).unwrap();

        assert_eq!(table.rows[0], vec!["", "2"]);
        assert_eq!(table.rows[1], vec!["a", "3"]);
        assert_eq!(table.rows[2], vec!["b", "1"]);
    }

    #[test]
    fn test_whitespace_in_fields_is_preserved() {
        let file = csv_file("id,name\n1,Bob \n2, Eve\n");
        let table = load(file.path(), true, None, None).unwrap();

        assert_eq!(table.rows[0][1], "Bob ");
        assert_eq!(table.rows[1][1], " Eve");
    }

    #[test]
    fn test_missing_file_is_not_found() {
        let err = load(Path::new("/no/such/file.csv"), true, None, None).unwrap_err();
        assert!(matches!(err, CompareError::InputNotFound(_)));
    }
}
