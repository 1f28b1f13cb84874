//! Tabular data structures.
//!
//! - [`RawTable`] - the as-loaded wide table (headers + string rows)
//! - [`TidyTable`] - the reshaped per-year table
//! - [`load`] - CSV loading with encoding and delimiter auto-detection
//!
//! Tables are plain values: every operation returns a new table and
//! leaves its input untouched.

pub mod load;
mod tidy;

pub use load::{load_bytes, load_table, LoadMeta};
pub use tidy::TidyTable;
pub(crate) use tidy::parse_cell;

use std::collections::HashMap;

use crate::error::TableError;

/// A wide table as loaded from CSV: one header per column, one string
/// cell per row and column.
///
/// Rows are padded (or truncated) to the header length on
/// construction, so every row has exactly `headers.len()` cells.
#[derive(Debug, Clone, PartialEq)]
pub struct RawTable {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl RawTable {
    /// Build a table, normalizing every row to the header length.
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        let width = headers.len();
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.resize(width, String::new());
                row
            })
            .collect();
        Self { headers, rows }
    }

    /// Column labels, in source order.
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Data rows, in source order.
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Number of data rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// True if the table holds no data rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of a column, if present.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// All values of one column, in row order.
    pub fn column(&self, name: &str) -> Result<Vec<&str>, TableError> {
        let idx = self
            .column_index(name)
            .ok_or_else(|| TableError::MissingColumn(name.to_string()))?;
        Ok(self.rows.iter().map(|row| row[idx].as_str()).collect())
    }

    /// A single cell, by row position and column name.
    pub fn cell(&self, row: usize, column: &str) -> Option<&str> {
        let idx = self.column_index(column)?;
        self.rows.get(row).map(|r| r[idx].as_str())
    }

    /// Rename columns through a keyed mapping.
    ///
    /// Labels without an entry in the mapping pass through unchanged;
    /// mapping entries that match no column have no effect.
    pub fn rename_columns(&self, mapping: &HashMap<String, String>) -> RawTable {
        let headers = self
            .headers
            .iter()
            .map(|h| mapping.get(h).unwrap_or(h).clone())
            .collect();
        RawTable {
            headers,
            rows: self.rows.clone(),
        }
    }

    /// Keep only the rows whose `column` cell equals `value`,
    /// preserving row order. Zero matches is legal.
    pub fn filter_eq(&self, column: &str, value: &str) -> Result<RawTable, TableError> {
        let idx = self
            .column_index(column)
            .ok_or_else(|| TableError::MissingColumn(column.to_string()))?;
        let rows = self
            .rows
            .iter()
            .filter(|row| row[idx] == value)
            .cloned()
            .collect();
        Ok(RawTable {
            headers: self.headers.clone(),
            rows,
        })
    }

    /// Drop the named columns; names that match nothing are ignored.
    pub fn drop_columns(&self, names: &[&str]) -> RawTable {
        let keep: Vec<usize> = self
            .headers
            .iter()
            .enumerate()
            .filter(|(_, h)| !names.contains(&h.as_str()))
            .map(|(i, _)| i)
            .collect();
        let headers = keep.iter().map(|&i| self.headers[i].clone()).collect();
        let rows = self
            .rows
            .iter()
            .map(|row| keep.iter().map(|&i| row[i].clone()).collect())
            .collect();
        RawTable { headers, rows }
    }
}

/// True for the markers this dataset uses for an absent value: the
/// empty cell and the World Bank `..` placeholder.
pub(crate) fn is_missing(value: &str) -> bool {
    value.is_empty() || value == ".."
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> RawTable {
        RawTable::new(
            vec!["a".to_string(), "b".to_string(), "c".to_string()],
            vec![
                vec!["1".to_string(), "x".to_string(), "10".to_string()],
                vec!["2".to_string(), "y".to_string(), "20".to_string()],
                vec!["3".to_string(), "x".to_string(), "30".to_string()],
            ],
        )
    }

    #[test]
    fn test_rows_padded_to_header_length() {
        let t = RawTable::new(
            vec!["a".to_string(), "b".to_string(), "c".to_string()],
            vec![vec!["1".to_string()], vec![
                "1".to_string(),
                "2".to_string(),
                "3".to_string(),
                "4".to_string(),
            ]],
        );
        assert_eq!(t.rows()[0], vec!["1", "", ""]);
        assert_eq!(t.rows()[1], vec!["1", "2", "3"]);
    }

    #[test]
    fn test_column_access() {
        let t = table();
        assert_eq!(t.column("b").unwrap(), vec!["x", "y", "x"]);
        assert_eq!(t.cell(1, "c"), Some("20"));
        assert_eq!(t.cell(9, "c"), None);
    }

    #[test]
    fn test_missing_column_error() {
        let t = table();
        let err = t.column("nope").unwrap_err();
        assert_eq!(err, TableError::MissingColumn("nope".to_string()));
    }

    #[test]
    fn test_rename_unmapped_pass_through() {
        let t = table();
        let mut mapping = HashMap::new();
        mapping.insert("a".to_string(), "alpha".to_string());
        mapping.insert("ghost".to_string(), "boo".to_string());
        let renamed = t.rename_columns(&mapping);
        assert_eq!(renamed.headers().to_vec(), vec!["alpha", "b", "c"]);
        // Data untouched
        assert_eq!(renamed.rows(), t.rows());
    }

    #[test]
    fn test_filter_preserves_order() {
        let t = table();
        let f = t.filter_eq("b", "x").unwrap();
        assert_eq!(f.len(), 2);
        assert_eq!(f.rows()[0][0], "1");
        assert_eq!(f.rows()[1][0], "3");
    }

    #[test]
    fn test_filter_zero_matches_is_legal() {
        let t = table();
        let f = t.filter_eq("b", "zzz").unwrap();
        assert!(f.is_empty());
        assert_eq!(f.headers(), t.headers());
    }

    #[test]
    fn test_filter_missing_column_fails() {
        let t = table();
        assert!(t.filter_eq("nope", "x").is_err());
    }

    #[test]
    fn test_drop_columns() {
        let t = table();
        let d = t.drop_columns(&["b", "ghost"]);
        assert_eq!(d.headers().to_vec(), vec!["a", "c"]);
        assert_eq!(d.rows()[2], vec!["3", "30"]);
    }

    #[test]
    fn test_missing_markers() {
        assert!(is_missing(""));
        assert!(is_missing(".."));
        assert!(!is_missing("0"));
    }
}
