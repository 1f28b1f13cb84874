//! Error types for the tourviz rendering pipeline.
//!
//! This module defines one error type per pipeline stage:
//!
//! - [`LoadError`] - CSV loading errors
//! - [`TableError`] - column/value access errors on loaded tables
//! - [`ReshapeError`] - wide-to-tidy reshape errors
//! - [`ChartError`] - chart construction errors
//! - [`ReportError`] - top-level orchestration errors
//!
//! Error conversion is automatic via `From` implementations,
//! allowing `?` to work across error boundaries. Every failure is
//! fatal and surfaces to the caller; there are no retries.

use thiserror::Error;

// =============================================================================
// CSV Loading Errors
// =============================================================================

/// Errors during CSV loading.
#[derive(Debug, Error)]
pub enum LoadError {
    /// Failed to read file.
    #[error("Failed to read file: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to decode content in the detected encoding.
    #[error("Failed to decode content: {0}")]
    Encoding(String),

    /// Invalid CSV format.
    #[error("Invalid CSV format: {0}")]
    Csv(#[from] csv::Error),

    /// Empty file.
    #[error("CSV file is empty")]
    EmptyFile,

    /// No headers found.
    #[error("No headers found in CSV")]
    NoHeaders,
}

// =============================================================================
// Table Access Errors
// =============================================================================

/// Errors when accessing columns or values of a loaded table.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum TableError {
    /// Expected column is absent.
    #[error("Column not found: '{0}'")]
    MissingColumn(String),

    /// No row for the requested year.
    #[error("No row for year {0}")]
    MissingYear(i32),

    /// A cell that should hold a number does not.
    #[error("Non-numeric value '{value}' in column '{column}' for year {year}")]
    NonNumeric {
        column: String,
        year: i32,
        value: String,
    },
}

// =============================================================================
// Reshape Errors
// =============================================================================

/// Errors during the wide-to-tidy reshape.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ReshapeError {
    /// Column or value access failed.
    #[error(transparent)]
    Table(#[from] TableError),

    /// A column label survived normalization but is not a numeric year.
    #[error("Year column label is not numeric: '{label}'")]
    YearLabel { label: String },

    /// Two filtered rows share a country name; a tidy column per
    /// country would silently lose one of them.
    #[error("Duplicate country name after filtering: '{name}'")]
    DuplicateCountry { name: String },
}

// =============================================================================
// Chart Errors
// =============================================================================

/// Errors during chart construction.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ChartError {
    /// Column or value access failed.
    #[error(transparent)]
    Table(#[from] TableError),

    /// A pie wedge has no value for the focus year.
    #[error("Missing value for '{country}' in year {year}")]
    MissingValue { country: String, year: i32 },

    /// No countries configured.
    #[error("Country list is empty")]
    NoCountries,
}

// =============================================================================
// Top-Level Report Errors
// =============================================================================

/// Top-level errors from the render pipeline.
#[derive(Debug, Error)]
pub enum ReportError {
    /// CSV loading failed.
    #[error("Load error: {0}")]
    Load(#[from] LoadError),

    /// Reshape failed.
    #[error("Reshape error: {0}")]
    Reshape(#[from] ReshapeError),

    /// Chart construction failed.
    #[error("Chart error: {0}")]
    Chart(#[from] ChartError),

    /// Writing the report failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_column_message() {
        let err = TableError::MissingColumn("Series Name".to_string());
        assert_eq!(err.to_string(), "Column not found: 'Series Name'");
    }

    #[test]
    fn test_non_numeric_message() {
        let err = TableError::NonNumeric {
            column: "Brazil".to_string(),
            year: 2014,
            value: "n/a".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("Brazil"));
        assert!(msg.contains("2014"));
        assert!(msg.contains("n/a"));
    }

    #[test]
    fn test_table_error_converts_to_reshape_error() {
        fn fails() -> Result<(), ReshapeError> {
            let table_err = TableError::MissingColumn("Country Name".to_string());
            Err(table_err.into())
        }
        match fails() {
            Err(ReshapeError::Table(TableError::MissingColumn(name))) => {
                assert_eq!(name, "Country Name");
            }
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_report_error_wraps_stages() {
        let err: ReportError = ReshapeError::YearLabel {
            label: "Country Name".to_string(),
        }
        .into();
        assert!(err.to_string().starts_with("Reshape error:"));
    }
}
