//! The reshaped per-year table.

use crate::error::TableError;
use crate::table::is_missing;

/// A tidy table: one row per year, one column per country, plus the
/// explicit "Years" column ([`TidyTable::years`]).
///
/// Row order equals the year-column order of the source wide table;
/// the `Vec` position is the plain 0-based row index. Cells keep the
/// string values they had in the source; numeric coercion happens at
/// the point of use.
#[derive(Debug, Clone, PartialEq)]
pub struct TidyTable {
    years: Vec<i32>,
    countries: Vec<String>,
    /// values[country][row], same row order as `years`.
    values: Vec<Vec<String>>,
}

impl TidyTable {
    pub(crate) fn new(years: Vec<i32>, countries: Vec<String>, values: Vec<Vec<String>>) -> Self {
        debug_assert_eq!(countries.len(), values.len());
        debug_assert!(values.iter().all(|col| col.len() == years.len()));
        Self {
            years,
            countries,
            values,
        }
    }

    /// The "Years" column.
    pub fn years(&self) -> &[i32] {
        &self.years
    }

    /// Country column labels, in source row order.
    pub fn countries(&self) -> &[String] {
        &self.countries
    }

    /// Number of rows (one per year).
    pub fn len(&self) -> usize {
        self.years.len()
    }

    /// True if the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.years.is_empty()
    }

    /// Raw string cells of one country column, in year order.
    pub fn column(&self, country: &str) -> Result<&[String], TableError> {
        let idx = self
            .countries
            .iter()
            .position(|c| c == country)
            .ok_or_else(|| TableError::MissingColumn(country.to_string()))?;
        Ok(&self.values[idx])
    }

    /// One cell as a number: `Ok(None)` when the cell holds a
    /// missing-data marker, an error when it holds other non-numeric
    /// text or the year has no row.
    pub fn value_at(&self, year: i32, country: &str) -> Result<Option<f64>, TableError> {
        let row = self
            .years
            .iter()
            .position(|&y| y == year)
            .ok_or(TableError::MissingYear(year))?;
        let cell = &self.column(country)?[row];
        parse_cell(cell, country, year)
    }

    /// The (year, value) points of one country column, skipping
    /// missing cells.
    pub fn series_points(&self, country: &str) -> Result<Vec<(i32, f64)>, TableError> {
        let column = self.column(country)?;
        let mut points = Vec::with_capacity(column.len());
        for (&year, cell) in self.years.iter().zip(column) {
            if let Some(value) = parse_cell(cell, country, year)? {
                points.push((year, value));
            }
        }
        Ok(points)
    }
}

pub(crate) fn parse_cell(cell: &str, column: &str, year: i32) -> Result<Option<f64>, TableError> {
    if is_missing(cell) {
        return Ok(None);
    }
    cell.parse::<f64>()
        .map(Some)
        .map_err(|_| TableError::NonNumeric {
            column: column.to_string(),
            year,
            value: cell.to_string(),
        })
}
