//! Wide-to-tidy reshape of series-filtered tourism tables.
//!
//! The source table is wide: one row per country and series, one
//! column per year, with year labels decorated as `"2009 [YR2009]"`.
//! [`reshape`] turns the rows of one series into a [`TidyTable`] with
//! one row per year and one column per country:
//!
//! ```text
//! Country Name  Series Name  2009 [YR2009] ... 2018 [YR2018]
//! Brazil        arrivals     100           ... 190             ┐ filter +
//! France        arrivals     5.0           ... 9.5             ┘ transpose
//!
//! Years  Brazil  France
//! 2009   100     5.0
//! ...
//! 2018   190     9.5
//! ```
//!
//! The reshape is a pure function of its inputs: no I/O, no state,
//! identical inputs give identical outputs.

use std::collections::HashMap;

use once_cell::sync::Lazy;

use crate::error::{ReshapeError, TableError};
use crate::table::{RawTable, TidyTable};

/// Column holding the country display name.
pub const COUNTRY_NAME: &str = "Country Name";
/// Column holding the ISO country code.
pub const COUNTRY_CODE: &str = "Country Code";
/// Column holding the metric selector.
pub const SERIES_NAME: &str = "Series Name";
/// Column holding the metric code.
pub const SERIES_CODE: &str = "Series Code";

/// First year column in the dataset.
pub const FIRST_YEAR: i32 = 2009;
/// Last year column in the dataset.
pub const LAST_YEAR: i32 = 2018;

/// Keyed mapping from decorated year labels ("2009 [YR2009]") to bare
/// ones ("2009"). Labels outside the mapping pass through unchanged.
static YEAR_LABELS: Lazy<HashMap<String, String>> = Lazy::new(|| {
    (FIRST_YEAR..=LAST_YEAR)
        .map(|year| (format!("{year} [YR{year}]"), year.to_string()))
        .collect()
});

/// Reshape one series of a wide table into a tidy per-year table.
///
/// Steps, in order: normalize year labels, filter rows on
/// `Series Name == series_name` (zero matches is legal), drop the
/// `Country Code`/`Series Name`/`Series Code` columns, transpose so
/// every year column becomes a row and every country a column, coerce
/// the year labels to integers.
///
/// Returns `(filtered, tidy)`: the projected wide rows of the series,
/// and the transposed table.
///
/// # Errors
///
/// - [`TableError::MissingColumn`] if `Series Name` or `Country Name`
///   is absent.
/// - [`ReshapeError::YearLabel`] if a column label other than
///   `Country Name` survives normalization without being a numeric
///   year.
/// - [`ReshapeError::DuplicateCountry`] if two filtered rows share a
///   country name.
pub fn reshape(raw: &RawTable, series_name: &str) -> Result<(RawTable, TidyTable), ReshapeError> {
    let renamed = raw.rename_columns(&YEAR_LABELS);
    let filtered = renamed.filter_eq(SERIES_NAME, series_name)?;
    let filtered = filtered.drop_columns(&[COUNTRY_CODE, SERIES_NAME, SERIES_CODE]);
    let tidy = transpose(&filtered)?;
    Ok((filtered, tidy))
}

/// Pivot a projected wide table (Country Name + year columns) so each
/// year column becomes a row and each country a column.
fn transpose(filtered: &RawTable) -> Result<TidyTable, ReshapeError> {
    let name_idx = filtered
        .column_index(COUNTRY_NAME)
        .ok_or_else(|| TableError::MissingColumn(COUNTRY_NAME.to_string()))?;

    // Every remaining column label must coerce to a numeric year.
    let mut years = Vec::new();
    let mut year_columns = Vec::new();
    for (idx, label) in filtered.headers().iter().enumerate() {
        if idx == name_idx {
            continue;
        }
        let year: i32 = label.parse().map_err(|_| ReshapeError::YearLabel {
            label: label.clone(),
        })?;
        years.push(year);
        year_columns.push(idx);
    }

    let mut countries: Vec<String> = Vec::with_capacity(filtered.len());
    let mut values = Vec::with_capacity(filtered.len());
    for row in filtered.rows() {
        let name = &row[name_idx];
        if countries.contains(name) {
            return Err(ReshapeError::DuplicateCountry { name: name.clone() });
        }
        countries.push(name.clone());
        values.push(year_columns.iter().map(|&idx| row[idx].clone()).collect());
    }

    Ok(TidyTable::new(years, countries, values))
}

/// Distinct series names present in a wide table, in row order.
pub fn series_names(raw: &RawTable) -> Result<Vec<String>, ReshapeError> {
    let column = raw.column(SERIES_NAME).map_err(ReshapeError::Table)?;
    let mut names: Vec<String> = Vec::new();
    for name in column {
        if !name.is_empty() && !names.iter().any(|n| n == name) {
            names.push(name.to_string());
        }
    }
    Ok(names)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ARRIVALS: &str = "International tourism, number of arrivals";
    const DEPARTURES: &str = "International tourism, number of departures";

    fn headers() -> Vec<String> {
        let mut headers = vec![
            COUNTRY_NAME.to_string(),
            COUNTRY_CODE.to_string(),
            SERIES_NAME.to_string(),
            SERIES_CODE.to_string(),
        ];
        headers.extend((FIRST_YEAR..=LAST_YEAR).map(|y| format!("{y} [YR{y}]")));
        headers
    }

    fn row(country: &str, code: &str, series: &str, start: i64) -> Vec<String> {
        let mut row = vec![
            country.to_string(),
            code.to_string(),
            series.to_string(),
            "ST.INT.XXXX".to_string(),
        ];
        row.extend((0..10).map(|i| (start + 10 * i).to_string()));
        row
    }

    fn sample() -> RawTable {
        RawTable::new(
            headers(),
            vec![
                row("Brazil", "BRA", ARRIVALS, 100),
                row("France", "FRA", ARRIVALS, 500),
                row("Brazil", "BRA", DEPARTURES, 40),
                row("France", "FRA", DEPARTURES, 80),
            ],
        )
    }

    #[test]
    fn test_tidy_has_one_row_per_year() {
        let (_, tidy) = reshape(&sample(), ARRIVALS).unwrap();
        assert_eq!(tidy.len(), 10);
        let expected: Vec<i32> = (FIRST_YEAR..=LAST_YEAR).collect();
        assert_eq!(tidy.years(), expected.as_slice());
    }

    #[test]
    fn test_filtered_drops_key_columns() {
        let (filtered, _) = reshape(&sample(), ARRIVALS).unwrap();
        assert_eq!(filtered.len(), 2);
        assert!(filtered.column_index(COUNTRY_CODE).is_none());
        assert!(filtered.column_index(SERIES_NAME).is_none());
        assert!(filtered.column_index(SERIES_CODE).is_none());
        assert!(filtered.column_index(COUNTRY_NAME).is_some());
    }

    #[test]
    fn test_scenario_brazil_arrivals() {
        let (_, tidy) = reshape(&sample(), ARRIVALS).unwrap();
        assert_eq!(tidy.value_at(2009, "Brazil").unwrap(), Some(100.0));
        assert_eq!(tidy.value_at(2018, "Brazil").unwrap(), Some(190.0));
    }

    #[test]
    fn test_round_trip_values() {
        let raw = sample();
        let (filtered, tidy) = reshape(&raw, DEPARTURES).unwrap();
        for (pos, country) in tidy.countries().iter().enumerate() {
            assert_eq!(filtered.cell(pos, COUNTRY_NAME), Some(country.as_str()));
            for &year in tidy.years() {
                let wide = filtered.cell(pos, &year.to_string()).unwrap();
                let tall = tidy.value_at(year, country).unwrap().unwrap();
                assert_eq!(wide.parse::<f64>().unwrap(), tall);
            }
        }
    }

    #[test]
    fn test_idempotent() {
        let raw = sample();
        let first = reshape(&raw, ARRIVALS).unwrap();
        let second = reshape(&raw, ARRIVALS).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_empty_filter_is_legal() {
        let (filtered, tidy) = reshape(&sample(), "no such series").unwrap();
        assert!(filtered.is_empty());
        assert_eq!(tidy.len(), 10);
        assert!(tidy.countries().is_empty());
    }

    #[test]
    fn test_column_order_preserved() {
        let (_, tidy) = reshape(&sample(), ARRIVALS).unwrap();
        assert_eq!(tidy.countries().to_vec(), vec!["Brazil", "France"]);
    }

    #[test]
    fn test_unmapped_year_label_fails_coercion() {
        // A decoration the mapping does not know stays unrenamed, so
        // coercion of the transposed row labels must fail on it.
        let mut headers = headers();
        headers[4] = "2009 [YR09]".to_string();
        let raw = RawTable::new(headers, vec![row("Brazil", "BRA", ARRIVALS, 100)]);
        match reshape(&raw, ARRIVALS) {
            Err(ReshapeError::YearLabel { label }) => assert_eq!(label, "2009 [YR09]"),
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_duplicate_country_rejected() {
        let raw = RawTable::new(
            headers(),
            vec![
                row("Brazil", "BRA", ARRIVALS, 100),
                row("Brazil", "BRA", ARRIVALS, 200),
            ],
        );
        match reshape(&raw, ARRIVALS) {
            Err(ReshapeError::DuplicateCountry { name }) => assert_eq!(name, "Brazil"),
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_missing_series_column() {
        let raw = RawTable::new(
            vec!["Country Name".to_string(), "2009".to_string()],
            vec![vec!["Brazil".to_string(), "1".to_string()]],
        );
        match reshape(&raw, ARRIVALS) {
            Err(ReshapeError::Table(TableError::MissingColumn(name))) => {
                assert_eq!(name, SERIES_NAME);
            }
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_series_names_distinct_in_order() {
        let names = series_names(&sample()).unwrap();
        assert_eq!(names, vec![ARRIVALS, DEPARTURES]);
    }
}
