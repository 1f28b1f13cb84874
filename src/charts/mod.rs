//! Chart construction over reshaped tables.
//!
//! Four chart kinds, matching the report layout:
//!
//! - [`line_traces`] - one lines+markers trace per country over years
//! - [`bar_traces`] - one vertical bar trace per country over years
//! - [`bar_shares`] / [`share_bar_trace`] - horizontal bars for one
//!   year over the filtered wide table, each annotated with its share
//!   of the column sum
//! - [`pie_slices`] / [`pie_trace`] - one year's values for the
//!   configured countries as an exploded pie
//!
//! Selection and share formatting are plain functions over the tables
//! so they can be tested without inspecting plotly output; the
//! `*_trace` builders only translate the results into plotly types.

pub mod figure;

pub use figure::{build_figure, FigureSpec, ReportData};

use std::cmp::Ordering;

use plotly::color::Rgb;
use plotly::common::{Marker, Mode, Orientation};
use plotly::{Bar, Pie, Scatter};

use crate::error::ChartError;
use crate::reshape::COUNTRY_NAME;
use crate::table::{parse_cell, RawTable, TidyTable};

/// The default country subset shown in the report.
pub const DEFAULT_COUNTRIES: [&str; 5] = ["Brazil", "France", "Germany", "Japan", "Saudi Arabia"];

/// The default focus year for the single-year charts.
pub const DEFAULT_FOCUS_YEAR: i32 = 2018;

/// Explode offset applied to every pie wedge.
pub const PIE_PULL: f64 = 0.1;

/// Ten-color categorical palette (the matplotlib tab10 colors).
const PALETTE: [(u8, u8, u8); 10] = [
    (31, 119, 180),
    (255, 127, 14),
    (44, 160, 44),
    (214, 39, 40),
    (148, 103, 189),
    (140, 86, 75),
    (227, 119, 194),
    (127, 127, 127),
    (188, 189, 34),
    (23, 190, 207),
];

pub(crate) fn palette_color(index: usize) -> Rgb {
    let (r, g, b) = PALETTE[index % PALETTE.len()];
    Rgb::new(r, g, b)
}

/// Default country list as owned strings.
pub fn default_countries() -> Vec<String> {
    DEFAULT_COUNTRIES.iter().map(|c| c.to_string()).collect()
}

// =============================================================================
// Line and Bar Charts
// =============================================================================

/// One lines+markers trace per country, x = Years. Missing cells are
/// skipped; a country absent from the table is an error.
pub fn line_traces(
    tidy: &TidyTable,
    countries: &[String],
) -> Result<Vec<Box<Scatter<i32, f64>>>, ChartError> {
    if countries.is_empty() {
        return Err(ChartError::NoCountries);
    }
    let mut traces = Vec::with_capacity(countries.len());
    for country in countries {
        let (years, values): (Vec<i32>, Vec<f64>) =
            tidy.series_points(country)?.into_iter().unzip();
        traces.push(
            Scatter::new(years, values)
                .mode(Mode::LinesMarkers)
                .name(country.as_str()),
        );
    }
    Ok(traces)
}

/// One vertical bar trace per country, x = Years.
pub fn bar_traces(
    tidy: &TidyTable,
    countries: &[String],
) -> Result<Vec<Box<Bar<i32, f64>>>, ChartError> {
    if countries.is_empty() {
        return Err(ChartError::NoCountries);
    }
    let mut traces = Vec::with_capacity(countries.len());
    for country in countries {
        let (years, values): (Vec<i32>, Vec<f64>) =
            tidy.series_points(country)?.into_iter().unzip();
        traces.push(Bar::new(years, values).name(country.as_str()));
    }
    Ok(traces)
}

// =============================================================================
// Horizontal Share Bars
// =============================================================================

/// One horizontal bar, with its share of the column sum pre-formatted
/// for annotation.
#[derive(Debug, Clone, PartialEq)]
pub struct BarShare {
    pub country: String,
    pub value: f64,
    /// Share of the column sum, formatted to two decimals ("12.34%").
    pub label: String,
}

/// Compute one year's bars over the filtered wide table, sorted
/// ascending by value. Rows with a missing value for the year are
/// skipped; other non-numeric values are an error.
pub fn bar_shares(filtered: &RawTable, year: i32) -> Result<Vec<BarShare>, ChartError> {
    let year_column = year.to_string();
    let names = filtered.column(COUNTRY_NAME)?;
    let cells = filtered.column(&year_column)?;

    let mut bars: Vec<(String, f64)> = Vec::with_capacity(cells.len());
    for (name, cell) in names.iter().zip(&cells) {
        if let Some(value) = parse_cell(cell, name, year)? {
            bars.push((name.to_string(), value));
        }
    }
    bars.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(Ordering::Equal));

    let total: f64 = bars.iter().map(|(_, v)| v).sum();
    Ok(bars
        .into_iter()
        .map(|(country, value)| {
            let share = if total > 0.0 { value / total * 100.0 } else { 0.0 };
            BarShare {
                country,
                value,
                label: format!("{share:.2}%"),
            }
        })
        .collect())
}

/// Horizontal bar trace over precomputed shares, one palette color
/// per bar.
pub fn share_bar_trace(shares: &[BarShare]) -> Box<Bar<f64, String>> {
    let values: Vec<f64> = shares.iter().map(|s| s.value).collect();
    let names: Vec<String> = shares.iter().map(|s| s.country.clone()).collect();
    let colors: Vec<Rgb> = (0..shares.len()).map(palette_color).collect();

    Bar::new(values, names)
        .orientation(Orientation::Horizontal)
        .marker(Marker::new().color_array(colors))
        .show_legend(false)
}

// =============================================================================
// Pie Chart
// =============================================================================

/// Select one year's values for the configured countries, in the
/// configured order. A missing value cannot become a wedge, so it is
/// an error here.
pub fn pie_slices(
    tidy: &TidyTable,
    year: i32,
    countries: &[String],
) -> Result<Vec<(String, f64)>, ChartError> {
    if countries.is_empty() {
        return Err(ChartError::NoCountries);
    }
    let mut slices = Vec::with_capacity(countries.len());
    for country in countries {
        let value = tidy
            .value_at(year, country)?
            .ok_or_else(|| ChartError::MissingValue {
                country: country.clone(),
                year,
            })?;
        slices.push((country.clone(), value));
    }
    Ok(slices)
}

/// Pie trace with every wedge pulled out and percentage labels.
pub fn pie_trace(slices: &[(String, f64)]) -> Box<Pie<f64>> {
    let labels: Vec<String> = slices.iter().map(|(c, _)| c.clone()).collect();
    let values: Vec<f64> = slices.iter().map(|(_, v)| *v).collect();

    Pie::new(values)
        .labels(labels)
        .pull(PIE_PULL)
        .rotation(90.0)
        .text_info("label+percent")
        .show_legend(false)
}
