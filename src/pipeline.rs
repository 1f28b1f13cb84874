//! High-level render pipeline.
//!
//! Combines all stages: load the CSV once, reshape the four tourism
//! series, build the composite figure, write it to HTML.
//!
//! # Example
//!
//! ```rust,ignore
//! use tourviz::{render_report, RenderOptions};
//! use std::path::Path;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let summary = render_report(
//!         Path::new("International Tourism.csv"),
//!         Path::new("report.html"),
//!         &RenderOptions::default(),
//!     )?;
//!     println!("Wrote {}", summary.output.display());
//!     Ok(())
//! }
//! ```

use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::charts::{
    build_figure, default_countries, FigureSpec, ReportData, DEFAULT_FOCUS_YEAR,
};
use crate::error::ReportError;
use crate::reshape::reshape;
use crate::table::load_table;

// =============================================================================
// Series Selectors
// =============================================================================

/// Number of arrivals (pie chart).
pub const SERIES_ARRIVALS: &str = "International tourism, number of arrivals";
/// Number of departures (horizontal share bars).
pub const SERIES_DEPARTURES: &str = "International tourism, number of departures";
/// Passenger-transport expenditures (vertical bars).
pub const SERIES_TRANSPORT_EXPENDITURES: &str =
    "International tourism, expenditures for passenger transport items (current US$)";
/// Total expenditures (line chart).
pub const SERIES_EXPENDITURES: &str = "International tourism, expenditures (current US$)";

// =============================================================================
// Options and Summary
// =============================================================================

/// Options for the render pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderOptions {
    /// Countries shown in the line, bar and pie charts.
    pub countries: Vec<String>,
    /// Year used by the single-year charts.
    pub focus_year: i32,
    /// Override the default figure title.
    pub title: Option<String>,
    /// Override the default description box text.
    pub description: Option<String>,
    /// Author name label, lower right.
    pub author_name: Option<String>,
    /// Author id label, below the name.
    pub author_id: Option<String>,
    /// Open the written report in a browser.
    pub open: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            countries: default_countries(),
            focus_year: DEFAULT_FOCUS_YEAR,
            title: None,
            description: None,
            author_name: None,
            author_id: None,
            open: false,
        }
    }
}

/// What a render produced, for CLI display.
#[derive(Debug, Clone, Serialize)]
pub struct RenderSummary {
    /// Detected input encoding.
    pub encoding: String,
    /// Detected input delimiter.
    pub delimiter: char,
    /// Data rows in the input.
    pub row_count: usize,
    /// Countries rendered.
    pub countries: Vec<String>,
    /// Where the report was written.
    pub output: PathBuf,
    /// When the report was generated.
    pub generated_at: DateTime<Local>,
}

// =============================================================================
// Pipeline
// =============================================================================

/// Load `input`, reshape the four series, build the figure and write
/// it to `output` as a standalone HTML file.
pub fn render_report(
    input: &Path,
    output: &Path,
    options: &RenderOptions,
) -> Result<RenderSummary, ReportError> {
    info!(input = %input.display(), "loading CSV");
    let (raw, meta) = load_table(input)?;
    info!(
        rows = raw.len(),
        encoding = %meta.encoding,
        delimiter = %meta.delimiter,
        "loaded"
    );

    let (_, arrivals) = reshape(&raw, SERIES_ARRIVALS)?;
    let (departures, _) = reshape(&raw, SERIES_DEPARTURES)?;
    let (_, transport_expenditures) = reshape(&raw, SERIES_TRANSPORT_EXPENDITURES)?;
    let (_, expenditures) = reshape(&raw, SERIES_EXPENDITURES)?;
    info!(countries = arrivals.countries().len(), "reshaped series");

    let data = ReportData {
        expenditures,
        transport_expenditures,
        departures,
        arrivals,
    };
    let mut spec = FigureSpec {
        countries: options.countries.clone(),
        focus_year: options.focus_year,
        author_name: options.author_name.clone(),
        author_id: options.author_id.clone(),
        ..FigureSpec::default()
    };
    if let Some(title) = &options.title {
        spec.title = title.clone();
    }
    if let Some(description) = &options.description {
        spec.description = description.clone();
    }

    let plot = build_figure(&data, &spec)?;
    plot.write_html(output);
    info!(output = %output.display(), "report written");

    if options.open {
        plot.show();
    }

    Ok(RenderSummary {
        encoding: meta.encoding,
        delimiter: meta.delimiter,
        row_count: raw.len(),
        countries: spec.countries,
        output: output.to_path_buf(),
        generated_at: Local::now(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn sample_csv() -> String {
        let mut csv = String::from("Country Name,Country Code,Series Name,Series Code");
        for year in 2009..=2018 {
            csv.push_str(&format!(",{year} [YR{year}]"));
        }
        csv.push('\n');

        let series = [
            SERIES_ARRIVALS,
            SERIES_DEPARTURES,
            SERIES_TRANSPORT_EXPENDITURES,
            SERIES_EXPENDITURES,
        ];
        for (c_idx, country) in ["Brazil", "France"].iter().enumerate() {
            for (s_idx, name) in series.iter().enumerate() {
                csv.push_str(&format!("{country},XXX,\"{name}\",ST.INT.XXXX"));
                for i in 0..10 {
                    csv.push_str(&format!(",{}", 1000 * (c_idx + 1) + 100 * s_idx + i));
                }
                csv.push('\n');
            }
        }
        csv
    }

    #[test]
    fn test_render_report_end_to_end() {
        let mut input = tempfile::NamedTempFile::new().unwrap();
        write!(input, "{}", sample_csv()).unwrap();
        let out_dir = tempfile::tempdir().unwrap();
        let output = out_dir.path().join("report.html");

        let options = RenderOptions {
            countries: vec!["Brazil".to_string(), "France".to_string()],
            ..RenderOptions::default()
        };
        let summary = render_report(input.path(), &output, &options).unwrap();

        assert_eq!(summary.row_count, 8);
        assert_eq!(summary.delimiter, ',');
        let html = std::fs::read_to_string(&output).unwrap();
        assert!(!html.is_empty());
    }

    #[test]
    fn test_render_report_missing_input() {
        let out = std::env::temp_dir().join("tourviz-never-written.html");
        let result = render_report(Path::new("/no/such/file.csv"), &out, &RenderOptions::default());
        assert!(matches!(result, Err(ReportError::Load(_))));
    }

    #[test]
    fn test_render_report_unknown_country() {
        let mut input = tempfile::NamedTempFile::new().unwrap();
        write!(input, "{}", sample_csv()).unwrap();
        let out_dir = tempfile::tempdir().unwrap();
        let output = out_dir.path().join("report.html");

        // Default options ask for five countries; the sample has two.
        let result = render_report(input.path(), &output, &RenderOptions::default());
        assert!(matches!(result, Err(ReportError::Chart(_))));
    }
}
