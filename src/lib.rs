//! # Tourviz - tourism statistics reshape and charting
//!
//! Tourviz loads a World Bank-style CSV of international tourism
//! statistics and renders a composite four-chart report.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │   CSV File  │────▶│   Loader    │────▶│   Reshaper  │────▶│   Figure    │
//! │ (wide, YRxx)│     │ (auto-enc)  │     │ (per-year)  │     │ (4 charts)  │
//! └─────────────┘     └─────────────┘     └─────────────┘     └─────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use tourviz::{render_report, RenderOptions};
//! use std::path::Path;
//!
//! fn main() {
//!     let summary = render_report(
//!         Path::new("International Tourism.csv"),
//!         Path::new("report.html"),
//!         &RenderOptions::default(),
//!     )
//!     .unwrap();
//!     println!("Wrote {}", summary.output.display());
//! }
//! ```
//!
//! ## Modules
//!
//! - [`error`] - Hierarchical error types
//! - [`table`] - RawTable/TidyTable and CSV loading
//! - [`reshape`] - Wide-to-tidy reshape of one series
//! - [`charts`] - Chart traces and the composite figure
//! - [`pipeline`] - Load, reshape and render in one call

// Core modules
pub mod error;
pub mod table;

// Reshape
pub mod reshape;

// Charting
pub mod charts;

// Orchestration
pub mod pipeline;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use charts::{build_figure, default_countries, FigureSpec, ReportData};
pub use error::{ChartError, LoadError, ReportError, ReshapeError, TableError};
pub use pipeline::{
    render_report, RenderOptions, RenderSummary, SERIES_ARRIVALS, SERIES_DEPARTURES,
    SERIES_EXPENDITURES, SERIES_TRANSPORT_EXPENDITURES,
};
pub use reshape::{reshape, series_names};
pub use table::{load_bytes, load_table, LoadMeta, RawTable, TidyTable};
