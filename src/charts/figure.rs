//! Composite report figure.
//!
//! Assembles the four charts onto a single plotly figure with a 2x2
//! independent grid:
//!
//! ```text
//! +--------------------+--------------------+
//! | expenditures       | transport exp.     |
//! | (line)             | (vertical bars)    |
//! +--------------------+--------------------+
//! | departures         | arrivals           |
//! | (horizontal bars)  | (exploded pie)     |
//! +--------------------+--------------------+
//!        description box, author labels
//! ```

use plotly::color::NamedColor;
use plotly::common::{Anchor, Domain, Font, Title};
use plotly::layout::{Annotation, Axis, GridPattern, Layout, LayoutGrid, Margin};
use plotly::Plot;

use super::{
    bar_shares, bar_traces, default_countries, line_traces, pie_slices, pie_trace,
    share_bar_trace, BarShare, DEFAULT_FOCUS_YEAR,
};
use crate::error::ChartError;
use crate::table::{RawTable, TidyTable};

/// The four reshaped inputs of the report, one per chart.
#[derive(Debug, Clone)]
pub struct ReportData {
    /// Total expenditures tidy table (line chart).
    pub expenditures: TidyTable,
    /// Passenger-transport expenditures tidy table (bar chart).
    pub transport_expenditures: TidyTable,
    /// Departures as the filtered wide table (horizontal share bars).
    pub departures: RawTable,
    /// Arrivals tidy table (pie chart).
    pub arrivals: TidyTable,
}

/// Figure-level configuration: chrome text, country subset, focus
/// year for the single-year charts.
#[derive(Debug, Clone)]
pub struct FigureSpec {
    pub title: String,
    /// Free-text description, shown boxed below the charts. Line
    /// breaks are preserved.
    pub description: String,
    pub author_name: Option<String>,
    pub author_id: Option<String>,
    pub countries: Vec<String>,
    pub focus_year: i32,
}

impl Default for FigureSpec {
    fn default() -> Self {
        Self {
            title: "International Tourism Data Analysis".to_string(),
            description: "Four views of international tourism statistics for the selected \
                          countries across 2009-2018:\n\
                          expenditure trends (line), passenger-transport expenditures per year \
                          (bars), each country's share of\n\
                          departures in the focus year (horizontal bars), and the distribution \
                          of arrivals in the focus year (pie)."
                .to_string(),
            author_name: None,
            author_id: None,
            countries: default_countries(),
            focus_year: DEFAULT_FOCUS_YEAR,
        }
    }
}

/// Per-chart titles, mirroring the series each chart draws.
const LINE_TITLE: &str = "International tourism, expenditures (current US$)";
const BAR_TITLE: &str =
    "International tourism, expenditures for passenger transport items (current US$)";
const HBAR_TITLE: &str = "International tourism, number of departures";
const PIE_TITLE: &str = "International tourism, number of arrivals";

/// Build the composite figure. The returned [`Plot`] is ready to be
/// written to HTML or shown; no I/O happens here.
pub fn build_figure(data: &ReportData, spec: &FigureSpec) -> Result<Plot, ChartError> {
    let mut plot = Plot::new();

    for trace in line_traces(&data.expenditures, &spec.countries)? {
        plot.add_trace(trace.x_axis("x").y_axis("y"));
    }
    for trace in bar_traces(&data.transport_expenditures, &spec.countries)? {
        plot.add_trace(trace.x_axis("x2").y_axis("y2"));
    }

    let shares = bar_shares(&data.departures, spec.focus_year)?;
    plot.add_trace(share_bar_trace(&shares).x_axis("x3").y_axis("y3"));

    let slices = pie_slices(&data.arrivals, spec.focus_year, &spec.countries)?;
    plot.add_trace(pie_trace(&slices).domain(Domain::new().row(1).column(1)));

    let mut annotations = subplot_titles();
    annotations.extend(share_annotations(&shares));
    annotations.push(description_box(&spec.description));
    annotations.extend(author_labels(spec));

    let layout = Layout::new()
        .title(Title::with_text(spec.title.as_str()).font(Font::new().size(24)))
        .grid(
            LayoutGrid::new()
                .rows(2)
                .columns(2)
                .pattern(GridPattern::Independent),
        )
        .paper_background_color(NamedColor::LightBlue)
        .width(1500)
        .height(950)
        .margin(Margin::new().bottom(240))
        .x_axis(Axis::new().title(Title::with_text("Years")))
        .y_axis(Axis::new().title(Title::with_text("Countries")))
        .x_axis2(Axis::new().title(Title::with_text("Years")))
        .y_axis2(Axis::new().title(Title::with_text("Countries")))
        .x_axis3(Axis::new().title(Title::with_text("Number of departures")))
        .y_axis3(Axis::new().title(Title::with_text("Country")))
        .annotations(annotations);
    plot.set_layout(layout);

    Ok(plot)
}

/// Bold title above each grid cell, in paper coordinates.
fn subplot_titles() -> Vec<Annotation> {
    let title = |text: &str, x: f64, y: f64| {
        Annotation::new()
            .text(format!("<b>{text}</b>"))
            .x_ref("paper")
            .y_ref("paper")
            .x(x)
            .y(y)
            .x_anchor(Anchor::Center)
            .y_anchor(Anchor::Bottom)
            .show_arrow(false)
    };
    vec![
        title(LINE_TITLE, 0.2, 1.0),
        title(BAR_TITLE, 0.8, 1.0),
        title(HBAR_TITLE, 0.2, 0.44),
        title(PIE_TITLE, 0.8, 0.44),
    ]
}

/// Percentage label to the right of each horizontal bar.
fn share_annotations(shares: &[BarShare]) -> Vec<Annotation> {
    shares
        .iter()
        .map(|share| {
            Annotation::new()
                .text(share.label.as_str())
                .x_ref("x3")
                .y_ref("y3")
                .x(share.value)
                .y(share.country.clone())
                .x_anchor(Anchor::Left)
                .show_arrow(false)
        })
        .collect()
}

/// White rounded box with the free-text description, centered below
/// the charts.
fn description_box(description: &str) -> Annotation {
    Annotation::new()
        .text(description.replace('\n', "<br>"))
        .x_ref("paper")
        .y_ref("paper")
        .x(0.5)
        .y(-0.18)
        .x_anchor(Anchor::Center)
        .y_anchor(Anchor::Top)
        .show_arrow(false)
        .font(Font::new().size(14))
        .background_color(NamedColor::White)
        .border_color(NamedColor::Gray)
}

/// Author name and id in the lower right, when configured.
fn author_labels(spec: &FigureSpec) -> Vec<Annotation> {
    let label = |text: String, y: f64| {
        Annotation::new()
            .text(text)
            .x_ref("paper")
            .y_ref("paper")
            .x(0.95)
            .y(y)
            .x_anchor(Anchor::Center)
            .show_arrow(false)
            .font(Font::new().size(14).color(NamedColor::Black))
    };
    let mut labels = Vec::new();
    if let Some(name) = &spec.author_name {
        labels.push(label(format!("Name: {name}"), -0.32));
    }
    if let Some(id) = &spec.author_id {
        labels.push(label(format!("Id: {id}"), -0.36));
    }
    labels
}
