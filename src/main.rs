//! Tourviz CLI - render tourism statistics as a four-chart report
//!
//! # Main Command
//!
//! ```bash
//! tourviz render "International Tourism.csv"   # Write report.html
//! ```
//!
//! # Debug Commands (for development)
//!
//! ```bash
//! tourviz series input.csv                     # List distinct series names
//! tourviz reshape input.csv --series "International tourism, number of arrivals"
//! ```

use clap::{Parser, Subcommand, ValueEnum};
use std::fs;
use std::path::{Path, PathBuf};
use tourviz::{
    default_countries, load_table, render_report, reshape, series_names, RenderOptions, TidyTable,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "tourviz")]
#[command(about = "Render World Bank tourism statistics as a four-chart report", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Full pipeline: CSV → reshape → four-chart HTML report
    Render {
        /// Input CSV file
        input: PathBuf,

        /// Output HTML file
        #[arg(short, long, default_value = "report.html")]
        output: PathBuf,

        /// Open the report in a browser after writing it
        #[arg(long)]
        open: bool,

        /// Focus year for the pie and horizontal bar charts
        #[arg(short, long, default_value = "2018")]
        year: i32,

        /// Countries to chart (comma separated; defaults to the
        /// built-in five)
        #[arg(short, long, value_delimiter = ',')]
        countries: Vec<String>,

        /// Figure title
        #[arg(long)]
        title: Option<String>,

        /// Author name label
        #[arg(long)]
        author_name: Option<String>,

        /// Author id label
        #[arg(long)]
        author_id: Option<String>,
    },

    /// Reshape one series and dump the tidy table
    Reshape {
        /// Input CSV file
        input: PathBuf,

        /// Series name to filter on
        #[arg(short, long)]
        series: String,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format
        #[arg(short, long, default_value = "csv")]
        format: DumpFormat,
    },

    /// List distinct series names in a CSV
    Series {
        /// Input CSV file
        input: PathBuf,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum DumpFormat {
    Csv,
    Json,
}

fn main() {
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(env)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Render {
            input,
            output,
            open,
            year,
            countries,
            title,
            author_name,
            author_id,
        } => cmd_render(
            &input,
            &output,
            open,
            year,
            countries,
            title,
            author_name,
            author_id,
        ),

        Commands::Reshape {
            input,
            series,
            output,
            format,
        } => cmd_reshape(&input, &series, output.as_deref(), format),

        Commands::Series { input } => cmd_series(&input),
    };

    if let Err(e) = result {
        eprintln!("❌ Error: {}", e);
        std::process::exit(1);
    }
}

#[allow(clippy::too_many_arguments)]
fn cmd_render(
    input: &Path,
    output: &Path,
    open: bool,
    year: i32,
    countries: Vec<String>,
    title: Option<String>,
    author_name: Option<String>,
    author_id: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    eprintln!("📄 Rendering: {}", input.display());

    let options = RenderOptions {
        countries: if countries.is_empty() {
            default_countries()
        } else {
            countries
        },
        focus_year: year,
        title,
        description: None,
        author_name,
        author_id,
        open,
    };

    let summary = render_report(input, output, &options)?;

    eprintln!("   Encoding: {}", summary.encoding);
    eprintln!("   Delimiter: '{}'", format_delimiter(summary.delimiter));
    eprintln!("   Rows: {}", summary.row_count);
    eprintln!("   Countries: {}", summary.countries.join(", "));
    eprintln!(
        "   Generated: {}",
        summary.generated_at.format("%Y-%m-%d %H:%M:%S")
    );
    eprintln!("✅ Report written to {}", summary.output.display());

    Ok(())
}

fn cmd_reshape(
    input: &Path,
    series: &str,
    output: Option<&Path>,
    format: DumpFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    eprintln!("📄 Reshaping: {}", input.display());

    let (raw, meta) = load_table(input)?;
    eprintln!("   Encoding: {}", meta.encoding);
    eprintln!("   Delimiter: '{}'", format_delimiter(meta.delimiter));

    let (filtered, tidy) = reshape(&raw, series)?;
    eprintln!(
        "✅ Matched {} rows, tidy table has {} years x {} countries",
        filtered.len(),
        tidy.len(),
        tidy.countries().len()
    );

    let dump = match format {
        DumpFormat::Csv => tidy_to_csv(&tidy)?,
        DumpFormat::Json => tidy_to_json(&tidy)?,
    };
    write_output(&dump, output)?;

    Ok(())
}

fn cmd_series(input: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let (raw, _) = load_table(input)?;
    let names = series_names(&raw)?;
    eprintln!("✅ {} distinct series", names.len());
    for name in names {
        println!("{}", name);
    }
    Ok(())
}

/// Dump a tidy table as CSV: a "Years" column plus one column per
/// country, cells exactly as loaded.
fn tidy_to_csv(tidy: &TidyTable) -> Result<String, Box<dyn std::error::Error>> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    let mut header = vec!["Years".to_string()];
    header.extend(tidy.countries().iter().cloned());
    writer.write_record(&header)?;

    for (row, &year) in tidy.years().iter().enumerate() {
        let mut record = vec![year.to_string()];
        for country in tidy.countries() {
            record.push(tidy.column(country)?[row].clone());
        }
        writer.write_record(&record)?;
    }

    Ok(String::from_utf8(writer.into_inner()?)?)
}

/// Dump a tidy table as a JSON array of per-year objects.
fn tidy_to_json(tidy: &TidyTable) -> Result<String, Box<dyn std::error::Error>> {
    let mut rows = Vec::with_capacity(tidy.len());
    for (row, &year) in tidy.years().iter().enumerate() {
        let mut obj = serde_json::Map::new();
        obj.insert("Years".to_string(), serde_json::json!(year));
        for country in tidy.countries() {
            let cell = &tidy.column(country)?[row];
            obj.insert(country.clone(), serde_json::json!(cell));
        }
        rows.push(serde_json::Value::Object(obj));
    }
    Ok(serde_json::to_string_pretty(&rows)?)
}

fn write_output(content: &str, output: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    match output {
        Some(path) => {
            fs::write(path, content)?;
            eprintln!("💾 Saved to: {}", path.display());
        }
        None => println!("{}", content),
    }
    Ok(())
}

fn format_delimiter(delimiter: char) -> String {
    match delimiter {
        '\t' => "\\t".to_string(),
        c => c.to_string(),
    }
}
