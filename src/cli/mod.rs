//! Command-line parsing for the sales analysis tool.
//!
//! The goal of this module is to keep **argument parsing** and **command
//! dispatch** separate from the aggregation/reporting code.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "sales", version, about = "Sales CSV analysis and reporting")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Analyze a sales CSV: write the summary report, print insights, and
    /// optionally export JSON/CSV/charts.
    Analyze(AnalyzeArgs),
    /// Print the product performance ranking only (useful for scripting).
    Rank(AnalyzeArgs),
    /// Write a sample sales CSV to experiment with.
    Sample(SampleArgs),
}

/// Common options for analysis and ranking.
#[derive(Debug, Parser, Clone)]
pub struct AnalyzeArgs {
    /// Input sales CSV (columns: Date, Product, Quantity Sold, Revenue ($)).
    #[arg(short = 'i', long, default_value = "sales_data.csv")]
    pub input: PathBuf,

    /// Where to write the two-section text report.
    #[arg(short = 'o', long = "out", default_value = "sales_summary.txt")]
    pub report: PathBuf,

    /// Skip writing the text report file.
    #[arg(long)]
    pub no_report: bool,

    /// Export the structured summary as pretty JSON.
    #[arg(long, value_name = "JSON")]
    pub export_json: Option<PathBuf>,

    /// Export the by-product aggregate as CSV.
    #[arg(long = "export-aggregates", value_name = "CSV")]
    pub export_aggregates: Option<PathBuf>,

    /// Render SVG charts into this directory.
    #[arg(long, value_name = "DIR")]
    pub charts: Option<PathBuf>,

    /// Skip rows that fail validation instead of aborting the load.
    #[arg(long)]
    pub relaxed: bool,

    /// Show only the top-N ranking rows in the terminal (0 = all).
    #[arg(long, default_value_t = 0)]
    pub top: usize,

    /// Render an ASCII revenue chart in the terminal (enabled by default).
    #[arg(long, default_value_t = true)]
    pub plot: bool,

    /// Disable the terminal chart.
    #[arg(long)]
    pub no_plot: bool,

    /// Terminal chart width (columns).
    #[arg(long, default_value_t = 60)]
    pub width: usize,
}

/// Options for writing a sample CSV.
#[derive(Debug, Parser)]
pub struct SampleArgs {
    /// Where to write the sample CSV.
    #[arg(short = 'o', long = "out", default_value = "sales_data.csv")]
    pub out: PathBuf,

    /// Number of rows to generate (0 = write the built-in 10-row dataset).
    #[arg(short = 'n', long, default_value_t = 0)]
    pub rows: usize,

    /// Random seed for generated rows.
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// First sale date for generated rows.
    #[arg(long, default_value = "2025-03-01")]
    pub start: NaiveDate,
}
