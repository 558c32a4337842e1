//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - runs the analysis pipeline
//! - prints reports/tables/charts
//! - writes the report file and optional exports

use clap::Parser;

use crate::cli::{AnalyzeArgs, Command, SampleArgs};
use crate::domain::{AnalysisConfig, LoadMode};
use crate::error::AnalysisError;

pub mod pipeline;

/// Entry point for the `sales` binary.
pub fn run() -> Result<(), AnalysisError> {
    // We want `sales` and `sales -i data.csv` to behave like
    // `sales analyze ...`.
    //
    // Clap requires a subcommand name, so we do a small, explicit rewrite of
    // the argv list before parsing. This preserves a clean clap structure
    // while keeping the short invocation.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    match cli.command {
        Command::Analyze(args) => handle_analyze(args, OutputMode::Full),
        Command::Rank(args) => handle_analyze(args, OutputMode::RankOnly),
        Command::Sample(args) => handle_sample(args),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputMode {
    Full,
    RankOnly,
}

fn handle_analyze(args: AnalyzeArgs, mode: OutputMode) -> Result<(), AnalysisError> {
    let config = analysis_config_from_args(&args);
    let run = pipeline::run_analysis(&config)?;

    // Print terminal output.
    match mode {
        OutputMode::Full => {
            println!("{}", crate::report::format_load_diagnostics(&run.loaded));
            println!("{}", crate::report::format_summary_text(&run.summary));
        }
        OutputMode::RankOnly => {}
    }

    let ranking = if config.top_n > 0 && config.top_n < run.summary.product_ranking.len() {
        &run.summary.product_ranking[..config.top_n]
    } else {
        &run.summary.product_ranking[..]
    };
    println!("{}", crate::report::format_ranking_table(ranking));

    if mode == OutputMode::Full && config.plot {
        println!("Revenue by product:");
        println!(
            "{}",
            crate::plot::render_revenue_bars(&run.by_product, config.plot_width)
        );
    }

    // Report file (analyze only) and optional exports.
    if mode == OutputMode::Full {
        if let Some(path) = &config.report_path {
            crate::io::export::write_summary_text(path, &run.summary)?;
        }
    }
    if let Some(path) = &config.export_json {
        crate::io::export::write_summary_json(path, &run.summary)?;
    }
    if let Some(path) = &config.export_aggregates {
        crate::io::export::write_aggregate_csv(path, &run.by_product)?;
    }
    if let Some(dir) = &config.charts_dir {
        crate::plot::render_dashboard_svg(dir, &run.by_date, &run.by_product)?;
    }

    Ok(())
}

fn handle_sample(args: SampleArgs) -> Result<(), AnalysisError> {
    let records = if args.rows == 0 {
        crate::data::sample::canonical_records()
    } else {
        crate::data::sample::generate_records(&crate::data::sample::SampleConfig {
            rows: args.rows,
            seed: args.seed,
            start: args.start,
        })?
    };

    crate::data::sample::write_sample_csv(&args.out, &records)
}

pub fn analysis_config_from_args(args: &AnalyzeArgs) -> AnalysisConfig {
    AnalysisConfig {
        input: args.input.clone(),
        load_mode: if args.relaxed {
            LoadMode::Relaxed
        } else {
            LoadMode::Strict
        },
        report_path: if args.no_report {
            None
        } else {
            Some(args.report.clone())
        },
        export_json: args.export_json.clone(),
        export_aggregates: args.export_aggregates.clone(),
        charts_dir: args.charts.clone(),
        top_n: args.top,
        plot: args.plot && !args.no_plot,
        plot_width: args.width,
    }
}

/// Rewrite argv so `sales` defaults to `sales analyze`.
///
/// Rules:
/// - `sales`                      -> `sales analyze`
/// - `sales -i data.csv ...`      -> `sales analyze -i data.csv ...`
/// - `sales --help/--version/-h`  -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("analyze".to_string());
        return argv;
    };

    let is_top_level_help_or_version = matches!(
        arg1.as_str(),
        "-h" | "--help" | "-V" | "--version" | "help"
    );
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(arg1.as_str(), "analyze" | "rank" | "sample");
    if is_subcommand {
        return argv;
    }

    // If the first token is a flag, treat it as "analyze flags".
    if arg1.starts_with('-') {
        argv.insert(1, "analyze".to_string());
        return argv;
    }

    // Otherwise, leave as-is.
    argv
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn argv(parts: &[&str]) -> Vec<String> {
        parts.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn bare_invocation_defaults_to_analyze() {
        assert_eq!(rewrite_args(argv(&["sales"])), argv(&["sales", "analyze"]));
    }

    #[test]
    fn leading_flag_defaults_to_analyze() {
        assert_eq!(
            rewrite_args(argv(&["sales", "-i", "data.csv"])),
            argv(&["sales", "analyze", "-i", "data.csv"])
        );
    }

    #[test]
    fn subcommands_and_help_pass_through() {
        assert_eq!(
            rewrite_args(argv(&["sales", "rank"])),
            argv(&["sales", "rank"])
        );
        assert_eq!(
            rewrite_args(argv(&["sales", "--help"])),
            argv(&["sales", "--help"])
        );
    }

    #[test]
    fn relaxed_flag_selects_relaxed_mode() {
        let cli = crate::cli::Cli::parse_from(["sales", "analyze", "--relaxed", "--no-plot"]);
        let Command::Analyze(args) = cli.command else {
            panic!("expected analyze");
        };
        let config = analysis_config_from_args(&args);
        assert_eq!(config.load_mode, LoadMode::Relaxed);
        assert!(!config.plot);
        assert_eq!(config.report_path, Some(PathBuf::from("sales_summary.txt")));
    }
}
