//! Write analysis outputs to files.
//!
//! Exports are meant to be easy to consume downstream: the text report for
//! humans, pretty JSON for tooling, and a flat CSV of one aggregate for
//! spreadsheets.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::domain::{AggregateResult, SummaryReport};
use crate::error::AnalysisError;
use crate::report::format_summary_text;

/// Write the two-section text report.
pub fn write_summary_text(path: &Path, report: &SummaryReport) -> Result<(), AnalysisError> {
    std::fs::write(path, format_summary_text(report)).map_err(|e| AnalysisError::Io {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Write the structured summary as pretty JSON.
///
/// Money fields serialize as integer cents, so consumers never see
/// floating-point currency.
pub fn write_summary_json(path: &Path, report: &SummaryReport) -> Result<(), AnalysisError> {
    let file = File::create(path).map_err(|e| AnalysisError::Io {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    serde_json::to_writer_pretty(file, report).map_err(|e| AnalysisError::Io {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Write one aggregate as CSV: `key,quantity_sum,revenue_sum,count`.
pub fn write_aggregate_csv(path: &Path, agg: &AggregateResult) -> Result<(), AnalysisError> {
    let io_err = |e: std::io::Error| AnalysisError::Io {
        path: path.to_path_buf(),
        message: e.to_string(),
    };

    let mut file = File::create(path).map_err(io_err)?;
    writeln!(file, "{},quantity_sum,revenue_sum,count", agg.dim.display_name()).map_err(io_err)?;

    for (key, totals) in &agg.groups {
        writeln!(
            file,
            "{},{},{},{}",
            key,
            totals.quantity_sum,
            totals.revenue_sum.to_decimal_string(),
            totals.count,
        )
        .map_err(io_err)?;
    }

    Ok(())
}
