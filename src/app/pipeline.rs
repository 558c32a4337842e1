//! Shared analysis pipeline used by the CLI front-end.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! load -> aggregate (per dimension) -> select insights -> build summary
//!
//! The CLI can then focus on presentation (printing vs files).

use crate::agg;
use crate::domain::{AggregateResult, AnalysisConfig, GroupDim, SummaryReport};
use crate::error::AnalysisError;
use crate::io::ingest::{self, LoadedData};
use crate::report;

/// All computed outputs of a single analysis run.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub loaded: LoadedData,
    pub by_product: AggregateResult,
    pub by_date: AggregateResult,
    pub by_week: AggregateResult,
    pub summary: SummaryReport,
}

/// Execute the full analysis pipeline and return the computed outputs.
pub fn run_analysis(config: &AnalysisConfig) -> Result<RunOutput, AnalysisError> {
    // 1) Load and validate the CSV.
    let loaded = ingest::load_sale_records(&config.input, config.load_mode)?;

    // 2) Aggregate along each dimension.
    let by_product = agg::aggregate(&loaded.records, GroupDim::Product)?;
    let by_date = agg::aggregate(&loaded.records, GroupDim::Date)?;
    let by_week = agg::aggregate(&loaded.records, GroupDim::Week)?;

    // 3) Select insights and assemble the report.
    let summary = report::build_summary(&loaded, &by_product, &by_date, &by_week)?;

    Ok(RunOutput {
        loaded,
        by_product,
        by_date,
        by_week,
        summary,
    })
}
