//! Build the `SummaryReport` from the per-dimension aggregates.

use crate::domain::{AggregateResult, Metric, Money, SummaryReport};
use crate::error::AnalysisError;
use crate::io::ingest::LoadedData;

/// Assemble the final report structure.
///
/// Totals are derived from the by-product aggregate (sums are conserved
/// under grouping, so any dimension would do); insights come from the
/// selector. Nothing here reads raw records except the record count.
pub fn build_summary(
    loaded: &LoadedData,
    by_product: &AggregateResult,
    by_date: &AggregateResult,
    by_week: &AggregateResult,
) -> Result<SummaryReport, AnalysisError> {
    let record_count = loaded.records.len();

    let mut total_units = 0u64;
    let mut total_revenue = Money::ZERO;
    for totals in by_product.groups.values() {
        total_units += totals.quantity_sum;
        total_revenue += totals.revenue_sum;
    }

    let avg_revenue_per_sale = Money::from_cents(div_round_half_up(
        total_revenue.cents(),
        record_count as i64,
    ));

    let best_seller = crate::insight::best_by(by_product, Metric::Units)?;
    let peak_day = crate::insight::best_by(by_date, Metric::Revenue)?;
    let peak_week = crate::insight::best_by(by_week, Metric::Revenue)?;
    let product_ranking = crate::insight::rank_by_revenue(by_product)?;

    Ok(SummaryReport {
        record_count,
        total_revenue,
        total_units,
        unique_products: by_product.len(),
        avg_revenue_per_sale,
        best_seller,
        peak_day,
        peak_week,
        product_ranking,
    })
}

/// Integer division rounding half away from zero (inputs are non-negative).
fn div_round_half_up(numerator: i64, denominator: i64) -> i64 {
    (numerator + denominator / 2) / denominator
}
