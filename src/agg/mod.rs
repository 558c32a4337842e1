//! Grouped accumulation over sale records.
//!
//! One generic single-pass reduction serves every grouping dimension; the
//! dimension only supplies the key-extraction function. Totals use integer
//! units throughout (u64 quantities, cents revenue) so sums are exact no
//! matter how many rows are added.

use std::collections::BTreeMap;

use crate::domain::{AggregateResult, GroupDim, GroupKey, GroupTotals, SaleRecord};
use crate::error::AnalysisError;

/// Aggregate along a built-in dimension (by product, by date, by ISO week).
pub fn aggregate(records: &[SaleRecord], dim: GroupDim) -> Result<AggregateResult, AnalysisError> {
    aggregate_with(records, dim, |record| Ok(dim.key_of(record)))
}

/// Aggregate with an arbitrary (fallible) key extractor.
///
/// The extractor is invoked exactly once per record. An extractor failure
/// surfaces as `InvalidGrouping` naming the offending record.
pub fn aggregate_with<F>(
    records: &[SaleRecord],
    dim: GroupDim,
    key_of: F,
) -> Result<AggregateResult, AnalysisError>
where
    F: Fn(&SaleRecord) -> Result<GroupKey, String>,
{
    if records.is_empty() {
        return Err(AnalysisError::EmptyDataset {
            source: "the aggregation input".to_string(),
        });
    }

    let mut groups: BTreeMap<GroupKey, GroupTotals> = BTreeMap::new();
    for record in records {
        let key = key_of(record).map_err(|message| AnalysisError::InvalidGrouping {
            line: record.line,
            product: record.product.clone(),
            message,
        })?;

        let totals = groups.entry(key).or_default();
        totals.quantity_sum += u64::from(record.quantity);
        totals.revenue_sum += record.revenue;
        totals.count += 1;
    }

    Ok(AggregateResult { dim, groups })
}
