//! Extremal and ranked insight selection over aggregates.
//!
//! All selection here is deterministic: ties on the metric are broken by
//! ascending key (lexical for products, chronological for dates and weeks).
//! A naive "first max" would depend on accumulation order, so the tie-break
//! is explicit.

use crate::domain::{
    AggregateResult, ExtremalPick, GroupKey, GroupTotals, Metric, MetricValue, RankedGroup,
};
use crate::error::AnalysisError;

/// Select the group maximizing `metric`.
///
/// The source map iterates keys ascending, so with a strict `>` comparison
/// the smallest key among tied maxima is kept.
pub fn best_by(agg: &AggregateResult, metric: Metric) -> Result<ExtremalPick, AnalysisError> {
    let mut best: Option<(&GroupKey, &GroupTotals)> = None;

    for (key, totals) in &agg.groups {
        let better = match best {
            None => true,
            Some((_, current)) => match metric {
                Metric::Units => totals.quantity_sum > current.quantity_sum,
                Metric::Revenue => totals.revenue_sum > current.revenue_sum,
            },
        };
        if better {
            best = Some((key, totals));
        }
    }

    let (key, totals) = best.ok_or_else(|| AnalysisError::EmptyAggregate {
        dimension: agg.dim.display_name().to_string(),
    })?;

    let value = match metric {
        Metric::Units => MetricValue::Units(totals.quantity_sum),
        Metric::Revenue => MetricValue::Revenue(totals.revenue_sum),
    };

    Ok(ExtremalPick {
        key: key.clone(),
        value,
    })
}

/// Rank all groups by revenue, descending, with 1-based ranks.
///
/// Ties keep ascending key order, so the result is a stable total order.
pub fn rank_by_revenue(agg: &AggregateResult) -> Result<Vec<RankedGroup>, AnalysisError> {
    if agg.is_empty() {
        return Err(AnalysisError::EmptyAggregate {
            dimension: agg.dim.display_name().to_string(),
        });
    }

    let mut rows: Vec<(&GroupKey, &GroupTotals)> = agg.groups.iter().collect();
    rows.sort_by(|a, b| b.1.revenue_sum.cmp(&a.1.revenue_sum).then_with(|| a.0.cmp(b.0)));

    Ok(rows
        .into_iter()
        .enumerate()
        .map(|(i, (key, totals))| RankedGroup {
            rank: i + 1,
            key: key.clone(),
            quantity_sum: totals.quantity_sum,
            revenue_sum: totals.revenue_sum,
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    use crate::domain::{GroupDim, Money};

    fn product_agg(entries: &[(&str, u64, i64)]) -> AggregateResult {
        let mut groups = BTreeMap::new();
        for (name, units, cents) in entries {
            groups.insert(
                GroupKey::Product(name.to_string()),
                GroupTotals {
                    quantity_sum: *units,
                    revenue_sum: Money::from_cents(*cents),
                    count: 1,
                },
            );
        }
        AggregateResult {
            dim: GroupDim::Product,
            groups,
        }
    }

    #[test]
    fn best_by_units_picks_the_maximum() {
        let agg = product_agg(&[("Laptop", 14, 1_400_000), ("Mouse", 37, 74_000)]);
        let pick = best_by(&agg, Metric::Units).unwrap();
        assert_eq!(pick.key, GroupKey::Product("Mouse".to_string()));
        assert_eq!(pick.value, MetricValue::Units(37));
    }

    #[test]
    fn ties_break_toward_the_smaller_key() {
        let agg = product_agg(&[("Mouse", 10, 200), ("Keyboard", 10, 300), ("Ant", 3, 100)]);
        let pick = best_by(&agg, Metric::Units).unwrap();
        assert_eq!(pick.key, GroupKey::Product("Keyboard".to_string()));
    }

    #[test]
    fn selection_is_repeatable() {
        let agg = product_agg(&[("B", 5, 500), ("A", 5, 500), ("C", 5, 500)]);
        let first = best_by(&agg, Metric::Revenue).unwrap();
        let second = best_by(&agg, Metric::Revenue).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.key, GroupKey::Product("A".to_string()));
    }

    #[test]
    fn ranking_is_a_total_order() {
        let agg = product_agg(&[
            ("Monitor", 7, 210_000),
            ("Laptop", 14, 1_400_000),
            ("Mouse", 37, 74_000),
            ("Keyboard", 15, 150_000),
        ]);
        let ranked = rank_by_revenue(&agg).unwrap();

        assert_eq!(ranked.len(), 4);
        assert_eq!(ranked[0].rank, 1);
        assert_eq!(ranked[0].key, GroupKey::Product("Laptop".to_string()));

        for pair in ranked.windows(2) {
            let (a, b) = (&pair[0], &pair[1]);
            assert!(
                a.revenue_sum > b.revenue_sum
                    || (a.revenue_sum == b.revenue_sum && a.key <= b.key)
            );
            assert_eq!(a.rank + 1, b.rank);
        }
    }

    #[test]
    fn ranking_ties_keep_key_order() {
        let agg = product_agg(&[("B", 1, 500), ("A", 2, 500), ("C", 3, 900)]);
        let ranked = rank_by_revenue(&agg).unwrap();
        assert_eq!(ranked[0].key, GroupKey::Product("C".to_string()));
        assert_eq!(ranked[1].key, GroupKey::Product("A".to_string()));
        assert_eq!(ranked[2].key, GroupKey::Product("B".to_string()));
    }

    #[test]
    fn empty_aggregate_is_an_error() {
        let agg = AggregateResult {
            dim: GroupDim::Product,
            groups: BTreeMap::new(),
        };
        let err = best_by(&agg, Metric::Units).unwrap_err();
        assert!(matches!(err, AnalysisError::EmptyAggregate { .. }));
        assert_eq!(err.exit_code(), 3);

        let err = rank_by_revenue(&agg).unwrap_err();
        assert!(matches!(err, AnalysisError::EmptyAggregate { .. }));
    }
}
