//! Formatted text output for the summary report and ranking table.
//!
//! We keep formatting code in one place so:
//! - the aggregation/selection code stays clean and testable
//! - output changes are localized (important for golden tests)
//!
//! Formatting is a pure function of the already-built report values; nothing
//! here recomputes statistics.

use crate::domain::{RankedGroup, SummaryReport, group_thousands};
use crate::io::ingest::LoadedData;

/// Render the two-section summary report.
///
/// The layout is fixed: section headers, `=` rules, and one labeled line per
/// figure, in this order.
pub fn format_summary_text(report: &SummaryReport) -> String {
    let mut out = String::new();

    out.push_str("SALES ANALYSIS SUMMARY\n");
    out.push_str(&"=".repeat(25));
    out.push_str("\n\n");

    out.push_str(&format!("Total Revenue: {}\n", report.total_revenue));
    out.push_str(&format!(
        "Best-Selling Product: {} ({})\n",
        report.best_seller.key, report.best_seller.value
    ));
    out.push_str(&format!(
        "Highest Sales Day: {} ({})\n",
        report.peak_day.key, report.peak_day.value
    ));
    out.push('\n');

    out.push_str("ADDITIONAL INSIGHTS\n");
    out.push_str(&"=".repeat(20));
    out.push('\n');
    out.push_str(&format!(
        "Total Units Sold: {} units\n",
        group_thousands(report.total_units)
    ));
    out.push_str(&format!(
        "Number of Unique Products: {}\n",
        report.unique_products
    ));
    out.push_str(&format!(
        "Average Revenue per Sale: {}\n",
        report.avg_revenue_per_sale
    ));

    out
}

/// Format the product performance ranking as an aligned table.
pub fn format_ranking_table(rows: &[RankedGroup]) -> String {
    let mut out = String::new();

    out.push_str("Product Performance Ranking:\n");
    out.push_str(&format!(
        "{:>4} {:<24} {:>8} {:>14}\n",
        "rank", "product", "units", "revenue"
    ));
    out.push_str(&format!("{:->4} {:-<24} {:->8} {:->14}\n", "", "", "", ""));

    for row in rows {
        out.push_str(&format!(
            "{:>4} {:<24} {:>8} {:>14}\n",
            row.rank,
            truncate(&row.key.to_string(), 24),
            group_thousands(row.quantity_sum),
            row.revenue_sum.to_string(),
        ));
    }

    out
}

/// One-line load diagnostics, plus any skipped rows from a relaxed load.
pub fn format_load_diagnostics(loaded: &LoadedData) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "Records: {} used / {} read\n",
        loaded.rows_used, loaded.rows_read
    ));
    for err in &loaded.row_errors {
        out.push_str(&format!(
            "  (skipped line {}) field `{}`: {}\n",
            err.line, err.field, err.message
        ));
    }

    out
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out = String::new();
    for (i, ch) in s.chars().enumerate() {
        if i + 1 >= max {
            break;
        }
        out.push(ch);
    }
    out.push('.');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    use crate::domain::{ExtremalPick, GroupKey, MetricValue, Money, WeekKey};

    fn scenario_report() -> SummaryReport {
        SummaryReport {
            record_count: 3,
            total_revenue: Money::from_cents(830_000),
            total_units: 23,
            unique_products: 2,
            avg_revenue_per_sale: Money::from_cents(276_667),
            best_seller: ExtremalPick {
                key: GroupKey::Product("Mouse".to_string()),
                value: MetricValue::Units(15),
            },
            peak_day: ExtremalPick {
                key: GroupKey::Date(NaiveDate::from_ymd_opt(2025, 3, 1).unwrap()),
                value: MetricValue::Revenue(Money::from_cents(530_000)),
            },
            peak_week: ExtremalPick {
                key: GroupKey::Week(WeekKey { year: 2025, week: 9 }),
                value: MetricValue::Revenue(Money::from_cents(830_000)),
            },
            product_ranking: vec![
                RankedGroup {
                    rank: 1,
                    key: GroupKey::Product("Laptop".to_string()),
                    quantity_sum: 8,
                    revenue_sum: Money::from_cents(800_000),
                },
                RankedGroup {
                    rank: 2,
                    key: GroupKey::Product("Mouse".to_string()),
                    quantity_sum: 15,
                    revenue_sum: Money::from_cents(30_000),
                },
            ],
        }
    }

    #[test]
    fn summary_text_matches_fixed_layout() {
        let expected = "\
SALES ANALYSIS SUMMARY
=========================

Total Revenue: $8,300.00
Best-Selling Product: Mouse (15 units sold)
Highest Sales Day: 2025-03-01 ($5,300.00)

ADDITIONAL INSIGHTS
====================
Total Units Sold: 23 units
Number of Unique Products: 2
Average Revenue per Sale: $2,766.67
";
        assert_eq!(format_summary_text(&scenario_report()), expected);
    }

    #[test]
    fn summary_formatting_is_pure() {
        let report = scenario_report();
        assert_eq!(format_summary_text(&report), format_summary_text(&report));
    }

    #[test]
    fn ranking_table_lists_rows_in_order() {
        let table = format_ranking_table(&scenario_report().product_ranking);
        let laptop_at = table.find("Laptop").unwrap();
        let mouse_at = table.find("Mouse").unwrap();
        assert!(laptop_at < mouse_at);
        assert!(table.contains("$8,000.00"));
        assert!(table.contains("$300.00"));
    }

    #[test]
    fn truncate_caps_long_names() {
        assert_eq!(truncate("short", 24), "short");
        let long = "x".repeat(40);
        let cut = truncate(&long, 24);
        assert_eq!(cut.chars().count(), 24);
        assert!(cut.ends_with('.'));
    }

    #[test]
    fn metric_value_wording() {
        assert_eq!(MetricValue::Units(1_500).to_string(), "1,500 units sold");
        assert_eq!(
            MetricValue::Revenue(Money::from_cents(530_000)).to_string(),
            "$5,300.00"
        );
    }
}
