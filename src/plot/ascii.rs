//! ASCII bar chart for terminal output.
//!
//! This is intentionally "dumb" (fixed-width rows), optimized for:
//! - quick visual sanity checks in a terminal
//! - deterministic output (helpful for golden tests)
//!
//! Bars are horizontal `#` runs, one row per group, in ascending key order
//! (lexical for products, chronological for dates/weeks).

use crate::domain::AggregateResult;

const LABEL_WIDTH: usize = 16;

/// Render one bar per group, scaled so the largest revenue fills `width`
/// columns.
pub fn render_revenue_bars(agg: &AggregateResult, width: usize) -> String {
    let width = width.max(10);

    let max_cents = agg
        .groups
        .values()
        .map(|t| t.revenue_sum.cents())
        .max()
        .unwrap_or(0);

    let mut out = String::new();
    for (key, totals) in &agg.groups {
        let cents = totals.revenue_sum.cents();
        let bar_len = if max_cents == 0 {
            0
        } else {
            // Round to the nearest column; non-zero revenue always gets at
            // least one column so small groups stay visible.
            (((cents as u128) * (width as u128) + (max_cents as u128) / 2) / (max_cents as u128))
                .max(if cents > 0 { 1 } else { 0 }) as usize
        };

        out.push_str(&format!(
            "{:<label$} | {:<width$} {}\n",
            clip(&key.to_string(), LABEL_WIDTH),
            "#".repeat(bar_len),
            totals.revenue_sum,
            label = LABEL_WIDTH,
            width = width,
        ));
    }

    out
}

fn clip(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    s.chars().take(max - 1).chain(std::iter::once('.')).collect()
}
