//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - used in-memory during aggregation and selection
//! - exported to JSON/CSV
//! - consumed by presentation layers (reports, charts) without recomputation

use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

use chrono::{Datelike, NaiveDate};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Exact currency amount in integer cents.
///
/// Revenue is accumulated in cents so repeated additions stay exact; the
/// conversion to a display string (two decimals, thousands separators)
/// happens only at the formatting boundary.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    pub const ZERO: Money = Money(0);

    pub fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    pub fn cents(self) -> i64 {
        self.0
    }

    /// Parse a non-negative decimal amount with at most two fraction digits.
    ///
    /// Accepts an optional `$` prefix and thousands commas (`1,234.56`), since
    /// spreadsheet exports often carry both.
    pub fn parse(text: &str) -> Result<Money, String> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err("empty value".to_string());
        }
        let unprefixed = trimmed.strip_prefix('$').unwrap_or(trimmed);
        if unprefixed.starts_with('-') {
            return Err(format!("negative amount '{trimmed}'"));
        }

        let cleaned: String = unprefixed.chars().filter(|&c| c != ',').collect();
        let (whole, frac) = match cleaned.split_once('.') {
            Some((w, f)) => (w, f),
            None => (cleaned.as_str(), ""),
        };
        if whole.is_empty() && frac.is_empty() {
            return Err(format!("not a number: '{trimmed}'"));
        }
        if frac.len() > 2 {
            return Err(format!("more than two decimal places in '{trimmed}'"));
        }
        if !frac.chars().all(|c| c.is_ascii_digit()) {
            return Err(format!("not a number: '{trimmed}'"));
        }

        let whole_cents = if whole.is_empty() {
            0
        } else {
            whole
                .parse::<i64>()
                .map_err(|_| format!("not a number: '{trimmed}'"))?
                .checked_mul(100)
                .ok_or_else(|| format!("amount out of range: '{trimmed}'"))?
        };

        let frac_cents = if frac.is_empty() {
            0
        } else {
            let mut digits = frac.to_string();
            while digits.len() < 2 {
                digits.push('0');
            }
            digits
                .parse::<i64>()
                .map_err(|_| format!("not a number: '{trimmed}'"))?
        };

        whole_cents
            .checked_add(frac_cents)
            .map(Money)
            .ok_or_else(|| format!("amount out of range: '{trimmed}'"))
    }

    /// Plain `1234.56` form (no separators) for CSV output.
    pub fn to_decimal_string(self) -> String {
        format!("{}.{:02}", self.0 / 100, (self.0 % 100).abs())
    }

    /// Dollars as `f64`, for chart scaling only.
    pub fn as_f64_dollars(self) -> f64 {
        self.0 as f64 / 100.0
    }
}

impl std::ops::Add for Money {
    type Output = Money;

    fn add(self, rhs: Money) -> Money {
        Money(self.0 + rhs.0)
    }
}

impl std::ops::AddAssign for Money {
    fn add_assign(&mut self, rhs: Money) {
        self.0 += rhs.0;
    }
}

impl fmt::Display for Money {
    /// Currency form: `$1,234.56`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "${}.{:02}",
            group_thousands((self.0 / 100).unsigned_abs()),
            (self.0 % 100).abs()
        )
    }
}

/// Insert `,` separators into a non-negative integer: `1234567` -> `1,234,567`.
pub fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// One loaded sales transaction. Immutable after load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaleRecord {
    /// 1-based CSV line this record came from (the header is line 1).
    ///
    /// Carried for error identity only; it never affects aggregation.
    pub line: usize,
    pub date: NaiveDate,
    pub product: String,
    pub quantity: u32,
    pub revenue: Money,
}

/// ISO-8601 week-of-year key.
///
/// `year` is the ISO week-year, which can differ from the calendar year at
/// year boundaries (e.g. 2024-12-30 belongs to 2025-W01).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct WeekKey {
    pub year: i32,
    pub week: u32,
}

impl WeekKey {
    pub fn from_date(date: NaiveDate) -> Self {
        let iso = date.iso_week();
        WeekKey {
            year: iso.year(),
            week: iso.week(),
        }
    }
}

impl fmt::Display for WeekKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-W{:02}", self.year, self.week)
    }
}

/// A value used to partition records along one grouping dimension.
///
/// The derived `Ord` gives deterministic iteration and the ascending-key
/// tie-break the selector relies on (lexical for products, chronological for
/// dates and weeks).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupKey {
    Product(String),
    Date(NaiveDate),
    Week(WeekKey),
}

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GroupKey::Product(name) => write!(f, "{name}"),
            GroupKey::Date(date) => write!(f, "{date}"),
            GroupKey::Week(week) => write!(f, "{week}"),
        }
    }
}

/// The built-in grouping dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum GroupDim {
    Product,
    Date,
    Week,
}

impl GroupDim {
    /// Human-readable label for diagnostics and terminal output.
    pub fn display_name(self) -> &'static str {
        match self {
            GroupDim::Product => "product",
            GroupDim::Date => "date",
            GroupDim::Week => "week",
        }
    }

    /// Key-extraction for the built-in dimensions.
    ///
    /// Infallible because dates are already parsed at load time; arbitrary
    /// (fallible) extractors go through `agg::aggregate_with`.
    pub fn key_of(self, record: &SaleRecord) -> GroupKey {
        match self {
            GroupDim::Product => GroupKey::Product(record.product.clone()),
            GroupDim::Date => GroupKey::Date(record.date),
            GroupDim::Week => GroupKey::Week(WeekKey::from_date(record.date)),
        }
    }
}

/// Running totals for one group.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupTotals {
    pub quantity_sum: u64,
    pub revenue_sum: Money,
    pub count: usize,
}

/// Which metric an extremal pick maximizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Metric {
    Units,
    Revenue,
}

/// The metric value attached to an extremal pick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MetricValue {
    Units(u64),
    Revenue(Money),
}

impl fmt::Display for MetricValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetricValue::Units(units) => write!(f, "{} units sold", group_thousands(*units)),
            MetricValue::Revenue(amount) => write!(f, "{amount}"),
        }
    }
}

/// The single group maximizing a metric, with deterministic tie-break.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtremalPick {
    pub key: GroupKey,
    pub value: MetricValue,
}

/// One row of a ranked list (1-based rank, descending by revenue).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedGroup {
    pub rank: usize,
    pub key: GroupKey,
    pub quantity_sum: u64,
    pub revenue_sum: Money,
}

/// The final immutable report bundle, ready for serialization.
///
/// Built once by `report::build_summary`; formatters and chart renderers
/// consume it (and the aggregates) read-only — nothing downstream re-derives
/// statistics from raw records.
#[derive(Debug, Clone, Serialize)]
pub struct SummaryReport {
    pub record_count: usize,
    pub total_revenue: Money,
    pub total_units: u64,
    pub unique_products: usize,
    pub avg_revenue_per_sale: Money,
    pub best_seller: ExtremalPick,
    pub peak_day: ExtremalPick,
    pub peak_week: ExtremalPick,
    pub product_ranking: Vec<RankedGroup>,
}

/// Whether a malformed row aborts the load or is skipped and reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LoadMode {
    /// Abort the whole load on the first malformed row (the default, to
    /// avoid silent data loss).
    Strict,
    /// Skip malformed rows, collecting per-row errors for reporting.
    Relaxed,
}

/// A full run's configuration as understood by the pipeline.
///
/// All paths are explicit parameters — there is no implicit directory
/// discovery.
#[derive(Debug, Clone)]
pub struct AnalysisConfig {
    pub input: PathBuf,
    pub load_mode: LoadMode,

    pub report_path: Option<PathBuf>,
    pub export_json: Option<PathBuf>,
    pub export_aggregates: Option<PathBuf>,
    pub charts_dir: Option<PathBuf>,

    /// Ranking rows to show in the terminal (0 = all).
    pub top_n: usize,
    pub plot: bool,
    pub plot_width: usize,
}

/// Ordered, unique-keyed totals for one grouping dimension.
///
/// `BTreeMap` keeps iteration deterministic (ascending key), which the
/// selector's tie-break and the chart/table renderers rely on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregateResult {
    pub dim: GroupDim,
    pub groups: BTreeMap<GroupKey, GroupTotals>,
}

impl AggregateResult {
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn get(&self, key: &GroupKey) -> Option<&GroupTotals> {
        self.groups.get(key)
    }
}
