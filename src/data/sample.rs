//! Sample sales data: a fixed demo dataset and a seeded synthetic generator.
//!
//! The generator is deterministic given a seed, so demo CSVs are
//! reproducible across runs and machines.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use chrono::{Duration, NaiveDate};
use rand::prelude::*;
use rand::rngs::StdRng;
use rand_distr::Normal;

use crate::domain::{Money, SaleRecord};
use crate::error::AnalysisError;

/// Catalog used by the synthetic generator: (product, base unit price in
/// cents, quantity range).
const CATALOG: [(&str, i64, std::ops::RangeInclusive<u32>); 4] = [
    ("Laptop", 100_000, 1..=8),
    ("Mouse", 2_000, 5..=20),
    ("Keyboard", 10_000, 3..=12),
    ("Monitor", 30_000, 1..=8),
];

/// How many distinct sale dates the generator spreads rows across.
const SAMPLE_DAY_SPAN: i64 = 28;

/// Settings for the synthetic generator.
#[derive(Debug, Clone)]
pub struct SampleConfig {
    pub rows: usize,
    pub seed: u64,
    pub start: NaiveDate,
}

/// The fixed 10-row demo dataset.
pub fn canonical_records() -> Vec<SaleRecord> {
    let rows: [(u32, &str, u32, i64); 10] = [
        (1, "Laptop", 5, 500_000),
        (1, "Mouse", 15, 30_000),
        (2, "Laptop", 3, 300_000),
        (2, "Keyboard", 8, 80_000),
        (3, "Mouse", 12, 24_000),
        (3, "Monitor", 4, 120_000),
        (4, "Laptop", 6, 600_000),
        (4, "Mouse", 10, 20_000),
        (5, "Keyboard", 7, 70_000),
        (5, "Monitor", 3, 90_000),
    ];

    rows.iter()
        .enumerate()
        .map(|(i, (day, product, quantity, cents))| SaleRecord {
            line: i + 2,
            date: NaiveDate::from_ymd_opt(2025, 3, *day).expect("valid fixture date"),
            product: product.to_string(),
            quantity: *quantity,
            revenue: Money::from_cents(*cents),
        })
        .collect()
}

/// Generate `config.rows` synthetic records, deterministic per seed.
pub fn generate_records(config: &SampleConfig) -> Result<Vec<SaleRecord>, AnalysisError> {
    if config.rows == 0 {
        return Err(AnalysisError::EmptyDataset {
            source: "the sample generator (rows must be > 0)".to_string(),
        });
    }

    let mut rng = StdRng::seed_from_u64(config.seed);
    // Finite constant parameters; construction cannot fail.
    let price_noise = Normal::new(0.0, 0.1).expect("finite normal parameters");

    let mut rows = Vec::with_capacity(config.rows);
    for _ in 0..config.rows {
        let (product, base_price, quantity_range) = &CATALOG[rng.gen_range(0..CATALOG.len())];
        let quantity = rng.gen_range(quantity_range.clone());
        let day_offset = rng.gen_range(0..SAMPLE_DAY_SPAN);

        // Per-sale unit price jitter, floored so revenue stays positive.
        let jitter: f64 = price_noise.sample(&mut rng);
        let unit_cents = ((*base_price as f64) * (1.0 + jitter)).max(*base_price as f64 * 0.5);
        let revenue_cents = (unit_cents * f64::from(quantity)).round() as i64;

        rows.push((
            config.start + Duration::days(day_offset),
            product.to_string(),
            quantity,
            Money::from_cents(revenue_cents),
        ));
    }

    // Tidy CSV order: by date, then product. Line numbers are assigned after
    // sorting so they match the written file.
    rows.sort_by(|a, b| (a.0, &a.1).cmp(&(b.0, &b.1)));

    Ok(rows
        .into_iter()
        .enumerate()
        .map(|(i, (date, product, quantity, revenue))| SaleRecord {
            line: i + 2,
            date,
            product,
            quantity,
            revenue,
        })
        .collect())
}

/// Write records as a sales CSV with the fixed column contract.
pub fn write_sample_csv(path: &Path, records: &[SaleRecord]) -> Result<(), AnalysisError> {
    let io_err = |e: std::io::Error| AnalysisError::Io {
        path: path.to_path_buf(),
        message: e.to_string(),
    };

    let mut file = File::create(path).map_err(io_err)?;
    writeln!(file, "Date,Product,Quantity Sold,Revenue ($)").map_err(io_err)?;
    for record in records {
        writeln!(
            file,
            "{},{},{},{}",
            record.date.format("%Y-%m-%d"),
            record.product,
            record.quantity,
            record.revenue.to_decimal_string(),
        )
        .map_err(io_err)?;
    }

    Ok(())
}
