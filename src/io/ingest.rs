//! CSV ingest and validation.
//!
//! This module is responsible for turning the sales CSV into a clean,
//! ordered sequence of `SaleRecord`s that are safe to aggregate.
//!
//! Design goals:
//! - **Fixed schema**: exactly `Date`, `Product`, `Quantity Sold`,
//!   `Revenue ($)` — missing *and* unexpected columns are load-time errors
//! - **Row-level validation** with precise line/field diagnostics
//! - **No silent data loss**: strict mode aborts on the first bad row;
//!   relaxed mode skips but records every skipped row
//! - **Separation of concerns**: no aggregation logic here

use std::collections::HashMap;
use std::fs::File;
use std::path::Path;

use chrono::NaiveDate;
use csv::StringRecord;

use crate::domain::{LoadMode, Money, SaleRecord};
use crate::error::AnalysisError;

/// The fixed column contract: (normalized name, display name).
const EXPECTED_COLUMNS: [(&str, &str); 4] = [
    ("date", "Date"),
    ("product", "Product"),
    ("quantity sold", "Quantity Sold"),
    ("revenue ($)", "Revenue ($)"),
];

/// A row-level error encountered during a relaxed-mode load.
#[derive(Debug, Clone)]
pub struct RowError {
    pub line: usize,
    pub field: &'static str,
    pub message: String,
}

/// Ingest output: validated records plus load diagnostics.
#[derive(Debug, Clone)]
pub struct LoadedData {
    pub records: Vec<SaleRecord>,
    pub rows_read: usize,
    pub rows_used: usize,
    pub row_errors: Vec<RowError>,
}

/// Column indices resolved from the header row.
struct Columns {
    date: usize,
    product: usize,
    quantity: usize,
    revenue: usize,
}

/// Load and validate the sales CSV.
pub fn load_sale_records(path: &Path, mode: LoadMode) -> Result<LoadedData, AnalysisError> {
    let file = File::open(path).map_err(|e| AnalysisError::SourceNotFound {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(file);

    let headers = reader
        .headers()
        .map_err(|e| AnalysisError::Schema {
            message: format!("Failed to read CSV headers: {e}"),
        })?
        .clone();

    let header_map = build_header_map(&headers);
    let columns = resolve_columns(&header_map)?;

    let mut records = Vec::new();
    let mut row_errors = Vec::new();
    let mut rows_read = 0usize;

    for (idx, result) in reader.records().enumerate() {
        // +2 because:
        // - records() starts at line 1 after headers
        // - CSV is 1-based line numbers
        let line = idx + 2;
        rows_read += 1;

        let record = match result {
            Ok(r) => r,
            Err(e) => {
                let message = format!("CSV parse error: {e}");
                match mode {
                    LoadMode::Strict => {
                        return Err(AnalysisError::MalformedRecord {
                            line,
                            field: "record",
                            message,
                        });
                    }
                    LoadMode::Relaxed => {
                        row_errors.push(RowError {
                            line,
                            field: "record",
                            message,
                        });
                        continue;
                    }
                }
            }
        };

        match parse_row(&record, &columns, line) {
            Ok(sale) => records.push(sale),
            Err((field, message)) => match mode {
                LoadMode::Strict => {
                    return Err(AnalysisError::MalformedRecord {
                        line,
                        field,
                        message,
                    });
                }
                LoadMode::Relaxed => row_errors.push(RowError {
                    line,
                    field,
                    message,
                }),
            },
        }
    }

    if records.is_empty() {
        return Err(AnalysisError::EmptyDataset {
            source: format!("'{}'", path.display()),
        });
    }

    let rows_used = records.len();
    Ok(LoadedData {
        records,
        rows_read,
        rows_used,
        row_errors,
    })
}

fn build_header_map(headers: &StringRecord) -> HashMap<String, usize> {
    headers
        .iter()
        .enumerate()
        .map(|(idx, name)| (normalize_header_name(name), idx))
        .collect()
}

fn normalize_header_name(name: &str) -> String {
    // Excel and other tools sometimes emit UTF-8 CSVs with a BOM prefix on the
    // first header (e.g. "﻿Date"). If we don't strip it, schema validation
    // will incorrectly report a missing column.
    let name = name.trim().trim_start_matches('\u{feff}');
    name.to_ascii_lowercase()
}

fn resolve_columns(header_map: &HashMap<String, usize>) -> Result<Columns, AnalysisError> {
    for (normalized, display) in EXPECTED_COLUMNS {
        if !header_map.contains_key(normalized) {
            return Err(AnalysisError::Schema {
                message: format!("Missing required column: `{display}`"),
            });
        }
    }

    for name in header_map.keys() {
        if !EXPECTED_COLUMNS.iter().any(|(n, _)| *n == name.as_str()) {
            let expected: Vec<&str> = EXPECTED_COLUMNS.iter().map(|(_, d)| *d).collect();
            return Err(AnalysisError::Schema {
                message: format!(
                    "Unexpected column: `{name}` (expected exactly: {})",
                    expected.join(", ")
                ),
            });
        }
    }

    Ok(Columns {
        date: header_map["date"],
        product: header_map["product"],
        quantity: header_map["quantity sold"],
        revenue: header_map["revenue ($)"],
    })
}

fn parse_row(
    record: &StringRecord,
    columns: &Columns,
    line: usize,
) -> Result<SaleRecord, (&'static str, String)> {
    let date_text = field(record, columns.date, "Date")?;
    let date = NaiveDate::parse_from_str(date_text, "%Y-%m-%d")
        .map_err(|_| ("Date", format!("invalid ISO-8601 date '{date_text}'")))?;

    let product = field(record, columns.product, "Product")?;
    if product.is_empty() {
        return Err(("Product", "empty product name".to_string()));
    }

    let quantity_text = field(record, columns.quantity, "Quantity Sold")?;
    let quantity = quantity_text
        .parse::<i64>()
        .map_err(|_| ("Quantity Sold", format!("not an integer: '{quantity_text}'")))?;
    if quantity < 0 {
        return Err(("Quantity Sold", format!("negative quantity ({quantity})")));
    }
    let quantity = u32::try_from(quantity)
        .map_err(|_| ("Quantity Sold", format!("quantity out of range ({quantity})")))?;

    let revenue_text = field(record, columns.revenue, "Revenue ($)")?;
    let revenue = Money::parse(revenue_text).map_err(|msg| ("Revenue ($)", msg))?;

    Ok(SaleRecord {
        line,
        date,
        product: product.to_string(),
        quantity,
        revenue,
    })
}

fn field<'r>(
    record: &'r StringRecord,
    idx: usize,
    name: &'static str,
) -> Result<&'r str, (&'static str, String)> {
    record
        .get(idx)
        .ok_or_else(|| (name, "missing value".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const CANONICAL: &str = "\
Date,Product,Quantity Sold,Revenue ($)
2025-03-01,Laptop,5,5000
2025-03-01,Mouse,15,300
2025-03-02,Laptop,3,3000
";

    fn write_csv(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn loads_valid_rows() {
        let file = write_csv(CANONICAL);
        let loaded = load_sale_records(file.path(), LoadMode::Strict).unwrap();

        assert_eq!(loaded.rows_read, 3);
        assert_eq!(loaded.rows_used, 3);
        assert!(loaded.row_errors.is_empty());

        let first = &loaded.records[0];
        assert_eq!(first.line, 2);
        assert_eq!(first.date, NaiveDate::from_ymd_opt(2025, 3, 1).unwrap());
        assert_eq!(first.product, "Laptop");
        assert_eq!(first.quantity, 5);
        assert_eq!(first.revenue, Money::from_cents(500_000));
    }

    #[test]
    fn load_preserves_raw_sums_exactly() {
        let file = write_csv(
            "Date,Product,Quantity Sold,Revenue ($)\n\
             2025-03-01,Widget,1,0.10\n\
             2025-03-01,Widget,1,0.20\n\
             2025-03-01,Widget,1,0.30\n",
        );
        let loaded = load_sale_records(file.path(), LoadMode::Strict).unwrap();
        let total: i64 = loaded.records.iter().map(|r| r.revenue.cents()).sum();
        assert_eq!(total, 60);
    }

    #[test]
    fn missing_file_is_source_not_found() {
        let err = load_sale_records(Path::new("no/such/file.csv"), LoadMode::Strict).unwrap_err();
        assert!(matches!(err, AnalysisError::SourceNotFound { .. }));
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn missing_column_is_schema_error() {
        let file = write_csv("Date,Product,Quantity Sold\n2025-03-01,Laptop,5\n");
        let err = load_sale_records(file.path(), LoadMode::Strict).unwrap_err();
        match err {
            AnalysisError::Schema { message } => {
                assert!(message.contains("Revenue ($)"), "message: {message}");
            }
            other => panic!("expected Schema error, got {other:?}"),
        }
    }

    #[test]
    fn unexpected_column_is_schema_error() {
        let file = write_csv(
            "Date,Product,Quantity Sold,Revenue ($),Region\n2025-03-01,Laptop,5,5000,EU\n",
        );
        let err = load_sale_records(file.path(), LoadMode::Strict).unwrap_err();
        match err {
            AnalysisError::Schema { message } => {
                assert!(message.contains("region"), "message: {message}");
            }
            other => panic!("expected Schema error, got {other:?}"),
        }
    }

    #[test]
    fn negative_quantity_aborts_strict_load() {
        let file = write_csv(
            "Date,Product,Quantity Sold,Revenue ($)\n\
             2025-03-01,Laptop,5,5000\n\
             2025-03-02,Mouse,-3,60\n",
        );
        let err = load_sale_records(file.path(), LoadMode::Strict).unwrap_err();
        match err {
            AnalysisError::MalformedRecord { line, field, .. } => {
                assert_eq!(line, 3);
                assert_eq!(field, "Quantity Sold");
            }
            other => panic!("expected MalformedRecord, got {other:?}"),
        }
    }

    #[test]
    fn bad_date_names_the_field() {
        let file = write_csv("Date,Product,Quantity Sold,Revenue ($)\n03/01/2025,Laptop,5,5000\n");
        let err = load_sale_records(file.path(), LoadMode::Strict).unwrap_err();
        match err {
            AnalysisError::MalformedRecord { line, field, .. } => {
                assert_eq!(line, 2);
                assert_eq!(field, "Date");
            }
            other => panic!("expected MalformedRecord, got {other:?}"),
        }
    }

    #[test]
    fn relaxed_mode_skips_and_reports() {
        let file = write_csv(
            "Date,Product,Quantity Sold,Revenue ($)\n\
             2025-03-01,Laptop,5,5000\n\
             2025-03-02,Mouse,-3,60\n\
             2025-03-03,Keyboard,7,700\n",
        );
        let loaded = load_sale_records(file.path(), LoadMode::Relaxed).unwrap();
        assert_eq!(loaded.rows_read, 3);
        assert_eq!(loaded.rows_used, 2);
        assert_eq!(loaded.row_errors.len(), 1);
        assert_eq!(loaded.row_errors[0].line, 3);
        assert_eq!(loaded.row_errors[0].field, "Quantity Sold");
    }

    #[test]
    fn header_only_input_is_empty_dataset() {
        let file = write_csv("Date,Product,Quantity Sold,Revenue ($)\n");
        let err = load_sale_records(file.path(), LoadMode::Strict).unwrap_err();
        assert!(matches!(err, AnalysisError::EmptyDataset { .. }));
        assert_eq!(err.exit_code(), 3);
    }

    #[test]
    fn all_rows_malformed_in_relaxed_mode_is_empty_dataset() {
        let file = write_csv("Date,Product,Quantity Sold,Revenue ($)\n2025-03-01,Laptop,x,y\n");
        let err = load_sale_records(file.path(), LoadMode::Relaxed).unwrap_err();
        assert!(matches!(err, AnalysisError::EmptyDataset { .. }));
    }

    #[test]
    fn bom_and_case_in_headers_are_tolerated() {
        let file = write_csv("\u{feff}date,product,quantity sold,revenue ($)\n2025-03-01,Laptop,5,5000\n");
        let loaded = load_sale_records(file.path(), LoadMode::Strict).unwrap();
        assert_eq!(loaded.rows_used, 1);
    }
}
