//! Chart rendering over aggregated results.
//!
//! - terminal bar chart (`ascii`)
//! - SVG dashboard files via Plotters (`charts`)
//!
//! Both consume `AggregateResult` values only — charts never re-derive
//! statistics from raw records.

pub mod ascii;
pub mod charts;

pub use ascii::*;
pub use charts::*;
