//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - the loaded sales records (`SaleRecord`) and exact money type (`Money`)
//! - grouping keys and dimensions (`GroupKey`, `WeekKey`, `GroupDim`)
//! - insight outputs (`ExtremalPick`, `RankedGroup`)
//! - the final report structure (`SummaryReport`)

pub mod types;

pub use types::*;
