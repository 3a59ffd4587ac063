//! Wide-table parsing and reshaping for COVID-19 case data.
//!
//! This crate handles the dated, per-region wide table produced by the
//! upstream loader: parsing it from CSV, deriving the global total column,
//! flattening it to normalized long records for the database layer, and
//! computing the summary figures the dashboard surfaces (latest totals,
//! top-N ranking, per-region statistics).

pub mod export;
pub mod stats;
pub mod transform;
pub mod wide;

pub use transform::wide_to_long;
pub use wide::WideTable;
