//! Query the store by date range and region, writing CSV or JSON.

use std::fs::File;
use std::io::Write;

use anyhow::Context;
use chrono::NaiveDate;
use log::info;

use cci_core::{DateRange, Region};
use cci_data::export;
use cci_db::{Store, StoreConfig};

use crate::OutputFormat;

/// Run a range/region query against the database at `db`.
///
/// Omitted bounds default to the store's earliest/latest stored dates.
/// An empty region list returns every region.
pub fn run_query(
    db: &str,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
    regions: &[Region],
    format: OutputFormat,
    output: Option<&str>,
) -> anyhow::Result<()> {
    let store = Store::open(&StoreConfig::sqlite(db))?;

    let (start, end) = match (start, end) {
        (Some(start), Some(end)) => (start, end),
        (start, end) => {
            let (min, max) = store
                .date_bounds()?
                .context("store is empty; pass both --start and --end")?;
            (start.unwrap_or(min), end.unwrap_or(max))
        }
    };
    let range = DateRange::new(start, end)?;

    let records = store.query_range(&range, regions)?;
    info!(
        "Query {}..{} with {} region filter(s) returned {} records",
        start,
        end,
        regions.len(),
        records.len()
    );

    let mut out = open_output(output)?;
    match format {
        OutputFormat::Csv => export::records_to_csv(&records, &mut out)?,
        OutputFormat::Json => {
            out.write_all(export::records_to_json(&records)?.as_bytes())?;
            out.write_all(b"\n")?;
        }
    }
    out.flush()?;
    Ok(())
}

pub(crate) fn open_output(path: Option<&str>) -> anyhow::Result<Box<dyn Write>> {
    Ok(match path {
        Some(path) => Box::new(
            File::create(path).with_context(|| format!("failed to create {}", path))?,
        ),
        None => Box::new(std::io::stdout()),
    })
}
