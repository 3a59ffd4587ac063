//! CSV and JSON export of long records and summary statistics.
//!
//! These feed the dashboard's download buttons and any downstream plotting
//! tool; JSON output uses the same flattened shape the model structs
//! serialize to.

use std::io::Write;

use cci_core::{dates, CaseRecord};

use crate::stats::RegionSummary;

/// Write long records as CSV with a `date,country,province,cases` header.
/// An absent province is written as an empty field.
pub fn records_to_csv<W: Write>(records: &[CaseRecord], writer: W) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(["date", "country", "province", "cases"])?;
    for record in records {
        wtr.write_record([
            dates::format_date(&record.date).as_str(),
            record.region.country.as_str(),
            record.region.province.as_deref().unwrap_or(""),
            record.cases.to_string().as_str(),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

/// Serialize long records as a pretty-printed JSON array.
pub fn records_to_json(records: &[CaseRecord]) -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(records)?)
}

/// Write summary statistics as CSV, one row per region.
pub fn summaries_to_csv<W: Write>(summaries: &[RegionSummary], writer: W) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record([
        "region",
        "latest_total",
        "peak_daily_increase",
        "peak_date",
        "mean_daily_increase",
    ])?;
    for summary in summaries {
        wtr.write_record([
            summary.region.label().as_str(),
            summary.latest_total.to_string().as_str(),
            summary.peak_daily_increase.to_string().as_str(),
            dates::format_date(&summary.peak_date).as_str(),
            summary.mean_daily_increase.to_string().as_str(),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

/// Serialize summary statistics as a pretty-printed JSON array.
pub fn summaries_to_json(summaries: &[RegionSummary]) -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(summaries)?)
}
