//! Summary statistics and top-N rankings from a wide cases CSV.

use std::io::Write;

use anyhow::Context;
use log::info;

use cci_core::Region;
use cci_data::stats::summary_stats;
use cci_data::{export, WideTable};

use crate::query::open_output;
use crate::OutputFormat;

/// Compute per-region summary statistics from the wide CSV at `input`.
pub fn run_stats(
    input: &str,
    regions: &[Region],
    format: OutputFormat,
    output: Option<&str>,
) -> anyhow::Result<()> {
    let table = read_wide(input)?;
    let summaries = summary_stats(&table, regions);
    info!("Computed summaries for {} region(s)", summaries.len());

    let mut out = open_output(output)?;
    match format {
        OutputFormat::Csv => export::summaries_to_csv(&summaries, &mut out)?,
        OutputFormat::Json => {
            out.write_all(export::summaries_to_json(&summaries)?.as_bytes())?;
            out.write_all(b"\n")?;
        }
    }
    out.flush()?;
    Ok(())
}

/// Print the top `count` regions by latest cumulative total as CSV.
pub fn run_top(input: &str, count: usize) -> anyhow::Result<()> {
    let table = read_wide(input)?;
    let top = table.top_regions(count);

    let mut out = open_output(None)?;
    writeln!(out, "region,latest_total")?;
    for (region, total) in top {
        writeln!(out, "{},{}", region.label(), total)?;
    }
    out.flush()?;
    Ok(())
}

fn read_wide(input: &str) -> anyhow::Result<WideTable> {
    let data = std::fs::read_to_string(input)
        .with_context(|| format!("failed to read wide CSV {}", input))?;
    WideTable::from_csv(&data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn stats_writes_one_row_per_region() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("wide.csv");
        let output = dir.path().join("stats.csv");
        std::fs::write(
            &input,
            "Date,USA,Canada\n,,Ontario\n2020-03-01,100,10\n2020-03-02,150,12\n",
        )
        .unwrap();

        run_stats(
            input.to_str().unwrap(),
            &[],
            OutputFormat::Csv,
            Some(output.to_str().unwrap()),
        )
        .unwrap();

        let text = std::fs::read_to_string(&output).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[1].starts_with("USA,150,50,2020-03-02,50"));
        assert!(lines[2].starts_with("Canada - Ontario,12,2,2020-03-02,2"));
    }
}
