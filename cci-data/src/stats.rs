//! Per-region summary statistics for the dashboard's stats table.

use chrono::NaiveDate;
use serde::Serialize;

use cci_core::Region;

use crate::wide::WideTable;

/// Summary figures for one region over the table's date span.
///
/// Derived from the cumulative series with missing cells coerced to zero,
/// matching what the wide-to-long transform would store.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RegionSummary {
    #[serde(flatten)]
    pub region: Region,
    /// Cumulative total on the last date in the table.
    pub latest_total: f64,
    /// Largest single-day increase over the span.
    pub peak_daily_increase: f64,
    /// Date on which the peak increase was recorded.
    pub peak_date: NaiveDate,
    /// Mean day-over-day increase over the span.
    pub mean_daily_increase: f64,
}

/// Compute summaries for the requested regions, in request order.
///
/// An empty `regions` slice selects every region column. Requested regions
/// not present in the table are skipped with a warning. A table with no
/// date rows produces no summaries.
pub fn summary_stats(table: &WideTable, regions: &[Region]) -> Vec<RegionSummary> {
    if table.dates().is_empty() {
        return Vec::new();
    }
    let selected: Vec<&Region> = if regions.is_empty() {
        table.regions().iter().collect()
    } else {
        regions
            .iter()
            .filter(|want| {
                let known = table.regions().contains(want);
                if !known {
                    log::warn!("stats: region {} not present in table", want);
                }
                known
            })
            .collect()
    };

    selected
        .into_iter()
        .filter_map(|region| {
            let col = table.regions().iter().position(|r| r == region)?;
            Some(summarize_column(table, region, col))
        })
        .collect()
}

fn summarize_column(table: &WideTable, region: &Region, col: usize) -> RegionSummary {
    let dates = table.dates();
    let series: Vec<f64> = (0..dates.len())
        .map(|row| table.cell(row, col).unwrap_or(0.0))
        .collect();

    let latest_total = *series.last().unwrap();
    let mut peak_daily_increase = 0.0;
    let mut peak_date = *dates.last().unwrap();
    let mut increase_sum = 0.0;
    for i in 1..series.len() {
        let increase = series[i] - series[i - 1];
        increase_sum += increase;
        if increase > peak_daily_increase {
            peak_daily_increase = increase;
            peak_date = dates[i];
        }
    }
    let mean_daily_increase = if series.len() > 1 {
        increase_sum / (series.len() - 1) as f64
    } else {
        0.0
    };

    RegionSummary {
        region: region.clone(),
        latest_total,
        peak_daily_increase,
        peak_date,
        mean_daily_increase,
    }
}
