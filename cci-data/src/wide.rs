//! The wide-format case table: one row per date, one column per region.
//!
//! # CSV Format
//!
//! Two header rows followed by one data row per date. The first header row
//! holds the country component of each column, the second the province
//! component (empty for country-level columns). Two column names are
//! reserved: `Date` (required, the row's calendar date) and `GlobalCases`
//! (optional, a precomputed per-date total across all regions).
//!
//! ```text
//! Date,GlobalCases,USA,Canada
//! ,,,Ontario
//! 2020-03-01,107,100,7
//! 2020-03-02,119,110,9
//! ```
//!
//! Cells that are empty or non-numeric are held as `None` so that
//! aggregates can skip them; the wide-to-long transform coerces them to
//! zero instead.

use anyhow::Context;
use chrono::NaiveDate;
use cci_core::{dates, DateRange, Region};

/// Reserved column name for the date of each row.
pub const DATE_COLUMN: &str = "Date";
/// Reserved column name for the precomputed per-date global total.
pub const GLOBAL_COLUMN: &str = "GlobalCases";

/// A dated, per-region wide table of cumulative case counts.
#[derive(Debug, Clone, PartialEq)]
pub struct WideTable {
    dates: Vec<NaiveDate>,
    regions: Vec<Region>,
    /// Row-major: `values[row][col]` pairs with `dates[row]` and `regions[col]`.
    values: Vec<Vec<Option<f64>>>,
    /// The reserved global-total column, when present. Never a region series.
    global: Option<Vec<Option<f64>>>,
}

impl WideTable {
    /// Build a table from already-parsed parts. Row lengths must match the
    /// region list.
    pub fn new(
        dates: Vec<NaiveDate>,
        regions: Vec<Region>,
        values: Vec<Vec<Option<f64>>>,
    ) -> anyhow::Result<Self> {
        if values.len() != dates.len() {
            anyhow::bail!(
                "wide table has {} dates but {} value rows",
                dates.len(),
                values.len()
            );
        }
        for (i, row) in values.iter().enumerate() {
            if row.len() != regions.len() {
                anyhow::bail!(
                    "wide table row {} has {} cells but {} region columns",
                    i,
                    row.len(),
                    regions.len()
                );
            }
        }
        Ok(Self {
            dates,
            regions,
            values,
            global: None,
        })
    }

    /// Parse the two-header-row wide CSV format.
    ///
    /// Exactly one `Date` column is required; at most one `GlobalCases`
    /// column is accepted. Every other column becomes a region series, in
    /// input order. Duplicate region columns are retained as-is.
    pub fn from_csv(data: &str) -> anyhow::Result<Self> {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(data.as_bytes());

        let records = rdr
            .records()
            .collect::<Result<Vec<_>, _>>()
            .context("malformed wide CSV")?;
        if records.len() < 2 {
            anyhow::bail!("wide CSV must have two header rows (countries, provinces)");
        }
        let (countries, provinces) = (&records[0], &records[1]);

        let mut date_col = None;
        let mut global_col = None;
        let mut regions = Vec::new();
        let mut region_cols = Vec::new();

        for i in 0..countries.len() {
            let country = countries.get(i).unwrap_or("").trim();
            let province = provinces.get(i).unwrap_or("");
            match country {
                DATE_COLUMN => {
                    if date_col.replace(i).is_some() {
                        anyhow::bail!("wide CSV has more than one {} column", DATE_COLUMN);
                    }
                }
                GLOBAL_COLUMN => {
                    if global_col.replace(i).is_some() {
                        anyhow::bail!("wide CSV has more than one {} column", GLOBAL_COLUMN);
                    }
                }
                "" => anyhow::bail!("wide CSV column {} has an empty country header", i),
                _ => {
                    regions.push(Region::new(country, Some(province)));
                    region_cols.push(i);
                }
            }
        }
        let date_col =
            date_col.with_context(|| format!("wide CSV has no {} column", DATE_COLUMN))?;

        let mut dates = Vec::new();
        let mut values = Vec::new();
        let mut global = global_col.map(|_| Vec::new());
        for record in &records[2..] {
            let date = dates::parse_date(record.get(date_col).unwrap_or(""))
                .with_context(|| format!("bad date in wide CSV row {}", dates.len() + 3))?;
            dates.push(date);
            values.push(
                region_cols
                    .iter()
                    .map(|&col| parse_cases(record.get(col).unwrap_or("")))
                    .collect(),
            );
            if let (Some(global), Some(col)) = (global.as_mut(), global_col) {
                global.push(parse_cases(record.get(col).unwrap_or("")));
            }
        }

        Ok(Self {
            dates,
            regions,
            values,
            global,
        })
    }

    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    /// The cell for a (date row, region column) pair; `None` when the
    /// source value was missing or non-numeric.
    pub fn cell(&self, row: usize, col: usize) -> Option<f64> {
        self.values[row][col]
    }

    /// The global-total column paired with its dates, when present.
    pub fn global_totals(&self) -> Option<Vec<(NaiveDate, Option<f64>)>> {
        self.global.as_ref().map(|g| {
            self.dates
                .iter()
                .copied()
                .zip(g.iter().copied())
                .collect()
        })
    }

    /// Derive (or replace) the global-total column as the per-date sum over
    /// all region columns, skipping missing cells.
    pub fn with_global_totals(mut self) -> Self {
        let global = self
            .values
            .iter()
            .map(|row| Some(row.iter().flatten().sum::<f64>()))
            .collect();
        self.global = Some(global);
        self
    }

    /// The table reduced to rows whose date falls within `range`.
    pub fn restrict(&self, range: &DateRange) -> Self {
        let keep: Vec<usize> = self
            .dates
            .iter()
            .enumerate()
            .filter(|(_, d)| range.contains(**d))
            .map(|(i, _)| i)
            .collect();
        Self {
            dates: keep.iter().map(|&i| self.dates[i]).collect(),
            regions: self.regions.clone(),
            values: keep.iter().map(|&i| self.values[i].clone()).collect(),
            global: self
                .global
                .as_ref()
                .map(|g| keep.iter().map(|&i| g[i]).collect()),
        }
    }

    /// The last date row's value per region, skipping missing cells.
    pub fn latest_totals(&self) -> Vec<(Region, f64)> {
        let Some(last) = self.values.last() else {
            return Vec::new();
        };
        self.regions
            .iter()
            .zip(last.iter())
            .filter_map(|(region, cell)| cell.map(|v| (region.clone(), v)))
            .collect()
    }

    /// The top `n` regions by latest total, descending.
    pub fn top_regions(&self, n: usize) -> Vec<(Region, f64)> {
        let mut totals = self.latest_totals();
        totals.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        totals.truncate(n);
        totals
    }
}

/// Parse a case-count cell. Empty, non-numeric, and non-finite text all
/// yield `None`.
pub fn parse_cases(cell: &str) -> Option<f64> {
    let trimmed = cell.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
Date,GlobalCases,USA,Canada
,,,Ontario
2020-03-01,107,100,7
2020-03-02,119,110,9
";

    #[test]
    fn parses_two_header_row_csv() {
        let table = WideTable::from_csv(SAMPLE).unwrap();
        assert_eq!(table.dates().len(), 2);
        assert_eq!(
            table.regions(),
            &[
                Region::country_only("USA"),
                Region::new("Canada", Some("Ontario")),
            ]
        );
        assert_eq!(table.cell(0, 0), Some(100.0));
        assert_eq!(table.cell(1, 1), Some(9.0));
        let global = table.global_totals().unwrap();
        assert_eq!(global[1].1, Some(119.0));
    }

    #[test]
    fn new_validates_row_lengths() {
        let date = NaiveDate::from_ymd_opt(2020, 3, 1).unwrap();
        let regions = vec![Region::country_only("USA")];
        let table = WideTable::new(vec![date], regions.clone(), vec![vec![Some(1.0)]]).unwrap();
        assert_eq!(table.cell(0, 0), Some(1.0));
        assert!(WideTable::new(vec![date], regions.clone(), vec![]).is_err());
        assert!(WideTable::new(vec![date], regions, vec![vec![]]).is_err());
    }

    #[test]
    fn missing_date_column_is_an_error() {
        let err = WideTable::from_csv("USA,Canada\n,Ontario\n").unwrap_err();
        assert!(err.to_string().contains("no Date column"));
    }

    #[test]
    fn duplicate_date_column_is_an_error() {
        assert!(WideTable::from_csv("Date,Date\n,\n").is_err());
    }

    #[test]
    fn empty_table_parses_to_empty_rows() {
        let table = WideTable::from_csv("Date,USA\n,\n").unwrap();
        assert!(table.dates().is_empty());
        assert_eq!(table.regions().len(), 1);
    }

    #[test]
    fn non_numeric_cells_are_missing() {
        let table = WideTable::from_csv("Date,USA\n,\n2020-03-01,oops\n").unwrap();
        assert_eq!(table.cell(0, 0), None);
    }

    #[test]
    fn parse_cases_rejects_non_finite_text() {
        assert_eq!(parse_cases("12.5"), Some(12.5));
        assert_eq!(parse_cases(""), None);
        assert_eq!(parse_cases("---"), None);
        assert_eq!(parse_cases("NaN"), None);
        assert_eq!(parse_cases("inf"), None);
    }

    #[test]
    fn derived_global_totals_skip_missing_cells() {
        let table = WideTable::from_csv("Date,USA,Canada\n,,Ontario\n2020-03-01,100,x\n")
            .unwrap()
            .with_global_totals();
        let global = table.global_totals().unwrap();
        assert_eq!(global[0].1, Some(100.0));
    }

    #[test]
    fn restrict_keeps_rows_inside_the_range_inclusive() {
        let table = WideTable::from_csv(SAMPLE).unwrap();
        let day = NaiveDate::from_ymd_opt(2020, 3, 2).unwrap();
        let restricted = table.restrict(&DateRange(day, day));
        assert_eq!(restricted.dates(), &[day]);
        assert_eq!(restricted.cell(0, 1), Some(9.0));
        assert_eq!(restricted.global_totals().unwrap().len(), 1);
    }

    #[test]
    fn latest_totals_skip_missing_cells() {
        let table =
            WideTable::from_csv("Date,USA,Canada\n,,Ontario\n2020-03-01,1,2\n2020-03-02,5,x\n")
                .unwrap();
        let totals = table.latest_totals();
        assert_eq!(totals, vec![(Region::country_only("USA"), 5.0)]);
    }

    #[test]
    fn top_regions_ranks_descending_and_truncates() {
        let table = WideTable::from_csv(
            "Date,USA,Canada,France\n,,,\n2020-03-01,10,30,20\n",
        )
        .unwrap();
        let top = table.top_regions(2);
        assert_eq!(top[0].0, Region::country_only("Canada"));
        assert_eq!(top[1].0, Region::country_only("France"));
        assert_eq!(top.len(), 2);
    }
}
