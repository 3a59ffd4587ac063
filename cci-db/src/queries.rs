//! Range/region queries against the `fact_cases` table.

use chrono::NaiveDate;
use cci_core::{dates, CaseRecord, DateRange, Region};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Row};

use crate::error::{Result, StoreError};
use crate::Store;

impl Store {
    /// Return records within the date range, ordered ascending by date.
    ///
    /// Both bounds are inclusive. An empty `regions` slice applies no
    /// region filter. A non-empty slice keeps only rows whose (country,
    /// province) matches a requested pair; the join uses SQLite's `IS`
    /// operator, so a requested absent province matches exactly the rows
    /// stored with a NULL province. All region values are bound as
    /// parameters, so a quote character in a country name matches literally
    /// and cannot alter the filter.
    ///
    /// Errors from an unreachable or corrupt store propagate as-is; there
    /// is no retry and no partial result.
    pub fn query_range(&self, range: &DateRange, regions: &[Region]) -> Result<Vec<CaseRecord>> {
        let conn = self.connect()?;
        let start = dates::format_date(&range.start());
        let end = dates::format_date(&range.end());

        let records = if regions.is_empty() {
            let mut stmt = conn.prepare(
                "SELECT date, country, province, cases
                 FROM fact_cases
                 WHERE date BETWEEN ?1 AND ?2
                 ORDER BY date",
            )?;
            let rows = stmt
                .query_map(params![start, end], row_to_record)?
                .collect::<std::result::Result<Vec<_>, _>>()?;
            rows
        } else {
            // One bound (?, ?) pair per requested region, joined through an
            // inline value list.
            let pairs = vec!["(?, ?)"; regions.len()].join(", ");
            let sql = format!(
                "WITH sel(country, province) AS (VALUES {pairs})
                 SELECT f.date, f.country, f.province, f.cases
                 FROM fact_cases f
                 JOIN sel s ON f.country = s.country AND f.province IS s.province
                 WHERE f.date BETWEEN ? AND ?
                 ORDER BY f.date"
            );
            let mut values: Vec<Value> = Vec::with_capacity(regions.len() * 2 + 2);
            for region in regions {
                values.push(Value::from(region.country.clone()));
                values.push(match &region.province {
                    Some(p) => Value::from(p.clone()),
                    None => Value::Null,
                });
            }
            values.push(Value::from(start));
            values.push(Value::from(end));

            let mut stmt = conn.prepare(&sql)?;
            let rows = stmt
                .query_map(params_from_iter(values), row_to_record)?
                .collect::<std::result::Result<Vec<_>, _>>()?;
            rows
        };
        log::info!("store: query_range returned {} records", records.len());
        Ok(records)
    }

    /// The (earliest, latest) dates present, or `None` for an empty table.
    pub fn date_bounds(&self) -> Result<Option<(NaiveDate, NaiveDate)>> {
        let conn = self.connect()?;
        let bounds: (Option<String>, Option<String>) = conn.query_row(
            "SELECT MIN(date), MAX(date) FROM fact_cases",
            [],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )?;
        match bounds {
            (Some(min), Some(max)) => Ok(Some((parse_stored_date(&min)?, parse_stored_date(&max)?))),
            _ => Ok(None),
        }
    }
}

fn parse_stored_date(text: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(text, dates::DATE_FORMAT)
        .map_err(|e| StoreError::DateParse(format!("'{}': {}", text, e)))
}

fn row_to_record(row: &Row<'_>) -> rusqlite::Result<CaseRecord> {
    let date_text: String = row.get(0)?;
    let date = NaiveDate::parse_from_str(&date_text, dates::DATE_FORMAT).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(e))
    })?;
    Ok(CaseRecord {
        date,
        region: Region {
            country: row.get(1)?,
            province: row.get(2)?,
        },
        cases: row.get(3)?,
    })
}
