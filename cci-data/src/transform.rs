//! Wide-to-long reshaping.

use cci_core::CaseRecord;

use crate::wide::WideTable;

/// Flatten a wide table into normalized long records.
///
/// Emits exactly one record per (date row, region column) pair, row-major
/// over dates then columns in input order, so the output is a
/// deterministic, order-preserving flattening of the input. The reserved
/// global-total column is structurally excluded (the table never lists it
/// as a region). Missing or non-numeric cells are coerced to zero; the
/// output never carries an absent case count. Duplicate region columns are
/// flattened as-is, one record each.
///
/// An empty table (no dates or no region columns) produces an empty vector.
pub fn wide_to_long(table: &WideTable) -> Vec<CaseRecord> {
    let mut records = Vec::with_capacity(table.dates().len() * table.regions().len());
    for (row, date) in table.dates().iter().enumerate() {
        for (col, region) in table.regions().iter().enumerate() {
            let cases = table.cell(row, col).unwrap_or(0.0);
            records.push(CaseRecord::new(*date, region.clone(), cases));
        }
    }
    log::info!(
        "transform: {} dates x {} regions -> {} long records",
        table.dates().len(),
        table.regions().len(),
        records.len()
    );
    records
}

#[cfg(test)]
mod tests {
    use super::*;
    use cci_core::Region;
    use chrono::NaiveDate;

    fn date(s: &str) -> NaiveDate {
        cci_core::dates::parse_date(s).unwrap()
    }

    #[test]
    fn output_length_is_dates_times_regions() {
        let table = WideTable::from_csv(
            "Date,USA,Canada,France\n,,,\n\
             2020-03-01,1,2,3\n2020-03-02,4,5,6\n2020-03-03,7,8,9\n",
        )
        .unwrap();
        let records = wide_to_long(&table);
        assert_eq!(records.len(), 3 * 3);
    }

    #[test]
    fn global_total_column_is_dropped_before_reshaping() {
        // [(Date,""), (GlobalCases,""), (USA,""), (Canada,Ontario)] over
        // two dates yields 4 records: the global column is not a region.
        let table = WideTable::from_csv(
            "Date,GlobalCases,USA,Canada\n,,,Ontario\n\
             2020-03-01,107,100,7\n2020-03-02,119,110,9\n",
        )
        .unwrap();
        let records = wide_to_long(&table);
        assert_eq!(records.len(), 4);
        assert!(records.iter().all(|r| r.region.country != "GlobalCases"));
        assert_eq!(records[0].region, Region::country_only("USA"));
        assert_eq!(records[0].region.province, None);
        assert_eq!(records[1].region, Region::new("Canada", Some("Ontario")));
        assert_eq!(records[1].region.province.as_deref(), Some("Ontario"));
    }

    #[test]
    fn flattening_is_row_major_and_order_preserving() {
        let table = WideTable::from_csv(
            "Date,USA,Canada\n,,Ontario\n2020-03-01,1,2\n2020-03-02,3,4\n",
        )
        .unwrap();
        let records = wide_to_long(&table);
        let got: Vec<(NaiveDate, f64)> = records.iter().map(|r| (r.date, r.cases)).collect();
        assert_eq!(
            got,
            vec![
                (date("2020-03-01"), 1.0),
                (date("2020-03-01"), 2.0),
                (date("2020-03-02"), 3.0),
                (date("2020-03-02"), 4.0),
            ]
        );
    }

    #[test]
    fn missing_and_invalid_cells_become_zero() {
        let table =
            WideTable::from_csv("Date,USA,Canada\n,,\n2020-03-01,,oops\n").unwrap();
        let records = wide_to_long(&table);
        assert_eq!(records.len(), 2);
        assert!(records.iter().all(|r| r.cases == 0.0));
    }

    #[test]
    fn empty_input_produces_empty_output() {
        let table = WideTable::from_csv("Date,USA\n,\n").unwrap();
        assert!(wide_to_long(&table).is_empty());
    }

    #[test]
    fn province_variants_all_normalize_to_absent() {
        // Empty string (Sweden), the literal text "nan" (USA), and a
        // missing cell in a short second header row (Norway) must all come
        // out as an absent province.
        let table = WideTable::from_csv("Date,Sweden,USA,Norway\n,,nan\n2020-03-01,1,2,3\n")
            .unwrap();
        let records = wide_to_long(&table);
        assert_eq!(records.len(), 3);
        for record in &records {
            assert_eq!(
                record.region.province, None,
                "{} should have an absent province",
                record.region.country
            );
        }
    }
}
