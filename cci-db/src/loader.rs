//! Loading long records into the `fact_cases` table.

use cci_core::{dates, CaseRecord};
use rusqlite::params;

use crate::error::Result;
use crate::Store;

impl Store {
    /// Insert records, optionally replacing the table's current contents.
    ///
    /// The delete and every insert run inside one transaction: either the
    /// whole load commits or the prior contents survive untouched, and no
    /// reader ever sees the table in its emptied intermediate state.
    /// Duplicate (date, region) records are inserted as-is.
    pub fn load(&self, records: &[CaseRecord], replace: bool) -> Result<()> {
        let mut conn = self.connect()?;
        let tx = conn.transaction()?;
        if replace {
            tx.execute("DELETE FROM fact_cases", [])?;
        }
        {
            let mut stmt = tx.prepare(
                "INSERT INTO fact_cases (date, country, province, cases)
                 VALUES (?1, ?2, ?3, ?4)",
            )?;
            for record in records {
                stmt.execute(params![
                    dates::format_date(&record.date),
                    record.region.country,
                    record.region.province,
                    record.cases,
                ])?;
            }
        }
        tx.commit()?;
        log::info!(
            "store: loaded {} records (replace={})",
            records.len(),
            replace
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Store, StoreConfig};
    use cci_core::Region;
    use tempfile::TempDir;

    fn test_store() -> (TempDir, Store) {
        let dir = TempDir::new().unwrap();
        let store = Store::open(&StoreConfig::sqlite(dir.path().join("cases.db"))).unwrap();
        store.init().unwrap();
        (dir, store)
    }

    fn record(date: &str, country: &str, province: Option<&str>, cases: f64) -> CaseRecord {
        CaseRecord::new(
            cci_core::dates::parse_date(date).unwrap(),
            Region::new(country, province),
            cases,
        )
    }

    fn count_rows(store: &Store) -> i64 {
        let conn = rusqlite::Connection::open(store.path()).unwrap();
        conn.query_row("SELECT COUNT(*) FROM fact_cases", [], |row| row.get(0))
            .unwrap()
    }

    #[test]
    fn load_inserts_all_records() {
        let (_dir, store) = test_store();
        store
            .load(
                &[
                    record("2020-03-01", "USA", None, 100.0),
                    record("2020-03-01", "Canada", Some("Ontario"), 7.0),
                ],
                false,
            )
            .unwrap();
        assert_eq!(count_rows(&store), 2);
    }

    #[test]
    fn load_without_replace_appends() {
        let (_dir, store) = test_store();
        store
            .load(&[record("2020-03-01", "USA", None, 100.0)], false)
            .unwrap();
        store
            .load(&[record("2020-03-02", "USA", None, 110.0)], false)
            .unwrap();
        assert_eq!(count_rows(&store), 2);
    }

    #[test]
    fn replace_load_twice_leaves_exactly_the_second_set() {
        let (_dir, store) = test_store();
        let first = vec![
            record("2020-03-01", "USA", None, 100.0),
            record("2020-03-01", "Canada", Some("Ontario"), 7.0),
            record("2020-03-02", "USA", None, 110.0),
        ];
        let second = vec![
            record("2020-04-01", "France", None, 55.0),
            record("2020-04-02", "France", None, 60.0),
        ];
        store.load(&first, true).unwrap();
        store.load(&second, true).unwrap();

        assert_eq!(count_rows(&store), second.len() as i64);
        let conn = rusqlite::Connection::open(store.path()).unwrap();
        let leftovers: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM fact_cases WHERE country != 'France'",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(leftovers, 0, "No rows from the first load should remain");
    }

    #[test]
    fn absent_province_is_stored_as_null() {
        let (_dir, store) = test_store();
        store
            .load(&[record("2020-03-01", "USA", None, 100.0)], true)
            .unwrap();
        let conn = rusqlite::Connection::open(store.path()).unwrap();
        let nulls: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM fact_cases WHERE province IS NULL",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(nulls, 1);
    }

    #[test]
    fn duplicate_records_are_both_retained() {
        let (_dir, store) = test_store();
        let dup = record("2020-03-01", "USA", None, 100.0);
        store.load(&[dup.clone(), dup], true).unwrap();
        assert_eq!(count_rows(&store), 2);
    }

    #[test]
    fn load_into_empty_store_with_replace_is_fine() {
        let (_dir, store) = test_store();
        store.load(&[], true).unwrap();
        assert_eq!(count_rows(&store), 0);
    }
}
