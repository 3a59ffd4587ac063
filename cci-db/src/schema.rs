//! SQL schema for the case store.
//!
//! Applied as a single batch by [`Store::init`](crate::Store::init); every
//! statement is `IF NOT EXISTS`, so re-applying is a no-op.

/// Returns the full SQL schema as a single batch string.
///
/// One fact table, `fact_cases`: a row per (date, region) pair. `province`
/// is NULL for country-level series. There is no uniqueness constraint on
/// (date, country, province): duplicate wide columns in the source are
/// retained as duplicate rows.
pub fn create_schema() -> &'static str {
    r#"
    CREATE TABLE IF NOT EXISTS fact_cases (
        date DATE NOT NULL,
        country TEXT NOT NULL,
        province TEXT,
        cases DOUBLE NOT NULL
    );
    CREATE INDEX IF NOT EXISTS idx_fact_cases_date ON fact_cases(date);
    CREATE INDEX IF NOT EXISTS idx_fact_cases_region ON fact_cases(country, province);
    "#
}
