//! Load a wide cases CSV into the store.

use anyhow::Context;
use log::info;

use cci_data::{wide_to_long, WideTable};
use cci_db::{Store, StoreConfig};

/// Parse the wide CSV at `input`, derive global totals, and load the
/// flattened records into the database at `db`. With `replace` the store's
/// previous contents are dropped in the same transaction.
pub fn run_load(input: &str, db: &str, replace: bool) -> anyhow::Result<()> {
    let data = std::fs::read_to_string(input)
        .with_context(|| format!("failed to read wide CSV {}", input))?;
    let table = WideTable::from_csv(&data)?.with_global_totals();
    let records = wide_to_long(&table);

    let store = Store::open(&StoreConfig::sqlite(db))?;
    store.init()?;
    store.load(&records, replace)?;

    info!(
        "Loaded {} records ({} dates, {} regions) from {} into {}",
        records.len(),
        table.dates().len(),
        table.regions().len(),
        input,
        db
    );
    Ok(())
}
