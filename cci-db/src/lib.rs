//! On-disk SQLite store for normalized COVID-19 case records.
//!
//! This crate persists the long-format records produced by `cci-data`'s
//! wide-to-long transform into a single `fact_cases` table and exposes the
//! date-range/region query the dashboard filters run on.
//!
//! # Architecture
//!
//! - Configuration is an explicit [`StoreConfig`] value passed to
//!   [`Store::open`]; there is no process-wide state. A disabled backend is
//!   a typed error at open time, never a silent no-op.
//! - Every operation opens its own [`rusqlite::Connection`] and releases it
//!   on all exit paths, matching the short-lived, single-user invocation
//!   model. No locking beyond SQLite's own.
//! - Replace-loads run inside a single transaction, so readers never
//!   observe the table in its emptied intermediate state.
//!
//! # Usage
//!
//! ```no_run
//! use cci_db::{Store, StoreConfig};
//!
//! let store = Store::open(&StoreConfig::sqlite("data/cases.db"))?;
//! store.init()?;
//! # Ok::<(), cci_db::StoreError>(())
//! ```
//!
//! # Tables
//!
//! See [`schema::create_schema`] for the full SQL schema. The single table
//! `fact_cases(date, country, province, cases)` holds one row per (date,
//! region) pair; the province is NULL for country-level series.

pub mod config;
pub mod error;
pub mod schema;

mod loader;
mod queries;

pub use config::{Backend, StoreConfig};
pub use error::{Result, StoreError};

use std::path::{Path, PathBuf};

use rusqlite::Connection;

/// Handle on the on-disk case store.
///
/// Holds only the configured path; connections are opened per operation.
#[derive(Debug, Clone)]
pub struct Store {
    path: PathBuf,
}

impl Store {
    /// Open a store handle for the configured backend.
    ///
    /// This is the capability check: a [`Backend::Disabled`] configuration
    /// returns [`StoreError::PersistenceUnavailable`] so callers can tell
    /// "persistence off" apart from "no rows loaded yet".
    pub fn open(config: &StoreConfig) -> Result<Self> {
        match config.backend {
            Backend::Sqlite => Ok(Self {
                path: config.path.clone(),
            }),
            Backend::Disabled => Err(StoreError::PersistenceUnavailable),
        }
    }

    /// Create the schema if absent. Idempotent: calling on an
    /// already-initialized store is a no-op.
    ///
    /// Creates parent directories of the configured path as needed.
    pub fn init(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let conn = self.connect()?;
        conn.execute_batch(schema::create_schema())?;
        Ok(())
    }

    /// Path of the database file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn connect(&self) -> Result<Connection> {
        Ok(Connection::open(&self.path)?)
    }
}
