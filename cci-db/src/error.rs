//! Error type for `cci-db`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    /// The configured backend has persistence switched off; distinct from
    /// an empty store.
    #[error("persistence unavailable: store backend is disabled")]
    PersistenceUnavailable,

    #[error("unknown store backend '{0}'")]
    UnknownBackend(String),

    #[error("database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("date parse error: {0}")]
    DateParse(String),
}

pub type Result<T, E = StoreError> = std::result::Result<T, E>;
