//! Explicit store configuration.
//!
//! A `StoreConfig` is passed by value into [`Store::open`](crate::Store::open)
//! at call time; nothing here is read from global state.

use std::path::PathBuf;
use std::str::FromStr;

use crate::error::StoreError;

/// The embedded engine backing the store.
///
/// `Disabled` models a deployment with persistence switched off; opening a
/// store against it is a typed error, not a silent no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Backend {
    #[default]
    Sqlite,
    Disabled,
}

impl FromStr for Backend {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sqlite" => Ok(Backend::Sqlite),
            "disabled" | "none" => Ok(Backend::Disabled),
            other => Err(StoreError::UnknownBackend(other.to_string())),
        }
    }
}

/// Backend selector plus the on-disk database path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub backend: Backend,
    pub path: PathBuf,
}

impl StoreConfig {
    /// A SQLite store at the given path.
    pub fn sqlite(path: impl Into<PathBuf>) -> Self {
        Self {
            backend: Backend::Sqlite,
            path: path.into(),
        }
    }

    /// A configuration with persistence switched off.
    pub fn disabled() -> Self {
        Self {
            backend: Backend::Disabled,
            path: PathBuf::new(),
        }
    }

    pub fn persistence_available(&self) -> bool {
        self.backend == Backend::Sqlite
    }
}
