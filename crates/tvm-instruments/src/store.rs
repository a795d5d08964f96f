//! Persistence hooks for ledger snapshots.
//!
//! Persistence is opt-in: a ledger does nothing with a store unless the
//! caller hands it one.  [`NullStore`] is the inactive default;
//! [`JsonFileStore`] writes the snapshot as JSON to a path.

use crate::debt::LedgerSnapshot;
use std::path::PathBuf;
use tracing::debug;
use tvm_core::{Error, Result};

/// Somewhere ledger snapshots can be written.
pub trait LedgerStore {
    /// Persist a new snapshot.
    fn save(&self, snapshot: &LedgerSnapshot) -> Result<()>;

    /// Replace a previously persisted snapshot.
    fn update(&self, snapshot: &LedgerSnapshot) -> Result<()>;
}

/// The inactive store: both hooks succeed without writing anything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullStore;

impl LedgerStore for NullStore {
    fn save(&self, _snapshot: &LedgerSnapshot) -> Result<()> {
        Ok(())
    }

    fn update(&self, _snapshot: &LedgerSnapshot) -> Result<()> {
        Ok(())
    }
}

/// Writes snapshots as pretty-printed JSON to a fixed path.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// A store writing to `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn write(&self, snapshot: &LedgerSnapshot) -> Result<()> {
        let json = serde_json::to_string_pretty(snapshot)
            .map_err(|e| Error::Store(e.to_string()))?;
        std::fs::write(&self.path, json).map_err(|e| Error::Store(e.to_string()))?;
        debug!(path = %self.path.display(), "ledger snapshot written");
        Ok(())
    }
}

impl LedgerStore for JsonFileStore {
    fn save(&self, snapshot: &LedgerSnapshot) -> Result<()> {
        self.write(snapshot)
    }

    // An update overwrites the whole snapshot file.
    fn update(&self, snapshot: &LedgerSnapshot) -> Result<()> {
        self.write(snapshot)
    }
}
