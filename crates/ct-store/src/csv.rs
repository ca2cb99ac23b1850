//! CSV store backend.
//!
//! Creates three files in the configured output directory:
//! - `transporters.csv`
//! - `cranes.csv`
//! - `storage.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::store::SnapshotStore;
use crate::{CraneRow, StorageRow, StoreError, StoreResult, TransporterRow};

/// Writes snapshots to three CSV files.
pub struct CsvStore {
    transporters: Writer<File>,
    cranes:       Writer<File>,
    storage:      Writer<File>,
    finished:     bool,
}

impl CsvStore {
    /// Open (or create) the three CSV files in `dir` and write the header rows.
    pub fn new(dir: &Path) -> StoreResult<Self> {
        std::fs::create_dir_all(dir)?;

        let mut transporters = Writer::from_path(dir.join("transporters.csv"))?;
        transporters.write_record([
            "tick", "unix_millis", "transporter_id", "transport_type", "direction", "stage", "depot", "containers",
        ])?;

        let mut cranes = Writer::from_path(dir.join("cranes.csv"))?;
        cranes.write_record(["tick", "unix_millis", "crane_kind", "crane_id", "side", "occupied", "operation", "container"])?;

        let mut storage = Writer::from_path(dir.join("storage.csv"))?;
        storage.write_record(["tick", "unix_millis", "container", "crane_id", "side", "event"])?;

        Ok(Self { transporters, cranes, storage, finished: false })
    }

    fn check_open(&self) -> StoreResult<()> {
        if self.finished { Err(StoreError::Finished) } else { Ok(()) }
    }
}

fn opt<T: ToString>(v: Option<T>) -> String {
    v.map(|x| x.to_string()).unwrap_or_default()
}

impl SnapshotStore for CsvStore {
    fn save_transporter(&mut self, row: &TransporterRow) -> StoreResult<()> {
        self.check_open()?;
        self.transporters.write_record(&[
            row.tick.to_string(),
            row.unix_millis.to_string(),
            row.transporter_id.to_string(),
            row.transport_type.to_owned(),
            row.direction.to_owned(),
            row.stage.to_owned(),
            opt(row.depot),
            row.containers.to_string(),
        ])?;
        Ok(())
    }

    fn save_crane(&mut self, row: &CraneRow) -> StoreResult<()> {
        self.check_open()?;
        self.cranes.write_record(&[
            row.tick.to_string(),
            row.unix_millis.to_string(),
            row.crane_kind.to_owned(),
            row.crane_id.to_string(),
            row.side.to_owned(),
            (row.occupied as u8).to_string(),
            opt(row.operation),
            opt(row.container),
        ])?;
        Ok(())
    }

    fn save_storage(&mut self, row: &StorageRow) -> StoreResult<()> {
        self.check_open()?;
        self.storage.write_record(&[
            row.tick.to_string(),
            row.unix_millis.to_string(),
            row.container.to_string(),
            row.crane_id.to_string(),
            row.side.to_owned(),
            row.event.as_str().to_owned(),
        ])?;
        Ok(())
    }

    fn finish(&mut self) -> StoreResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.transporters.flush()?;
        self.cranes.flush()?;
        self.storage.flush()?;
        Ok(())
    }
}
