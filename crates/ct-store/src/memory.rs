//! Backends that keep nothing on disk.

use crate::store::SnapshotStore;
use crate::{CraneRow, StorageRow, StoreResult, TransporterRow};

/// Discards every row.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopStore;

impl SnapshotStore for NoopStore {
    fn save_transporter(&mut self, _row: &TransporterRow) -> StoreResult<()> {
        Ok(())
    }

    fn save_crane(&mut self, _row: &CraneRow) -> StoreResult<()> {
        Ok(())
    }

    fn save_storage(&mut self, _row: &StorageRow) -> StoreResult<()> {
        Ok(())
    }

    fn finish(&mut self) -> StoreResult<()> {
        Ok(())
    }
}

/// Keeps every row in memory, in arrival order.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    pub transporters: Vec<TransporterRow>,
    pub cranes:       Vec<CraneRow>,
    pub storage:      Vec<StorageRow>,
    pub finished:     bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SnapshotStore for MemoryStore {
    fn save_transporter(&mut self, row: &TransporterRow) -> StoreResult<()> {
        self.transporters.push(row.clone());
        Ok(())
    }

    fn save_crane(&mut self, row: &CraneRow) -> StoreResult<()> {
        self.cranes.push(row.clone());
        Ok(())
    }

    fn save_storage(&mut self, row: &StorageRow) -> StoreResult<()> {
        self.storage.push(row.clone());
        Ok(())
    }

    fn finish(&mut self) -> StoreResult<()> {
        self.finished = true;
        Ok(())
    }
}
