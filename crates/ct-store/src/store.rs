//! The `SnapshotStore` trait implemented by all backends.

use crate::{CraneRow, StorageRow, StoreResult, TransporterRow};

/// Trait implemented by every persistence backend.
///
/// The controller treats every error as non-fatal: it logs it, counts it and
/// keeps ticking.
pub trait SnapshotStore {
    fn save_transporter(&mut self, row: &TransporterRow) -> StoreResult<()>;

    fn save_crane(&mut self, row: &CraneRow) -> StoreResult<()>;

    fn save_storage(&mut self, row: &StorageRow) -> StoreResult<()>;

    /// Flush and close all underlying handles.
    ///
    /// Idempotent, safe to call more than once.
    fn finish(&mut self) -> StoreResult<()>;
}

impl<S: SnapshotStore + ?Sized> SnapshotStore for Box<S> {
    fn save_transporter(&mut self, row: &TransporterRow) -> StoreResult<()> {
        (**self).save_transporter(row)
    }

    fn save_crane(&mut self, row: &CraneRow) -> StoreResult<()> {
        (**self).save_crane(row)
    }

    fn save_storage(&mut self, row: &StorageRow) -> StoreResult<()> {
        (**self).save_storage(row)
    }

    fn finish(&mut self) -> StoreResult<()> {
        (**self).finish()
    }
}
