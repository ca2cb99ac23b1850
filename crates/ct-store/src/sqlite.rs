//! SQLite store backend (feature `sqlite`).
//!
//! Creates a single `terminal.db` file in the configured output directory
//! with three tables: `transporters`, `cranes` and `storage`.

use std::path::Path;

use rusqlite::Connection;

use crate::store::SnapshotStore;
use crate::{CraneRow, StorageRow, StoreResult, TransporterRow};

/// Writes snapshots to an SQLite database.
pub struct SqliteStore {
    conn:     Connection,
    finished: bool,
}

impl SqliteStore {
    /// Open (or create) `terminal.db` in `dir` and initialise the schema.
    pub fn new(dir: &Path) -> StoreResult<Self> {
        std::fs::create_dir_all(dir)?;
        let conn = Connection::open(dir.join("terminal.db"))?;

        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous  = NORMAL;
             CREATE TABLE IF NOT EXISTS transporters (
                 tick           INTEGER NOT NULL,
                 unix_millis    INTEGER NOT NULL,
                 transporter_id INTEGER NOT NULL,
                 transport_type TEXT    NOT NULL,
                 direction      TEXT    NOT NULL,
                 stage          TEXT    NOT NULL,
                 depot          INTEGER,
                 containers     INTEGER NOT NULL
             );
             CREATE TABLE IF NOT EXISTS cranes (
                 tick        INTEGER NOT NULL,
                 unix_millis INTEGER NOT NULL,
                 crane_kind  TEXT    NOT NULL,
                 crane_id    INTEGER NOT NULL,
                 side        TEXT    NOT NULL,
                 occupied    INTEGER NOT NULL,
                 operation   TEXT,
                 container   INTEGER
             );
             CREATE TABLE IF NOT EXISTS storage (
                 tick        INTEGER NOT NULL,
                 unix_millis INTEGER NOT NULL,
                 container   INTEGER NOT NULL,
                 crane_id    INTEGER NOT NULL,
                 side        TEXT    NOT NULL,
                 event       TEXT    NOT NULL
             );",
        )?;

        Ok(Self { conn, finished: false })
    }
}

impl SnapshotStore for SqliteStore {
    fn save_transporter(&mut self, row: &TransporterRow) -> StoreResult<()> {
        let mut stmt = self.conn.prepare_cached(
            "INSERT INTO transporters \
             (tick, unix_millis, transporter_id, transport_type, direction, stage, depot, containers) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        )?;
        stmt.execute(rusqlite::params![
            row.tick as i64,
            row.unix_millis,
            row.transporter_id,
            row.transport_type,
            row.direction,
            row.stage,
            row.depot,
            row.containers,
        ])?;
        Ok(())
    }

    fn save_crane(&mut self, row: &CraneRow) -> StoreResult<()> {
        let mut stmt = self.conn.prepare_cached(
            "INSERT INTO cranes \
             (tick, unix_millis, crane_kind, crane_id, side, occupied, operation, container) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        )?;
        stmt.execute(rusqlite::params![
            row.tick as i64,
            row.unix_millis,
            row.crane_kind,
            row.crane_id,
            row.side,
            row.occupied as i64,
            row.operation,
            row.container,
        ])?;
        Ok(())
    }

    fn save_storage(&mut self, row: &StorageRow) -> StoreResult<()> {
        let tx = self.conn.unchecked_transaction()?;
        tx.execute(
            "INSERT INTO storage (tick, unix_millis, container, crane_id, side, event) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            rusqlite::params![
                row.tick as i64,
                row.unix_millis,
                row.container,
                row.crane_id,
                row.side,
                row.event.as_str(),
            ],
        )?;
        tx.commit()?;
        Ok(())
    }

    fn finish(&mut self) -> StoreResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.conn.execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
        Ok(())
    }
}
