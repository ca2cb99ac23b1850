//! Tests for ct-store.

use crate::{CraneRow, StorageEvent, StorageRow, TransporterRow};

fn transporter_row(id: u32, depot: Option<u32>) -> TransporterRow {
    TransporterRow {
        tick:           3,
        unix_millis:    1_101_859_200_000,
        transporter_id: id,
        transport_type: "road",
        direction:      "delivery",
        stage:          "arriving",
        depot,
        containers:     1,
    }
}

fn crane_row(occupied: bool) -> CraneRow {
    CraneRow {
        tick:        4,
        unix_millis: 1_101_859_200_050,
        crane_kind:  "TruckCrane",
        crane_id:    2,
        side:        "north",
        occupied,
        operation:   occupied.then_some("TransporterToAgv"),
        container:   Some(17),
    }
}

fn storage_row(event: StorageEvent) -> StorageRow {
    StorageRow { tick: 9, unix_millis: 0, container: 17, crane_id: 6, side: "south", event }
}

// ── Memory & noop ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod memory_tests {
    use super::*;
    use crate::{MemoryStore, NoopStore, SnapshotStore};

    #[test]
    fn memory_keeps_rows_in_order() {
        let mut s = MemoryStore::new();
        s.save_transporter(&transporter_row(1, None)).unwrap();
        s.save_transporter(&transporter_row(2, Some(0))).unwrap();
        s.save_crane(&crane_row(true)).unwrap();
        s.save_storage(&storage_row(StorageEvent::Stored)).unwrap();
        s.finish().unwrap();

        assert_eq!(s.transporters.iter().map(|r| r.transporter_id).collect::<Vec<_>>(), vec![1, 2]);
        assert_eq!(s.cranes.len(), 1);
        assert_eq!(s.storage[0].event, StorageEvent::Stored);
        assert!(s.finished);
    }

    #[test]
    fn boxed_store_forwards() {
        let mut s: Box<dyn SnapshotStore> = Box::new(NoopStore);
        assert!(s.save_crane(&crane_row(false)).is_ok());
        assert!(s.finish().is_ok());
    }
}

// ── CSV ───────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod csv_tests {
    use tempfile::TempDir;

    use super::*;
    use crate::{CsvStore, SnapshotStore, StoreError};

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    fn headers(path: &std::path::Path) -> Vec<String> {
        let mut rdr = csv::Reader::from_path(path).unwrap();
        rdr.headers().unwrap().iter().map(str::to_owned).collect()
    }

    #[test]
    fn files_created_with_headers() {
        let dir = tmp();
        let mut s = CsvStore::new(dir.path()).unwrap();
        s.finish().unwrap();

        assert_eq!(
            headers(&dir.path().join("transporters.csv")),
            ["tick", "unix_millis", "transporter_id", "transport_type", "direction", "stage", "depot", "containers"]
        );
        assert_eq!(
            headers(&dir.path().join("cranes.csv")),
            ["tick", "unix_millis", "crane_kind", "crane_id", "side", "occupied", "operation", "container"]
        );
        assert_eq!(
            headers(&dir.path().join("storage.csv")),
            ["tick", "unix_millis", "container", "crane_id", "side", "event"]
        );
    }

    #[test]
    fn creates_missing_directory() {
        let dir = tmp();
        let nested = dir.path().join("out").join("run1");
        let _s = CsvStore::new(&nested).unwrap();
        assert!(nested.join("storage.csv").exists());
    }

    #[test]
    fn transporter_rows_round_trip() {
        let dir = tmp();
        let mut s = CsvStore::new(dir.path()).unwrap();
        s.save_transporter(&transporter_row(5, None)).unwrap();
        s.save_transporter(&transporter_row(6, Some(3))).unwrap();
        s.finish().unwrap();

        let mut rdr = csv::Reader::from_path(dir.path().join("transporters.csv")).unwrap();
        let rows: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(&rows[0][2], "5");
        assert_eq!(&rows[0][6], ""); // no depot yet
        assert_eq!(&rows[1][6], "3");
        assert_eq!(&rows[1][3], "road");
    }

    #[test]
    fn crane_and_storage_rows() {
        let dir = tmp();
        let mut s = CsvStore::new(dir.path()).unwrap();
        s.save_crane(&crane_row(true)).unwrap();
        s.save_crane(&crane_row(false)).unwrap();
        s.save_storage(&storage_row(StorageEvent::Retrieved)).unwrap();
        s.finish().unwrap();

        let mut rdr = csv::Reader::from_path(dir.path().join("cranes.csv")).unwrap();
        let rows: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(&rows[0][5], "1");
        assert_eq!(&rows[0][6], "TransporterToAgv");
        assert_eq!(&rows[1][5], "0");
        assert_eq!(&rows[1][6], "");

        let mut rdr = csv::Reader::from_path(dir.path().join("storage.csv")).unwrap();
        let rows: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(&rows[0][5], "retrieved");
    }

    #[test]
    fn finish_is_idempotent_and_closes() {
        let dir = tmp();
        let mut s = CsvStore::new(dir.path()).unwrap();
        s.finish().unwrap();
        s.finish().unwrap();
        assert!(matches!(s.save_crane(&crane_row(true)), Err(StoreError::Finished)));
    }
}

// ── SQLite ────────────────────────────────────────────────────────────────────

#[cfg(all(test, feature = "sqlite"))]
mod sqlite_tests {
    use tempfile::TempDir;

    use super::*;
    use crate::{SnapshotStore, SqliteStore};

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    fn count(dir: &TempDir, table: &str) -> i64 {
        let conn = rusqlite::Connection::open(dir.path().join("terminal.db")).unwrap();
        conn.query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |r| r.get(0)).unwrap()
    }

    #[test]
    fn db_created() {
        let dir = tmp();
        let _s = SqliteStore::new(dir.path()).unwrap();
        assert!(dir.path().join("terminal.db").exists());
    }

    #[test]
    fn rows_counted() {
        let dir = tmp();
        let mut s = SqliteStore::new(dir.path()).unwrap();
        s.save_transporter(&transporter_row(1, Some(0))).unwrap();
        s.save_transporter(&transporter_row(2, None)).unwrap();
        s.save_crane(&crane_row(true)).unwrap();
        s.save_storage(&storage_row(StorageEvent::Stored)).unwrap();
        s.finish().unwrap();

        assert_eq!(count(&dir, "transporters"), 2);
        assert_eq!(count(&dir, "cranes"), 1);
        assert_eq!(count(&dir, "storage"), 1);
    }

    #[test]
    fn null_depot_stored() {
        let dir = tmp();
        let mut s = SqliteStore::new(dir.path()).unwrap();
        s.save_transporter(&transporter_row(1, None)).unwrap();
        s.finish().unwrap();

        let conn = rusqlite::Connection::open(dir.path().join("terminal.db")).unwrap();
        let depot: Option<i64> = conn
            .query_row("SELECT depot FROM transporters WHERE transporter_id = 1", [], |r| r.get(0))
            .unwrap();
        assert!(depot.is_none());
    }
}
