//! `ct-store`: snapshot persistence for the terminal controller.
//!
//! The controller reports transporter, crane and storage changes as plain
//! rows; a backend decides where they go.
//!
//! | Feature   | Backend        | Files created                                        |
//! |-----------|----------------|------------------------------------------------------|
//! | *(none)*  | `NoopStore`    | none                                                 |
//! | *(none)*  | `MemoryStore`  | rows kept in memory, used by tests                   |
//! | *(none)*  | `CsvStore`     | `transporters.csv`, `cranes.csv`, `storage.csv`      |
//! | `sqlite`  | `SqliteStore`  | `terminal.db`                                        |
//!
//! Store failures never stop the controller; it logs them and carries on.

pub mod csv;
pub mod error;
pub mod memory;
pub mod row;
pub mod store;

#[cfg(feature = "sqlite")]
pub mod sqlite;

#[cfg(test)]
mod tests;

pub use csv::CsvStore;
pub use error::{StoreError, StoreResult};
pub use memory::{MemoryStore, NoopStore};
pub use row::{CraneRow, StorageEvent, StorageRow, TransporterRow};
pub use store::SnapshotStore;

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteStore;
