//! CSV schedule loader.
//!
//! # CSV format
//!
//! One row per container.
//!
//! ```csv
//! number,arrival_date,arrival_type,departure_date,departure_type,x,y,z
//! 1,2004-12-01 00:10,zeeschip,2004-12-03 08:00,trein,0,0,0
//! 2,2004-12-01 00:10,sea,2004-12-02 12:30,road,1,0,0
//! ```
//!
//! Dates use `YYYY-MM-DD[ HH:MM[:SS]]`.  Transport types accept the plain
//! names (`road`, `rail`, `inland`, `sea`) as well as the client's labels
//! (`vrachtauto`, `trein`, `binnenschip`, `zeeschip`).
//!
//! A container number may appear only once.  A departure scheduled before
//! the arrival is loaded as-is and logged; it simply leaves storage on the
//! first departure sweep.

use std::collections::HashSet;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;
use tracing::{info, warn};

use ct_core::{Container, ContainerNumber, GridPoint, SimDate, TransportType};

use crate::{ContainerBacklog, ScheduleError};

// ── CSV record ────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct ContainerRecord {
    number:         u32,
    arrival_date:   String,
    arrival_type:   String,
    departure_date: String,
    departure_type: String,
    x:              u16,
    y:              u16,
    z:              u16,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load the container schedule from a CSV file.
pub fn load_containers_csv(path: &Path) -> Result<ContainerBacklog, ScheduleError> {
    let file = std::fs::File::open(path).map_err(ScheduleError::Io)?;
    let backlog = load_containers_reader(file)?;
    info!(path = %path.display(), containers = backlog.len(), "schedule loaded");
    Ok(backlog)
}

/// Like [`load_containers_csv`] but accepts any `Read` source.
///
/// Useful for testing (pass a `std::io::Cursor`).
pub fn load_containers_reader<R: Read>(reader: R) -> Result<ContainerBacklog, ScheduleError> {
    let mut csv_reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);

    let mut backlog = ContainerBacklog::new();
    let mut seen: HashSet<ContainerNumber> = HashSet::new();

    for (i, result) in csv_reader.deserialize::<ContainerRecord>().enumerate() {
        // Header is line 1.
        let row = i + 2;
        let rec = result.map_err(|e| ScheduleError::Parse { row, message: e.to_string() })?;
        let container = to_container(rec, row)?;

        if !seen.insert(container.number) {
            return Err(ScheduleError::DuplicateContainer(container.number));
        }
        if container.departure_date < container.arrival_date {
            warn!(container = %container.number, row, "departure scheduled before arrival");
        }
        backlog.push(container);
    }

    Ok(backlog)
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn to_container(rec: ContainerRecord, row: usize) -> Result<Container, ScheduleError> {
    let field = |e: ct_core::CtError| ScheduleError::Parse { row, message: e.to_string() };

    Ok(Container {
        number:         ContainerNumber(rec.number),
        arrival_type:   rec.arrival_type.parse::<TransportType>().map_err(field)?,
        arrival_date:   SimDate::parse(&rec.arrival_date).map_err(field)?,
        departure_type: rec.departure_type.parse::<TransportType>().map_err(field)?,
        departure_date: SimDate::parse(&rec.departure_date).map_err(field)?,
        spawn:          GridPoint::new(rec.x, rec.y, rec.z),
    })
}
