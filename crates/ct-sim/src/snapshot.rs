//! Conversion of model state into store rows.
//!
//! Store failures never stop the controller: they are logged and counted in
//! [`Controller::store_errors`].

use tracing::warn;

use ct_core::{ContainerNumber, CraneRef, SimDate, Tick, TransporterId};
use ct_model::{Crane, Transporter};
use ct_protocol::CraneOperation;
use ct_routing::Router;
use ct_store::{CraneRow, SnapshotStore, StorageEvent, StorageRow, StoreResult, TransporterRow};
use ct_transport::Transport;

use crate::Controller;

pub(crate) fn transporter_row(t: &Transporter, tick: Tick, now: SimDate) -> TransporterRow {
    TransporterRow {
        tick:           tick.0,
        unix_millis:    now.unix_millis(),
        transporter_id: t.id.0,
        transport_type: t.kind.as_str(),
        direction:      t.direction.as_str(),
        stage:          t.stage.as_str(),
        depot:          t.depot.map(|d| d as u32),
        containers:     t.load_len() as u32,
    }
}

pub(crate) fn crane_row(
    crane:     &Crane,
    operation: Option<CraneOperation>,
    container: Option<ContainerNumber>,
    tick:      Tick,
    now:       SimDate,
) -> CraneRow {
    CraneRow {
        tick:        tick.0,
        unix_millis: now.unix_millis(),
        crane_kind:  crane.kind.as_str(),
        crane_id:    crane.id.0,
        side:        crane.side.as_str(),
        occupied:    crane.occupied,
        operation:   operation.map(CraneOperation::as_str),
        container:   container.map(|c| c.0),
    }
}

impl<R: Router, S: SnapshotStore, T: Transport> Controller<R, S, T> {
    pub(crate) fn snapshot_transporter(&mut self, id: TransporterId) {
        let Ok(t) = self.model.transporter(id) else {
            return;
        };
        let row = transporter_row(t, self.tick, self.clock.now());
        let result = self.store.save_transporter(&row);
        self.note_store(result);
    }

    /// Final row for a transporter that has left the terminal.
    pub(crate) fn snapshot_departed(&mut self, t: &Transporter) {
        let mut row = transporter_row(t, self.tick, self.clock.now());
        row.stage = "departed";
        row.depot = None;
        let result = self.store.save_transporter(&row);
        self.note_store(result);
    }

    pub(crate) fn snapshot_crane(
        &mut self,
        crane:     CraneRef,
        operation: Option<CraneOperation>,
        container: Option<ContainerNumber>,
    ) {
        let Ok(c) = self.model.cranes.get(crane) else {
            return;
        };
        let row = crane_row(c, operation, container, self.tick, self.clock.now());
        let result = self.store.save_crane(&row);
        self.note_store(result);
    }

    pub(crate) fn snapshot_storage(&mut self, container: ContainerNumber, crane: CraneRef, event: StorageEvent) {
        let side = match self.model.cranes.get(crane) {
            Ok(c) => c.side,
            Err(_) => return,
        };
        let now = self.clock.now();
        let row = StorageRow {
            tick:        self.tick.0,
            unix_millis: now.unix_millis(),
            container:   container.0,
            crane_id:    crane.id.0,
            side:        side.as_str(),
            event,
        };
        let result = self.store.save_storage(&row);
        self.note_store(result);
    }

    fn note_store(&mut self, result: StoreResult<()>) {
        if let Err(e) = result {
            self.store_errors += 1;
            warn!(error = %e, "snapshot write failed");
        }
    }
}
