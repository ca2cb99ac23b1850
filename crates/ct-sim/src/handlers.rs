//! Acknowledgement handlers: what each message kind changes once the client
//! confirms it.
//!
//! | Acknowledged | Effect                                                          |
//! |--------------|-----------------------------------------------------------------|
//! | CREATE       | transporter becomes idle, eligible for a depot                  |
//! | ARRIVE       | transporter docked, first AGV jobs dispatched                   |
//! | SPEED        | clock multiplier updated                                        |
//! | MOVE         | AGV repositioned, destination validated, CRANE issued           |
//! | CRANE        | crane freed, container handed over, haul started or AGV freed   |
//! | DEPART       | transporter removed, depot freed                                |
//!
//! Before a handler runs, the controller clears the in-flight id of the
//! message's [`Processor`](ct_protocol::Processor).

use tracing::{debug, info, warn};

use ct_core::{AgvId, ContainerNumber, CraneRef, MessageId, TransporterId};
use ct_model::{AgvStage, Job, Leg, TransporterStage};
use ct_protocol::{CraneOperation, Message};
use ct_routing::{resolve_destination, Route, Router, RoutingError};
use ct_store::{SnapshotStore, StorageEvent};
use ct_transport::Transport;

use crate::{Controller, SimResult};

impl<R: Router, S: SnapshotStore, T: Transport> Controller<R, S, T> {
    pub(crate) fn on_acknowledged(&mut self, id: MessageId, message: Message) -> SimResult<()> {
        match message {
            Message::Create { transporter, .. } => self.on_create_ack(transporter),
            Message::Arrive { transporter, .. } => self.on_arrive_ack(transporter),
            Message::Speed { speed, .. } => {
                if self.last_speed == Some(id) {
                    self.clock.set_speed(speed);
                }
                Ok(())
            }
            Message::Move { agv, route, crane, .. } => self.on_move_ack(agv, &route, crane),
            Message::Crane { crane, operation, agv, container, .. } => {
                self.on_crane_ack(crane, operation, agv, container.map(|c| c.number))
            }
            Message::Depart { transporter } => self.on_depart_ack(transporter),
        }
    }

    fn on_create_ack(&mut self, id: TransporterId) -> SimResult<()> {
        let t = self.model.transporter_mut(id)?;
        if t.stage == TransporterStage::Announced {
            t.stage = TransporterStage::Idle;
        }
        debug!(transporter = %id, "transporter announced");
        Ok(())
    }

    fn on_arrive_ack(&mut self, id: TransporterId) -> SimResult<()> {
        let t = self.model.transporter_mut(id)?;
        t.stage = TransporterStage::AwaitingAgv;
        info!(
            transporter = %id,
            kind = %t.kind,
            direction = t.direction.as_str(),
            depot = t.depot.unwrap_or(0),
            containers = t.load_len(),
            "transporter docked"
        );
        self.snapshot_transporter(id);
        self.dispatch_transporter(id)
    }

    fn on_depart_ack(&mut self, id: TransporterId) -> SimResult<()> {
        let t = self.model.remove_transporter(id)?;
        self.stats.departed += 1;
        info!(transporter = %id, kind = %t.kind, containers = t.load_len(), "transporter departed");
        self.snapshot_departed(&t);
        Ok(())
    }

    /// The AGV reached the crane at the end of `route`: check the crane is
    /// really there, then ask it to work.
    fn on_move_ack(&mut self, agv: AgvId, route: &Route, crane: CraneRef) -> SimResult<()> {
        let end  = route.end().ok_or(RoutingError::EmptyRoute)?;
        let side = self.model.cranes.get(crane)?.side;
        resolve_destination(end, crane.kind, side)?;

        let entry = self.model.agv_mut(agv)?;
        entry.position = end.position();
        let Some(job) = entry.job else {
            warn!(%agv, "move acknowledged for an agv without a job");
            return Ok(());
        };

        let (operation, next) = match (entry.stage, job.leg) {
            (AgvStage::ToPickup, Leg::Inbound)  => (CraneOperation::TransporterToAgv, AgvStage::Loading),
            (AgvStage::ToPickup, Leg::Outbound) => (CraneOperation::StorageToAgv, AgvStage::Loading),
            (AgvStage::Hauling, Leg::Inbound)   => (CraneOperation::AgvToStorage, AgvStage::Unloading),
            (AgvStage::Hauling, Leg::Outbound)  => (CraneOperation::AgvToTransporter, AgvStage::Unloading),
            (stage, _) => {
                warn!(%agv, stage = stage.as_str(), "move acknowledged in an unexpected stage");
                return Ok(());
            }
        };
        entry.stage = next;
        let carried = entry.container.clone();

        let container = match operation {
            CraneOperation::TransporterToAgv => self
                .model
                .transporter(job.transporter)
                .ok()
                .and_then(|t| t.containers().find(|c| c.number == job.container).cloned()),
            CraneOperation::StorageToAgv => self.model.storage.get(job.container).map(|s| s.container.clone()),
            CraneOperation::AgvToStorage | CraneOperation::AgvToTransporter => carried,
        };
        let transporter = (!operation.touches_storage()).then_some(job.transporter);
        let storage     = operation.touches_storage().then_some(crane.id);

        self.model.cranes.occupy(crane)?;
        let message_id = self.send(Message::Crane {
            crane,
            operation,
            transporter,
            agv: Some(agv),
            container,
            storage,
        });
        self.model.cranes.get_mut(crane)?.processing_message = Some(message_id);
        debug!(%agv, %crane, operation = operation.as_str(), container = %job.container, "crane operation issued");
        self.snapshot_crane(crane, Some(operation), Some(job.container));
        Ok(())
    }

    fn on_crane_ack(
        &mut self,
        crane:     CraneRef,
        operation: CraneOperation,
        agv:       Option<AgvId>,
        container: Option<ContainerNumber>,
    ) -> SimResult<()> {
        self.model.cranes.release(crane)?;
        self.snapshot_crane(crane, None, container);

        let Some(agv) = agv else {
            return Ok(());
        };
        let Some(job) = self.model.agv(agv)?.job else {
            warn!(%agv, %crane, "crane acknowledged for an agv without a job");
            return Ok(());
        };
        let number = container.unwrap_or(job.container);

        match operation {
            CraneOperation::TransporterToAgv => self.finish_unload(agv, job, number),
            CraneOperation::AgvToStorage     => self.finish_store(agv, crane),
            CraneOperation::StorageToAgv     => self.finish_retrieve(agv, crane, job, number),
            CraneOperation::AgvToTransporter => self.finish_load(agv, job),
        }
    }

    /// Container lifted off a delivery onto the AGV.
    fn finish_unload(&mut self, agv: AgvId, job: Job, number: ContainerNumber) -> SimResult<()> {
        let taken = self.model.transporter_mut(job.transporter).and_then(|t| t.take(number));
        let container = match taken {
            Ok(c) => c,
            Err(e) => {
                warn!(%agv, error = %e, "container not aboard, job aborted");
                self.model.agv_mut(agv)?.release();
                return Ok(());
            }
        };

        self.model.agv_mut(agv)?.container = Some(container);
        self.snapshot_transporter(job.transporter);
        self.start_haul(agv)?;

        if self.model.transporter(job.transporter)?.is_complete() {
            self.depart(job.transporter)?;
        }
        Ok(())
    }

    /// Container set down in the yard.
    fn finish_store(&mut self, agv: AgvId, crane: CraneRef) -> SimResult<()> {
        let Some(container) = self.model.agv_mut(agv)?.release() else {
            warn!(%agv, %crane, "nothing to store");
            return Ok(());
        };
        let (number, departure) = (container.number, container.departure_date);
        let now = self.clock.now();
        self.model.storage.store(container, crane, now)?;
        info!(container = %number, %crane, %departure, "container stored");
        self.snapshot_storage(number, crane, StorageEvent::Stored);
        self.dispatch_pickups()
    }

    /// Container lifted out of the yard onto the AGV.
    fn finish_retrieve(&mut self, agv: AgvId, crane: CraneRef, job: Job, number: ContainerNumber) -> SimResult<()> {
        let stored = match self.model.storage.take(number) {
            Ok(stored) => stored,
            Err(e) => {
                warn!(%agv, error = %e, "container not in storage, job aborted");
                self.model.agv_mut(agv)?.release();
                return self.abandon(job.transporter, job.container);
            }
        };

        self.model.agv_mut(agv)?.container = Some(stored.container);
        self.snapshot_storage(number, crane, StorageEvent::Retrieved);
        self.start_haul(agv)?;
        self.dispatch_pickups()
    }

    /// Container put aboard a pickup; the AGV is done.
    fn finish_load(&mut self, agv: AgvId, job: Job) -> SimResult<()> {
        let Some(container) = self.model.agv_mut(agv)?.release() else {
            warn!(%agv, transporter = %job.transporter, "nothing to load");
            return Ok(());
        };
        let number = container.number;
        match self.model.transporter_mut(job.transporter).and_then(|t| t.place(container)) {
            Ok(slot) => {
                debug!(transporter = %job.transporter, container = %number, ?slot, "container loaded");
                self.snapshot_transporter(job.transporter);
                if self.model.transporter(job.transporter)?.is_complete() {
                    self.depart(job.transporter)?;
                }
            }
            Err(e) => warn!(%agv, error = %e, "container could not be loaded"),
        }
        Ok(())
    }
}
