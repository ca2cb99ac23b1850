//! AGV job dispatch.
//!
//! A job has two legs, each a MOVE followed by a CRANE operation:
//!
//! ```text
//! delivery  idle AGV ─MOVE→ transporter crane ─CRANE→ ─MOVE→ storage crane  ─CRANE→ idle
//! pickup    idle AGV ─MOVE→ storage crane     ─CRANE→ ─MOVE→ transporter crane ─CRANE→ idle
//! ```
//!
//! The source crane is occupied when the job is dispatched, the destination
//! crane when the loaded AGV starts hauling.  An AGV that finds no free
//! destination crane waits in `AwaitingCrane` and is retried every tick.

use tracing::{debug, info, warn};

use ct_core::{AgvId, ContainerNumber, CraneKind, TransportType, TransporterId};
use ct_model::{AgvStage, Direction, Job, Leg, TransporterStage};
use ct_protocol::Message;
use ct_routing::{end_waypoint, Route, RouteStart, Router};
use ct_store::SnapshotStore;
use ct_transport::Transport;

use crate::{Controller, SimResult};

/// A job ready to hand to an AGV.
struct Dispatch {
    agv:   AgvId,
    job:   Job,
    route: Route,
}

impl<R: Router, S: SnapshotStore, T: Transport> Controller<R, S, T> {
    /// Retry waiting hauls, then hand out jobs for every docked transporter.
    pub(crate) fn dispatch_phase(&mut self) -> SimResult<()> {
        let waiting: Vec<AgvId> = self
            .model
            .agvs
            .iter()
            .filter(|a| a.stage == AgvStage::AwaitingCrane)
            .map(|a| a.id)
            .collect();
        for agv in waiting {
            let hauled = self.start_haul(agv);
            self.contain("dispatch", hauled)?;
        }

        for id in self.model.transporter_ids() {
            let dispatched = self.dispatch_transporter(id);
            self.contain("dispatch", dispatched)?;
        }
        Ok(())
    }

    /// Hand out as many jobs for `id` as resources and pacing allow.
    ///
    /// Road transporters take every free AGV at once; the others get at most
    /// one job per `dispatch_interval_ticks`.
    pub(crate) fn dispatch_transporter(&mut self, id: TransporterId) -> SimResult<()> {
        loop {
            let t = self.model.transporter(id)?;
            if !t.stage.is_docked() {
                return Ok(());
            }
            let paced = t.kind != TransportType::Road;
            if paced && self.tick < t.next_dispatch {
                return Ok(());
            }
            let Some(number) = t.peek_pending() else {
                return Ok(());
            };
            let (kind, direction) = (t.kind, t.direction);

            let planned = match direction {
                Direction::Delivery => self.plan_unload(id, number)?,
                Direction::Pickup   => self.plan_collect(id, number)?,
            };
            let Some(dispatch) = planned else {
                return Ok(());
            };

            self.issue_job(kind, dispatch)?;
            let t = self.model.transporter_mut(id)?;
            t.pop_pending();
            t.stage = TransporterStage::Transferring;
            if paced {
                t.next_dispatch = self.tick + self.config.dispatch_interval_ticks;
                return Ok(());
            }
        }
    }

    /// Offer storage-bound work to every docked pickup, used when the yard
    /// changes.
    pub(crate) fn dispatch_pickups(&mut self) -> SimResult<()> {
        let pickups: Vec<TransporterId> = self
            .model
            .transporters()
            .filter(|t| t.direction == Direction::Pickup && t.stage.is_docked())
            .map(|t| t.id)
            .collect();
        for id in pickups {
            self.dispatch_transporter(id)?;
        }
        Ok(())
    }

    /// Job taking `number` off delivery `id` to the yard.
    fn plan_unload(&mut self, id: TransporterId, number: ContainerNumber) -> SimResult<Option<Dispatch>> {
        let t = self.model.transporter(id)?;
        let (kind, depot) = (t.kind, t.depot.unwrap_or(0));
        let Some(departure) = t.containers().find(|c| c.number == number).map(|c| c.departure_type) else {
            warn!(transporter = %id, container = %number, "pending container is no longer aboard");
            self.model.transporter_mut(id)?.pop_pending();
            return Ok(None);
        };

        let Some(agv) = self.model.find_available_agv(kind) else {
            return Ok(self.miss(id, "agv"));
        };
        let Some(crane) = self.model.cranes.find_preferred_crane(CraneKind::serving(kind), depot) else {
            return Ok(self.miss(id, "transporter crane"));
        };

        let side  = self.model.cranes.get(crane)?.side;
        let from  = self.model.agv(agv)?.position;
        let route = self.planner.plan(RouteStart::Empty(from), crane.kind, side, departure)?;
        Ok(Some(Dispatch {
            agv,
            route,
            job: Job { container: number, transporter: id, leg: Leg::Inbound, source: crane, destination: None },
        }))
    }

    /// Job fetching `number` from the yard for pickup `id`.  The container
    /// must come off the storage crane that stored it.
    fn plan_collect(&mut self, id: TransporterId, number: ContainerNumber) -> SimResult<Option<Dispatch>> {
        let kind = self.model.transporter(id)?.kind;
        let Some(stored) = self.model.storage.get(number) else {
            warn!(transporter = %id, container = %number, "manifest container not in storage");
            self.abandon(id, number)?;
            return Ok(None);
        };
        let (crane, departure) = (stored.crane, stored.container.departure_type);

        let storage_crane = self.model.cranes.get(crane)?;
        if !storage_crane.is_available() {
            return Ok(self.miss(id, "storage crane"));
        }
        let side = storage_crane.side;
        let Some(agv) = self.model.find_available_agv(kind) else {
            return Ok(self.miss(id, "agv"));
        };

        let from  = self.model.agv(agv)?.position;
        let route = self.planner.plan(RouteStart::Empty(from), CraneKind::StorageCrane, side, departure)?;
        Ok(Some(Dispatch {
            agv,
            route,
            job: Job { container: number, transporter: id, leg: Leg::Outbound, source: crane, destination: None },
        }))
    }

    fn miss(&mut self, id: TransporterId, resource: &'static str) -> Option<Dispatch> {
        self.stats.allocation_misses += 1;
        debug!(transporter = %id, resource, "nothing free to dispatch");
        None
    }

    /// Reserve the source crane, bind the AGV and send its first MOVE.
    fn issue_job(&mut self, served: TransportType, dispatch: Dispatch) -> SimResult<()> {
        let Dispatch { agv, job, route } = dispatch;
        self.model.cranes.occupy(job.source)?;

        let agv_entry = self.model.agv_mut(agv)?;
        let from = agv_entry.position;
        agv_entry.assign(job, served);

        info!(
            %agv,
            transporter = %job.transporter,
            container = %job.container,
            crane = %job.source,
            route = %route.letters(),
            "agv dispatched"
        );
        let message_id = self.send(Message::Move { agv, from, route, crane: job.source });
        self.model.agv_mut(agv)?.processing_message = Some(message_id);
        self.stats.dispatched += 1;
        self.snapshot_crane(job.source, None, Some(job.container));
        Ok(())
    }

    /// Send a loaded AGV to the crane at the other end of its job, or park it
    /// in `AwaitingCrane` when none is free.
    pub(crate) fn start_haul(&mut self, agv: AgvId) -> SimResult<()> {
        let entry = self.model.agv(agv)?;
        let carried = entry.container.as_ref().map(|c| (c.arrival_type, c.departure_type));
        let (Some(mut job), Some((arrival, departure))) = (entry.job, carried) else {
            warn!(%agv, "haul requested without a job or container");
            self.model.agv_mut(agv)?.release();
            return Ok(());
        };

        let (destination, start) = match job.leg {
            Leg::Inbound => (
                self.model.cranes.find_available_crane(CraneKind::StorageCrane),
                RouteStart::Inbound(arrival),
            ),
            Leg::Outbound => {
                let (kind, depot) = match self.model.transporter(job.transporter) {
                    Ok(t) => (t.kind, t.depot.unwrap_or(0)),
                    Err(e) => {
                        warn!(%agv, error = %e, "pickup gone before delivery, dropping container");
                        self.model.agv_mut(agv)?.release();
                        return Ok(());
                    }
                };
                let source_side = self.model.cranes.get(job.source)?.side;
                (
                    self.model.cranes.find_preferred_crane(CraneKind::serving(kind), depot),
                    RouteStart::FromStorage(end_waypoint(CraneKind::StorageCrane, source_side, departure)),
                )
            }
        };

        let Some(destination) = destination else {
            let entry = self.model.agv_mut(agv)?;
            if entry.stage != AgvStage::AwaitingCrane {
                debug!(%agv, container = %job.container, "waiting for a free crane");
            }
            entry.stage = AgvStage::AwaitingCrane;
            self.stats.allocation_misses += 1;
            return Ok(());
        };

        let side  = self.model.cranes.get(destination)?.side;
        let route = self.planner.plan(start, destination.kind, side, departure)?;
        self.model.cranes.occupy(destination)?;
        job.destination = Some(destination);

        let entry = self.model.agv_mut(agv)?;
        entry.job   = Some(job);
        entry.stage = AgvStage::Hauling;
        let from    = entry.position;

        debug!(%agv, container = %job.container, crane = %destination, route = %route.letters(), "hauling");
        let message_id = self.send(Message::Move { agv, from, route, crane: destination });
        self.model.agv_mut(agv)?.processing_message = Some(message_id);
        self.snapshot_crane(destination, None, Some(job.container));
        Ok(())
    }

    /// Send DEPART for `id` unless it is already leaving.
    pub(crate) fn depart(&mut self, id: TransporterId) -> SimResult<()> {
        if !self.model.transporter(id)?.stage.is_docked() {
            return Ok(());
        }
        let message_id = self.send(Message::Depart { transporter: id });
        let t = self.model.transporter_mut(id)?;
        t.stage = TransporterStage::AwaitingDepart;
        t.processing_message = Some(message_id);
        info!(transporter = %id, kind = %t.kind, containers = t.load_len(), "transporter departing");
        self.snapshot_transporter(id);
        Ok(())
    }

    /// Drop `number` from pickup `id`; an emptied manifest sends it away.
    pub(crate) fn abandon(&mut self, id: TransporterId, number: ContainerNumber) -> SimResult<()> {
        let t = self.model.transporter_mut(id)?;
        if t.abandon(number) && t.is_complete() {
            self.depart(id)?;
        }
        Ok(())
    }
}
